//! Region anchored emission driven by the measured prefill service

use super::KinematicModel;
use super::common::{CommonFields, texture_override};
use super::spraying::{LinearFields, LinearSample};
use crate::config::TemplateConfig;
use crate::error::Result;
use crate::host::{GenerationContext, Host, ShapeDescriptor, TextureId};
use crate::particle::GeneratedParticle;
use crate::sampler::{SampleObject, Sampler};
use crate::variables::Environment;

/// Particles filling a circular area around the source
///
/// Spawn offset and lifetime always come from the host's measured prefill
/// service. The source only contributes its anchor coordinates.
#[derive(Debug, Clone)]
pub struct AreaTemplate {
    common: CommonFields,
    linear: LinearFields,
    radius: f64,
    shape_type: Option<String>,
}

impl AreaTemplate {
    /// Build from a definition, honoring its `texture` override
    pub fn build(
        config: &TemplateConfig,
        default_texture: &TextureId,
        host: &dyn Host,
    ) -> Result<Self> {
        let texture = texture_override(config, default_texture);
        Ok(Self {
            common: CommonFields::build(config, texture, host)?,
            linear: LinearFields::build(config)?,
            radius: config.radius.unwrap_or_default(),
            shape_type: config.shape_type.clone(),
        })
    }

    /// Shape handed to the measured prefill service
    pub fn shape(&self) -> ShapeDescriptor {
        ShapeDescriptor::area(self.radius)
    }
}

impl SampleObject for AreaTemplate {
    type Output = LinearSample;

    fn sample_object(&self, sampler: &mut Sampler<'_>) -> Result<LinearSample> {
        LinearSample::draw(&self.common, &self.linear, sampler)
    }
}

impl KinematicModel for AreaTemplate {
    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn initial_state(
        &self,
        environment: Environment,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<GeneratedParticle> {
        let host = ctx.host;
        let mut sample = Sampler::new(&environment, &mut *ctx.rng).object(self)?;
        let origin = sample
            .source
            .as_ref()
            .and_then(|source| source.anchor(host))
            .unwrap_or_default();

        let measured = sample.prefill(host, &self.shape(), self.shape_type.as_deref());
        sample.apply(measured);

        Ok(sample.into_particle(origin, 0.0, &self.common.texture, environment, host))
    }
}
