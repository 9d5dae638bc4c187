//! Straight-line emission aimed along the source facing or at a target

use super::KinematicModel;
use super::common::{CommonFields, CommonValues, resolve_common_fields, texture_override};
use crate::config::TemplateConfig;
use crate::error::Result;
use crate::field::Field;
use crate::host::{Anchor, GenerationContext, Host, MeasuredOverride, ShapeDescriptor, TextureId};
use crate::input::{Keyframe, ParticleInput};
use crate::particle::{GeneratedParticle, Motion};
use crate::placement::Location;
use crate::sampler::{SampleObject, Sampler};
use crate::variables::Environment;
use crate::vector::Vector3;
use log::trace;

/// Distance, in grid squares, past which lifetimes stretch
pub const LIFETIME_STRETCH_GRIDS: f64 = 5.0;

/// Spawn and travel fields of linear templates
#[derive(Debug, Clone)]
pub(crate) struct LinearFields {
    position_spawning: Field,
    velocity_start: Field,
    velocity_end: Option<Field>,
    angle_start: Field,
    angle_end: Option<Field>,
}

impl LinearFields {
    pub(crate) fn build(config: &TemplateConfig) -> Result<Self> {
        Ok(Self {
            position_spawning: Field::vector_or(
                "positionSpawning",
                config.position_spawning.as_ref(),
                Vector3::ZERO,
            )?,
            velocity_start: Field::scalar_or(
                "particleVelocityStart",
                config.particle_velocity_start.as_ref(),
                0.0,
            )?,
            velocity_end: Field::optional_scalar(
                "particleVelocityEnd",
                config.particle_velocity_end.as_ref(),
            )?,
            angle_start: Field::scalar_or(
                "particleAngleStart",
                config.particle_angle_start.as_ref(),
                0.0,
            )?,
            angle_end: Field::optional_scalar(
                "particleAngleEnd",
                config.particle_angle_end.as_ref(),
            )?,
        })
    }
}

/// Every field of a linear template drawn once
#[derive(Debug, Clone)]
pub struct LinearSample {
    /// Emitter location
    pub source: Option<Location>,
    /// Aim location
    pub target: Option<Location>,
    /// Shared keyframes
    pub common: CommonValues,
    /// Spawn offset from the source
    pub position_spawning: Vector3,
    /// Speed keyframes
    pub velocity: Keyframe<f64>,
    /// Travel angle keyframes in degrees
    pub angle: Keyframe<f64>,
}

impl LinearSample {
    pub(crate) fn draw(
        common: &CommonFields,
        linear: &LinearFields,
        sampler: &mut Sampler<'_>,
    ) -> Result<Self> {
        Ok(Self {
            source: common.sample_source(sampler)?,
            target: common.sample_target(sampler)?,
            common: resolve_common_fields(common, sampler)?,
            position_spawning: sampler.vector(&linear.position_spawning)?,
            velocity: sampler
                .scalar_keyframe(&linear.velocity_start, linear.velocity_end.as_ref())?,
            angle: sampler.scalar_keyframe(&linear.angle_start, linear.angle_end.as_ref())?,
        })
    }

    /// Query the measured prefill service with the sampled velocities
    pub(crate) fn prefill(
        &self,
        host: &dyn Host,
        shape: &ShapeDescriptor,
        kind: Option<&str>,
    ) -> MeasuredOverride {
        host.measured_prefill(
            shape,
            self.velocity.start.value(),
            self.velocity.end.map(|end| end.value()),
            kind,
        )
    }

    /// Replace sampled values with measured ones
    pub(crate) fn apply(&mut self, measured: MeasuredOverride) {
        if let Some(lifetime) = measured.lifetime {
            self.common.lifetime_ms = lifetime;
        }
        if let Some(position) = measured.position_spawning {
            self.position_spawning = position;
        }
        if let Some(start) = measured.velocity_start {
            self.velocity.start = ParticleInput::new(start);
        }
        if let Some(end) = measured.velocity_end {
            self.velocity.end = Some(ParticleInput::new(end));
        }
        if let Some(start) = measured.angle_start {
            self.angle.start = ParticleInput::new(start);
        }
        if let Some(end) = measured.angle_end {
            self.angle.end = Some(ParticleInput::new(end));
        }
    }

    /// Build the particle at `origin + position_spawning`, turned by `direction` radians
    pub(crate) fn into_particle(
        mut self,
        origin: Anchor,
        direction: f64,
        texture: &TextureId,
        environment: Environment,
        host: &dyn Host,
    ) -> GeneratedParticle {
        let degrees = direction.to_degrees();
        self.common.rotation = self.common.rotation.offset(degrees);
        let angle = self.angle.offset(degrees);

        let position = origin.position() + self.position_spawning;
        let renderable = self.common.create_renderable(host, texture, position);
        let motion = Motion::Spraying {
            velocity: self.velocity,
            angle,
            target: self.target,
            heading_degrees: angle.start.value(),
        };
        self.common.into_particle(renderable, environment, motion)
    }
}

/// Particles spraying out of the source in a straight line
#[derive(Debug, Clone)]
pub struct SprayingTemplate {
    common: CommonFields,
    linear: LinearFields,
}

impl SprayingTemplate {
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
        })
    }

    pub(crate) fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }
}

impl SampleObject for SprayingTemplate {
    type Output = LinearSample;

    fn sample_object(&self, sampler: &mut Sampler<'_>) -> Result<LinearSample> {
        LinearSample::draw(&self.common, &self.linear, sampler)
    }
}

impl KinematicModel for SprayingTemplate {
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
        let target = sample
            .target
            .as_ref()
            .and_then(|target| target.anchor(host))
            .filter(|target| !target.position().same_xy(&origin.position()));

        let direction = if let Some(target) = target {
            let direction = origin.position().bearing_to(&target.position());
            sample.position_spawning = sample.position_spawning.rotate_z(direction);

            let distance = origin.position().distance_2d(&target.position());
            let threshold = LIFETIME_STRETCH_GRIDS * host.grid_size();
            if distance > threshold {
                let stretch = distance / threshold;
                trace!("Target at {:.1} units, stretching lifetime by {:.3}", distance, stretch);
                sample.common.lifetime_ms *= stretch;
            }
            direction
        } else if let Some(shape) = sample.source.as_ref().and_then(Location::shape).cloned() {
            let measured = sample.prefill(host, &shape, None);
            sample.apply(measured);
            0.0
        } else {
            let direction = origin.facing.to_radians();
            sample.position_spawning = sample.position_spawning.rotate_z(direction);
            direction
        };

        Ok(sample.into_particle(origin, direction, &self.common.texture, environment, host))
    }
}
