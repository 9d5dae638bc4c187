//! Orbital emission around the source

use super::KinematicModel;
use super::common::{CommonFields, resolve_common_fields};
use crate::config::TemplateConfig;
use crate::error::Result;
use crate::field::Field;
use crate::host::{GenerationContext, Host, TextureId};
use crate::particle::{GeneratedParticle, Motion, OrbitCenter};
use crate::placement::Location;
use crate::sampler::Sampler;
use crate::variables::Environment;
use crate::vector::Vector3;

/// Particles orbiting their source
#[derive(Debug, Clone)]
pub struct GravitingTemplate {
    common: CommonFields,
    angle_start: Field,
    angular_velocity_start: Field,
    angular_velocity_end: Option<Field>,
    radius_start: Field,
    radius_end: Option<Field>,
    only_emitter_follow: bool,
}

impl GravitingTemplate {
    /// Build from a definition
    ///
    /// `particleVelocityStart`/`particleVelocityEnd` are angular velocities in
    /// degrees per second.
    pub fn build(config: &TemplateConfig, texture: &TextureId, host: &dyn Host) -> Result<Self> {
        Ok(Self {
            common: CommonFields::build(config, texture.clone(), host)?,
            angle_start: Field::scalar_or(
                "particleAngleStart",
                config.particle_angle_start.as_ref(),
                0.0,
            )?,
            angular_velocity_start: Field::scalar_or(
                "particleVelocityStart",
                config.particle_velocity_start.as_ref(),
                0.0,
            )?,
            angular_velocity_end: Field::optional_scalar(
                "particleVelocityEnd",
                config.particle_velocity_end.as_ref(),
            )?,
            radius_start: Field::scalar_or(
                "particleRadiusStart",
                config.particle_radius_start.as_ref(),
                0.0,
            )?,
            radius_end: Field::optional_scalar(
                "particleRadiusEnd",
                config.particle_radius_end.as_ref(),
            )?,
            only_emitter_follow: config.only_emitter_follow,
        })
    }

    pub(crate) fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }
}

impl KinematicModel for GravitingTemplate {
    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn initial_state(
        &self,
        environment: Environment,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<GeneratedParticle> {
        let host = ctx.host;
        let mut sampler = Sampler::new(&environment, &mut *ctx.rng);

        let source = self.common.sample_source(&mut sampler)?;
        let origin = source
            .as_ref()
            .and_then(|source| source.anchor(host))
            .unwrap_or_default();
        let target = self
            .common
            .sample_target(&mut sampler)?
            .and_then(|target| target.anchor(host));

        // Bearing to a distinct target, otherwise the source heading
        let angle_origin = match target {
            Some(target) if !target.position().same_xy(&origin.position()) => origin
                .position()
                .bearing_to(&target.position())
                .to_degrees(),
            _ => origin.facing,
        };

        let angle = sampler.scalar(&self.angle_start)? + angle_origin;
        let radius = sampler.scalar_keyframe(&self.radius_start, self.radius_end.as_ref())?;
        let angular_velocity = sampler.scalar_keyframe(
            &self.angular_velocity_start,
            self.angular_velocity_end.as_ref(),
        )?;
        let mut common = resolve_common_fields(&self.common, &mut sampler)?;
        common.rotation = common.rotation.offset(angle_origin);

        let radians = angle.to_radians();
        let position = origin.position()
            + Vector3::new(radians.cos(), radians.sin(), 0.0) * radius.start.value();
        let renderable = common.create_renderable(host, &self.common.texture, position);

        let source = source.unwrap_or(Location::Point(origin));
        let center = if self.only_emitter_follow {
            OrbitCenter::AnchorOnly(source)
        } else {
            OrbitCenter::Live(source)
        };
        let motion = Motion::Graviting {
            center,
            angle_degrees: angle,
            angular_velocity,
            radius,
        };
        Ok(common.into_particle(renderable, environment, motion))
    }
}
