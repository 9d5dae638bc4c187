//! Fields shared by every template kind

use crate::config::TemplateConfig;
use crate::error::{Result, TemplateError};
use crate::field::Field;
use crate::host::{GenerationContext, Host, Renderable, TextureId};
use crate::input::Keyframe;
use crate::particle::{GeneratedParticle, Motion, ParticleHandle, tint_from_color};
use crate::placement::{Location, Placement};
use crate::sampler::Sampler;
use crate::variables::{AdvancedConfig, Environment};
use crate::vector::Vector3;
use log::trace;

/// Size used when a template has no `particleSizeStart`
pub const DEFAULT_SIZE: Vector3 = Vector3::new(10.0, 10.0, 0.0);
/// Color used when a template has no `particleColorStart`
pub const DEFAULT_COLOR: Vector3 = Vector3::new(255.0, 255.0, 255.0);
/// Opacity used when a template has no `alphaStart`
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Classified fields common to all kinematic models
#[derive(Debug, Clone)]
pub struct CommonFields {
    /// Emitter placement
    pub source: Option<Placement>,
    /// Aim placement
    pub target: Option<Placement>,
    /// Texture for new renderables
    pub texture: TextureId,
    size_start: Field,
    size_end: Option<Field>,
    rotation_start: Field,
    rotation_end: Option<Field>,
    lifetime: Field,
    color_start: Field,
    color_end: Option<Field>,
    alpha_start: Field,
    alpha_end: Option<Field>,
    vibration_amplitude_start: Field,
    vibration_amplitude_end: Option<Field>,
    vibration_frequency_start: Field,
    vibration_frequency_end: Option<Field>,
    advanced: AdvancedConfig,
}

impl CommonFields {
    /// Classify the shared fields of a template definition
    pub fn build(config: &TemplateConfig, texture: TextureId, host: &dyn Host) -> Result<Self> {
        let lifetime = config
            .particle_lifetime
            .as_ref()
            .ok_or(TemplateError::MissingField("particleLifetime"))?;

        Ok(Self {
            source: Placement::optional("source", config.source.as_ref(), host)?,
            target: Placement::optional("target", config.target.as_ref(), host)?,
            texture,
            size_start: Field::vector_or(
                "particleSizeStart",
                config.particle_size_start.as_ref(),
                DEFAULT_SIZE,
            )?,
            size_end: Field::optional_vector("particleSizeEnd", config.particle_size_end.as_ref())?,
            rotation_start: Field::scalar_or(
                "particleRotationStart",
                config.particle_rotation_start.as_ref(),
                0.0,
            )?,
            rotation_end: Field::optional_scalar(
                "particleRotationEnd",
                config.particle_rotation_end.as_ref(),
            )?,
            lifetime: Field::scalar("particleLifetime", lifetime)?,
            color_start: Field::vector_or(
                "particleColorStart",
                config.particle_color_start.as_ref(),
                DEFAULT_COLOR,
            )?,
            color_end: Field::optional_vector(
                "particleColorEnd",
                config.particle_color_end.as_ref(),
            )?,
            alpha_start: Field::scalar_or("alphaStart", config.alpha_start.as_ref(), DEFAULT_ALPHA)?,
            alpha_end: Field::optional_scalar("alphaEnd", config.alpha_end.as_ref())?,
            vibration_amplitude_start: Field::scalar_or(
                "vibrationAmplitudeStart",
                config.vibration_amplitude_start.as_ref(),
                0.0,
            )?,
            vibration_amplitude_end: Field::optional_scalar(
                "vibrationAmplitudeEnd",
                config.vibration_amplitude_end.as_ref(),
            )?,
            vibration_frequency_start: Field::scalar_or(
                "vibrationFrequencyStart",
                config.vibration_frequency_start.as_ref(),
                0.0,
            )?,
            vibration_frequency_end: Field::optional_scalar(
                "vibrationFrequencyEnd",
                config.vibration_frequency_end.as_ref(),
            )?,
            advanced: config.advanced.clone().unwrap_or_default(),
        })
    }

    /// Evaluate the advanced variables for one generation call
    pub fn environment(&self, ctx: &mut GenerationContext<'_>) -> Result<Environment> {
        ctx.host
            .evaluate_variables(&self.advanced.variables, &mut *ctx.rng)
    }

    /// Draw the source location
    pub fn sample_source(&self, sampler: &mut Sampler<'_>) -> Result<Option<Location>> {
        sample_placement(self.source.as_ref(), sampler)
    }

    /// Draw the target location
    pub fn sample_target(&self, sampler: &mut Sampler<'_>) -> Result<Option<Location>> {
        sample_placement(self.target.as_ref(), sampler)
    }

    /// Emit from another particle's live position with no target
    pub(crate) fn attach_to(&mut self, particle: &ParticleHandle) {
        self.source = Some(Placement::follow("source", particle));
        self.target = None;
    }
}

fn sample_placement(
    placement: Option<&Placement>,
    sampler: &mut Sampler<'_>,
) -> Result<Option<Location>> {
    match placement {
        Some(placement) => placement.sample(sampler),
        None => Ok(None),
    }
}

/// Sampled values of the shared fields
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValues {
    /// Lifetime in milliseconds
    pub lifetime_ms: f64,
    /// Width and height
    pub size: Keyframe<Vector3>,
    /// Sprite rotation in degrees, relative to the emitter
    pub rotation: Keyframe<f64>,
    /// RGB color
    pub color: Keyframe<Vector3>,
    /// Opacity
    pub alpha: Keyframe<f64>,
    /// Vibration amplitude
    pub vibration_amplitude: Keyframe<f64>,
    /// Vibration frequency
    pub vibration_frequency: Keyframe<f64>,
}

/// Sample the shared keyframe fields, each with an independent draw
pub fn resolve_common_fields(
    fields: &CommonFields,
    sampler: &mut Sampler<'_>,
) -> Result<CommonValues> {
    Ok(CommonValues {
        lifetime_ms: sampler.scalar(&fields.lifetime)?,
        size: sampler.vector_keyframe(&fields.size_start, fields.size_end.as_ref())?,
        rotation: sampler.scalar_keyframe(&fields.rotation_start, fields.rotation_end.as_ref())?,
        color: sampler.vector_keyframe(&fields.color_start, fields.color_end.as_ref())?,
        alpha: sampler.scalar_keyframe(&fields.alpha_start, fields.alpha_end.as_ref())?,
        vibration_amplitude: sampler.scalar_keyframe(
            &fields.vibration_amplitude_start,
            fields.vibration_amplitude_end.as_ref(),
        )?,
        vibration_frequency: sampler.scalar_keyframe(
            &fields.vibration_frequency_start,
            fields.vibration_frequency_end.as_ref(),
        )?,
    })
}

impl CommonValues {
    /// Create the renderable at `position` from the start keyframes
    pub fn create_renderable(
        &self,
        host: &dyn Host,
        texture: &TextureId,
        position: Vector3,
    ) -> Box<dyn Renderable> {
        let mut renderable = host.create_sprite(texture);
        let size = self.size.start.value();
        renderable.set_position(position.x, position.y);
        renderable.set_size(size.x, size.y);
        renderable.set_rotation_degrees(self.rotation.start.value());
        renderable.set_tint(tint_from_color(self.color.start.value()));
        trace!(
            "Created '{}' renderable at ({:.2}, {:.2})",
            texture, position.x, position.y
        );
        renderable
    }

    /// Assemble the final particle record
    pub fn into_particle(
        self,
        renderable: Box<dyn Renderable>,
        environment: Environment,
        motion: Motion,
    ) -> GeneratedParticle {
        GeneratedParticle {
            renderable,
            lifetime_ms: self.lifetime_ms,
            size: self.size,
            rotation: self.rotation,
            color: self.color,
            alpha: self.alpha,
            vibration_amplitude: self.vibration_amplitude,
            vibration_frequency: self.vibration_frequency,
            environment,
            motion,
        }
    }
}

/// Texture for a template honoring a `texture` override other than `"none"`
pub(crate) fn texture_override(config: &TemplateConfig, default_texture: &TextureId) -> TextureId {
    match config.texture.as_deref() {
        Some(name) if name != TextureId::NONE => TextureId::new(name),
        _ => default_texture.clone(),
    }
}
