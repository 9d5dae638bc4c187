//! Particle templates and the kinematic models they generate
//!
//! A template is built once per effect definition and then polled for new
//! particles. Each poll re-samples every randomized field.
//!
//! # Example
//!
//! ```
//! use particle_template::{
//!     Anchor, GenerationContext, ParticleTemplate, Scene, TemplateConfig, TemplateKind,
//! };
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut scene = Scene::new(100.0);
//! scene.add_object("caster", Anchor::new(0.0, 0.0, 0.0));
//!
//! let config: TemplateConfig = serde_json::from_str(
//!     r#"{
//!         "source": "caster",
//!         "particleVelocityStart": [100, 200],
//!         "particleLifetime": [500, 1000],
//!         "particleColorStart": [255, 64, 0]
//!     }"#,
//! )
//! .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut ctx = GenerationContext::new(&scene, &mut rng);
//! let mut template =
//!     ParticleTemplate::build(TemplateKind::Spraying, &config, &"spark".into(), &mut ctx)
//!         .unwrap();
//!
//! let particle = template.generate_particles(&mut ctx).unwrap().unwrap();
//! let lifetime = particle.borrow().lifetime_ms;
//! assert!((500.0..=1000.0).contains(&lifetime));
//! ```

pub mod area;
pub mod common;
pub mod graviting;
pub mod missile;
pub mod spraying;

use crate::config::{TemplateConfig, TemplateKind};
use crate::error::Result;
use crate::host::{GenerationContext, TextureId};
use crate::particle::{GeneratedParticle, ParticleHandle};
use crate::variables::Environment;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

pub use area::AreaTemplate;
pub use common::{CommonFields, CommonValues, resolve_common_fields};
pub use graviting::GravitingTemplate;
pub use missile::{MissileState, MissileTemplate, SubEmitter};
pub use spraying::{LinearSample, SprayingTemplate};

/// A model that computes the initial frame of a particle
pub trait KinematicModel {
    /// Shared template fields
    fn common(&self) -> &CommonFields;

    /// Compute the particle against an already evaluated environment
    fn initial_state(
        &self,
        environment: Environment,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<GeneratedParticle>;

    /// Evaluate the advanced variables, then compute the particle
    fn generate_initial_state(&self, ctx: &mut GenerationContext<'_>) -> Result<GeneratedParticle> {
        let environment = self.common().environment(ctx)?;
        self.initial_state(environment, ctx)
    }
}

/// A built template of any kind
#[derive(Debug)]
pub enum ParticleTemplate {
    /// Straight-line travel
    Spraying(SprayingTemplate),
    /// Orbit around the source
    Graviting(GravitingTemplate),
    /// Homing missile with optional trail
    Missile(MissileTemplate),
    /// Region anchored emission
    Area(AreaTemplate),
}

impl ParticleTemplate {
    /// Build a template of the given kind
    ///
    /// Malformed fields are rejected here. Missile templates also create
    /// their main particle, which is why the full context is required.
    pub fn build(
        kind: TemplateKind,
        config: &TemplateConfig,
        default_texture: &TextureId,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Self> {
        debug!("Building {} template", kind);
        let template = match kind {
            TemplateKind::Spraying => {
                Self::Spraying(SprayingTemplate::build(config, default_texture, ctx.host)?)
            }
            TemplateKind::Graviting => {
                Self::Graviting(GravitingTemplate::build(config, default_texture, ctx.host)?)
            }
            TemplateKind::Missile => {
                Self::Missile(MissileTemplate::build(config, default_texture, ctx)?)
            }
            TemplateKind::Area => Self::Area(AreaTemplate::build(config, default_texture, ctx.host)?),
        };
        Ok(template)
    }

    /// Kind of this template
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Spraying(_) => TemplateKind::Spraying,
            Self::Graviting(_) => TemplateKind::Graviting,
            Self::Missile(_) => TemplateKind::Missile,
            Self::Area(_) => TemplateKind::Area,
        }
    }

    /// Generate the next particle
    ///
    /// Only missile templates return `Ok(None)`, once they have nothing left
    /// to emit.
    pub fn generate_particles(
        &mut self,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Option<ParticleHandle>> {
        let particle = match self {
            Self::Spraying(template) => template.generate_initial_state(ctx)?,
            Self::Graviting(template) => template.generate_initial_state(ctx)?,
            Self::Area(template) => template.generate_initial_state(ctx)?,
            Self::Missile(template) => return template.generate_particles(ctx),
        };
        Ok(Some(Rc::new(RefCell::new(particle))))
    }
}
