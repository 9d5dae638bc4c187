//! Procedural particle template engine
//!
//! Turns declarative effect definitions (keyframed start/end values,
//! randomized ranges, variable references and a kinematic model) into fully
//! resolved initial particle states. Integrating particles over time and
//! rendering them belong to the embedding application, which plugs in
//! through the [`Host`] trait.
//!
//! Four kinematic models are supported:
//!
//! - **Spraying**: straight-line travel from a spawn offset, aimed along the
//!   source facing or at a target, with lifetimes stretched for long shots.
//! - **Graviting**: orbit around the source, optionally aimed at a target.
//! - **Missile**: one homing particle timed to reach its target, followed by
//!   an optional trail of spraying or graviting particles.
//! - **Area**: region anchored emission computed by the host's measured
//!   prefill service.

pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod input;
pub mod particle;
pub mod placement;
pub mod sampler;
pub mod scene;
pub mod template;
pub mod variables;
pub mod vector;

// Re-export common types
pub use config::{SubTemplateConfig, TemplateConfig, TemplateKind};
pub use error::{Result, TemplateError};
pub use field::{Field, FieldKind, FieldSpec, RawField};
pub use host::{
    Anchor, GenerationContext, Host, MeasuredOverride, PlaceableRef, Renderable, ShapeDescriptor,
    Sprite, TextureId,
};
pub use input::{Keyframe, ParticleInput, Value};
pub use particle::{GeneratedParticle, Motion, OrbitCenter, ParticleHandle, tint_from_color};
pub use placement::{Location, Placement, is_placeable_id};
pub use sampler::{SampleObject, Sampler};
pub use scene::Scene;
pub use template::{
    AreaTemplate, GravitingTemplate, KinematicModel, MissileTemplate, ParticleTemplate,
    SprayingTemplate,
};
pub use variables::{AdvancedConfig, Environment, VariableDefinition, evaluate_variables};
pub use vector::Vector3;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
