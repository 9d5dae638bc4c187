//! Services a template consumes from the embedding application
//!
//! The engine never touches a scene graph or a renderer directly. Everything
//! it needs from the outside world goes through the [`Host`] trait, and every
//! generation call receives the host together with a random number generator
//! in a [`GenerationContext`].

use crate::error::Result;
use crate::variables::{self, Environment, VariableDefinition};
use crate::vector::Vector3;
use glam::DVec2;
use rand::RngCore;
use std::fmt;

/// Texture name used when creating renderables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(String);

impl TextureId {
    /// Name that disables a texture override
    pub const NONE: &'static str = "none";

    /// Create a texture id
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Texture name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TextureId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// World position and heading of a source or target
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anchor {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Heading in degrees
    pub facing: f64,
}

impl Anchor {
    /// Create an anchor
    pub const fn new(x: f64, y: f64, facing: f64) -> Self {
        Self { x, y, facing }
    }

    /// Planar position as a vector
    pub fn position(&self) -> Vector3 {
        Vector3::new(self.x, self.y, 0.0)
    }
}

/// Region descriptor handed to the measured prefill service
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    /// Shape kind ("circle", "cone", "ray", "area", ...)
    pub kind: String,
    /// Reach of the shape in scene units
    pub distance: f64,
}

impl ShapeDescriptor {
    /// Synthetic shape used by area templates
    pub fn area(radius: f64) -> Self {
        Self {
            kind: "area".to_string(),
            distance: radius,
        }
    }
}

/// Handle to a placeable resolved through the host
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceableRef {
    /// Host identifier
    pub id: String,
    /// Region shape when the placeable is a measured template
    pub shape: Option<ShapeDescriptor>,
}

impl PlaceableRef {
    /// A placeable object without a region shape
    pub fn object(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shape: None,
        }
    }

    /// A measured region
    pub fn measured(id: impl Into<String>, shape: ShapeDescriptor) -> Self {
        Self {
            id: id.into(),
            shape: Some(shape),
        }
    }
}

/// Field values computed by the measured prefill service
///
/// Present values replace the ones sampled from the template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasuredOverride {
    /// Lifetime in milliseconds
    pub lifetime: Option<f64>,
    /// Spawn offset from the source anchor
    pub position_spawning: Option<Vector3>,
    /// Velocity at spawn
    pub velocity_start: Option<f64>,
    /// Velocity at the end of the lifetime
    pub velocity_end: Option<f64>,
    /// Travel angle at spawn, in degrees
    pub angle_start: Option<f64>,
    /// Travel angle at the end of the lifetime, in degrees
    pub angle_end: Option<f64>,
}

/// A visual object created for each particle
///
/// Renderables are center anchored: the position is the middle of the sprite.
pub trait Renderable: fmt::Debug {
    /// Texture the renderable was created from
    fn texture(&self) -> &TextureId;

    /// Current position (Z is always 0)
    fn position(&self) -> Vector3;

    /// Move the renderable
    fn set_position(&mut self, x: f64, y: f64);

    /// Current width and height as `(x, y)`
    fn size(&self) -> Vector3;

    /// Resize the renderable
    fn set_size(&mut self, width: f64, height: f64);

    /// Rotation in degrees
    fn rotation_degrees(&self) -> f64;

    /// Set rotation in degrees
    fn set_rotation_degrees(&mut self, degrees: f64);

    /// Normalized RGB tint
    fn tint(&self) -> [f64; 3];

    /// Set normalized RGB tint
    fn set_tint(&mut self, rgb: [f64; 3]);
}

/// Plain in-memory renderable
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Texture
    pub texture: TextureId,
    /// Center position
    pub position: DVec2,
    /// Width and height
    pub size: DVec2,
    /// Rotation in degrees
    pub rotation_degrees: f64,
    /// Normalized RGB tint
    pub tint: [f64; 3],
    /// Anchor point relative to the size, always centered
    pub anchor: DVec2,
}

impl Sprite {
    /// Create an untinted sprite at the origin
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            position: DVec2::ZERO,
            size: DVec2::ZERO,
            rotation_degrees: 0.0,
            tint: [1.0; 3],
            anchor: DVec2::splat(0.5),
        }
    }
}

impl Renderable for Sprite {
    fn texture(&self) -> &TextureId {
        &self.texture
    }

    fn position(&self) -> Vector3 {
        Vector3::new(self.position.x, self.position.y, 0.0)
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }

    fn size(&self) -> Vector3 {
        Vector3::new(self.size.x, self.size.y, 0.0)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.size = DVec2::new(width, height);
    }

    fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    fn set_rotation_degrees(&mut self, degrees: f64) {
        self.rotation_degrees = degrees;
    }

    fn tint(&self) -> [f64; 3] {
        self.tint
    }

    fn set_tint(&mut self, rgb: [f64; 3]) {
        self.tint = rgb;
    }
}

/// Services provided by the embedding application
pub trait Host {
    /// Look up a placeable object by id
    fn resolve_placeable(&self, id: &str) -> Option<PlaceableRef>;

    /// Current anchor of a placeable, `None` once it left the scene
    fn anchor_position(&self, placeable: &PlaceableRef) -> Option<Anchor>;

    /// Size of one grid square in scene units
    fn grid_size(&self) -> f64;

    /// Evaluate an advanced variables block
    fn evaluate_variables(
        &self,
        definitions: &[VariableDefinition],
        rng: &mut dyn RngCore,
    ) -> Result<Environment> {
        variables::evaluate_variables(definitions, rng)
    }

    /// Compute spawn and lifetime overrides for a measured region
    fn measured_prefill(
        &self,
        _shape: &ShapeDescriptor,
        _velocity_start: f64,
        _velocity_end: Option<f64>,
        _kind: Option<&str>,
    ) -> MeasuredOverride {
        MeasuredOverride::default()
    }

    /// Create the renderable for a new particle
    fn create_sprite(&self, texture: &TextureId) -> Box<dyn Renderable> {
        Box::new(Sprite::new(texture.clone()))
    }
}

/// Ambient services for a single build or generation call
pub struct GenerationContext<'a> {
    /// Host services
    pub host: &'a dyn Host,
    /// Random number source
    pub rng: &'a mut dyn RngCore,
}

impl<'a> GenerationContext<'a> {
    /// Bundle a host and a random number generator
    pub fn new(host: &'a dyn Host, rng: &'a mut dyn RngCore) -> Self {
        Self { host, rng }
    }
}

impl fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("grid_size", &self.host.grid_size())
            .finish_non_exhaustive()
    }
}
