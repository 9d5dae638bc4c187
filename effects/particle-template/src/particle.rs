//! Initial particle state produced by a template

use crate::host::{Anchor, Host, Renderable, ShapeDescriptor};
use crate::input::Keyframe;
use crate::placement::Location;
use crate::variables::Environment;
use crate::vector::Vector3;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a generated particle
///
/// The caller owns the particle. A missile template only keeps a weak
/// reference to its main particle, so dropping every handle stops its trail.
pub type ParticleHandle = Rc<RefCell<GeneratedParticle>>;

/// Point an orbiting particle revolves around
#[derive(Debug, Clone)]
pub enum OrbitCenter {
    /// Only the emitter's anchor point, re-read every frame
    AnchorOnly(Location),
    /// The live source object, including its footprint
    Live(Location),
}

impl OrbitCenter {
    /// Current center position, `None` when the source is gone
    pub fn anchor(&self, host: &dyn Host) -> Option<Anchor> {
        match self {
            OrbitCenter::AnchorOnly(location) | OrbitCenter::Live(location) => {
                location.anchor(host)
            }
        }
    }

    /// Footprint of the followed object, never set for anchor-only centers
    pub fn shape(&self) -> Option<&ShapeDescriptor> {
        match self {
            OrbitCenter::AnchorOnly(_) => None,
            OrbitCenter::Live(location) => location.shape(),
        }
    }
}

/// Kinematic parameters for the external integrator
#[derive(Debug, Clone)]
pub enum Motion {
    /// Straight-line travel
    Spraying {
        /// Speed in scene units per second
        velocity: Keyframe<f64>,
        /// Travel angle in degrees
        angle: Keyframe<f64>,
        /// Target the particle was aimed at
        target: Option<Location>,
        /// Live travel heading in degrees, updated by the integrator
        heading_degrees: f64,
    },
    /// Orbit around a center
    Graviting {
        /// Point the particle orbits
        center: OrbitCenter,
        /// Current orbit angle in degrees
        angle_degrees: f64,
        /// Angular velocity in degrees per second
        angular_velocity: Keyframe<f64>,
        /// Orbit radius
        radius: Keyframe<f64>,
    },
}

/// Fully resolved initial state of one particle
#[derive(Debug)]
pub struct GeneratedParticle {
    /// Visual object, already placed at the spawn position
    pub renderable: Box<dyn Renderable>,
    /// Lifetime in milliseconds
    pub lifetime_ms: f64,
    /// Width and height
    pub size: Keyframe<Vector3>,
    /// Sprite rotation in degrees
    pub rotation: Keyframe<f64>,
    /// RGB color, 0-255 per channel
    pub color: Keyframe<Vector3>,
    /// Opacity
    pub alpha: Keyframe<f64>,
    /// Vibration amplitude
    pub vibration_amplitude: Keyframe<f64>,
    /// Vibration frequency
    pub vibration_frequency: Keyframe<f64>,
    /// Variables evaluated for this particle
    pub environment: Environment,
    /// Kinematic model parameters
    pub motion: Motion,
}

impl GeneratedParticle {
    /// Current renderable position
    pub fn position(&self) -> Vector3 {
        self.renderable.position()
    }

    /// Current travel direction in degrees
    pub fn direction(&self) -> f64 {
        match &self.motion {
            Motion::Spraying {
                heading_degrees, ..
            } => *heading_degrees,
            Motion::Graviting { angle_degrees, .. } => *angle_degrees,
        }
    }

    /// Offset travel or orbit angles by `degrees`
    pub(crate) fn turn(&mut self, degrees: f64) {
        match &mut self.motion {
            Motion::Spraying {
                angle,
                heading_degrees,
                ..
            } => {
                *angle = angle.offset(degrees);
                *heading_degrees += degrees;
            }
            Motion::Graviting { angle_degrees, .. } => *angle_degrees += degrees,
        }
    }
}

/// Convert a 0-255 color to a normalized tint
///
/// Channels are floored before dividing, so `255` maps to exactly `1.0`.
///
/// # Examples
///
/// ```
/// use particle_template::{Vector3, tint_from_color};
///
/// let tint = tint_from_color(Vector3::new(255.0, 128.9, 0.0));
/// assert_eq!(tint, [1.0, 128.0 / 255.0, 0.0]);
/// ```
pub fn tint_from_color(color: Vector3) -> [f64; 3] {
    [
        color.x.floor() / 255.0,
        color.y.floor() / 255.0,
        color.z.floor() / 255.0,
    ]
}
