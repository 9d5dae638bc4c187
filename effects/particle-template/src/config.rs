//! Template definitions as authored by users

use crate::error::TemplateError;
use crate::field::RawField;
use crate::variables::AdvancedConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinematic model selected by a template definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Straight-line travel, optionally aimed at a target
    Spraying,
    /// Orbit around the source
    Graviting,
    /// A single homing particle with an optional trail
    Missile,
    /// Region anchored emission
    #[serde(rename = "area")]
    Area,
}

impl TemplateKind {
    /// Name used in template definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Spraying => "Spraying",
            TemplateKind::Graviting => "Graviting",
            TemplateKind::Missile => "Missile",
            TemplateKind::Area => "area",
        }
    }
}

impl FromStr for TemplateKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Spraying" => Ok(TemplateKind::Spraying),
            "Graviting" => Ok(TemplateKind::Graviting),
            "Missile" => Ok(TemplateKind::Missile),
            "area" => Ok(TemplateKind::Area),
            _ => Err(TemplateError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat template definition shared by every kind
///
/// Fields a kind does not use are ignored. Every field except
/// `particleLifetime` is optional and falls back to a neutral default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateConfig {
    /// Emitter position: placeable id, `{x, y, r?}` or variable
    pub source: Option<RawField>,
    /// Aim point: placeable id, `{x, y}` or variable
    pub target: Option<RawField>,
    /// Spawn offset in the emitter's local frame (x is forward)
    pub position_spawning: Option<RawField>,
    /// Speed (or angular speed for orbits) at spawn
    pub particle_velocity_start: Option<RawField>,
    /// Speed at the end of the lifetime
    pub particle_velocity_end: Option<RawField>,
    /// Travel (or orbit) angle at spawn, in degrees
    pub particle_angle_start: Option<RawField>,
    /// Travel angle at the end of the lifetime, in degrees
    pub particle_angle_end: Option<RawField>,
    /// Orbit radius at spawn
    pub particle_radius_start: Option<RawField>,
    /// Orbit radius at the end of the lifetime
    pub particle_radius_end: Option<RawField>,
    /// Width and height at spawn
    pub particle_size_start: Option<RawField>,
    /// Width and height at the end of the lifetime
    pub particle_size_end: Option<RawField>,
    /// Sprite rotation at spawn, in degrees
    pub particle_rotation_start: Option<RawField>,
    /// Sprite rotation at the end of the lifetime, in degrees
    pub particle_rotation_end: Option<RawField>,
    /// Lifetime in milliseconds
    pub particle_lifetime: Option<RawField>,
    /// RGB color at spawn, 0-255 per channel
    pub particle_color_start: Option<RawField>,
    /// RGB color at the end of the lifetime
    pub particle_color_end: Option<RawField>,
    /// Opacity at spawn
    pub alpha_start: Option<RawField>,
    /// Opacity at the end of the lifetime
    pub alpha_end: Option<RawField>,
    /// Vibration amplitude at spawn
    pub vibration_amplitude_start: Option<RawField>,
    /// Vibration amplitude at the end of the lifetime
    pub vibration_amplitude_end: Option<RawField>,
    /// Vibration frequency at spawn
    pub vibration_frequency_start: Option<RawField>,
    /// Vibration frequency at the end of the lifetime
    pub vibration_frequency_end: Option<RawField>,
    /// Orbit the emitter's anchor instead of the live source
    pub only_emitter_follow: bool,
    /// Radius of the synthetic area shape
    pub radius: Option<f64>,
    /// Shape kind passed to the measured prefill service
    #[serde(rename = "type")]
    pub shape_type: Option<String>,
    /// Texture override, `"none"` keeps the default texture
    pub texture: Option<String>,
    /// Advanced variables
    pub advanced: Option<AdvancedConfig>,
    /// Trail emitted behind a missile
    pub sub_particle_template: Option<Box<SubTemplateConfig>>,
}

/// Nested template definition for a missile trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTemplateConfig {
    /// Kinematic model of the trail
    pub kind: TemplateKind,
    /// Trail definition
    #[serde(flatten)]
    pub config: TemplateConfig,
}
