//! Three-component vector used for positions, sizes and colors

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector with `f64` components
///
/// Positions and sizes only use `x` and `y`; colors use all three channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    #[serde(default)]
    pub z: f64,
}

/// Accepted inputs for [`Vector3::build`]
#[derive(Debug, Clone, Copy)]
pub enum VectorSource<'a> {
    /// A bare number (never a valid vector)
    Scalar(f64),
    /// A 2 or 3 element sequence
    Sequence(&'a [f64]),
    /// An already built vector
    Vector(Vector3),
}

impl Vector3 {
    /// The zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Normalize a vector-like source
    ///
    /// A 2-sequence becomes `(x, y, 0)`, a 3-sequence `(x, y, z)` and a vector
    /// passes through. Scalars and sequences of any other length return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_template::Vector3;
    ///
    /// assert_eq!(Vector3::build(&[4.0, 2.0][..]), Some(Vector3::new(4.0, 2.0, 0.0)));
    /// assert_eq!(Vector3::build(7.0), None);
    /// ```
    pub fn build<'a>(source: impl Into<VectorSource<'a>>) -> Option<Self> {
        match source.into() {
            VectorSource::Scalar(_) => None,
            VectorSource::Sequence(&[x, y]) => Some(Self::new(x, y, 0.0)),
            VectorSource::Sequence(&[x, y, z]) => Some(Self::new(x, y, z)),
            VectorSource::Sequence(_) => None,
            VectorSource::Vector(v) => Some(v),
        }
    }

    /// Rotate around the Z axis by `angle` radians (counter-clockwise)
    pub fn rotate_z(&self, angle: f64) -> Self {
        let rotated = DVec2::from_angle(angle).rotate(self.truncate());
        Self::new(rotated.x, rotated.y, self.z)
    }

    /// Planar distance to another point, ignoring Z
    pub fn distance_2d(&self, other: &Self) -> f64 {
        self.truncate().distance(other.truncate())
    }

    /// Planar bearing from `self` towards `other`, in radians
    pub fn bearing_to(&self, other: &Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Whether both points share the same X and Y coordinates
    pub fn same_xy(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Drop the Z component
    pub fn truncate(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<f64> for VectorSource<'_> {
    fn from(value: f64) -> Self {
        VectorSource::Scalar(value)
    }
}

impl<'a> From<&'a [f64]> for VectorSource<'a> {
    fn from(value: &'a [f64]) -> Self {
        VectorSource::Sequence(value)
    }
}

impl From<Vector3> for VectorSource<'_> {
    fn from(value: Vector3) -> Self {
        VectorSource::Vector(value)
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        (DVec3::from(self) + DVec3::from(rhs)).into()
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        (DVec3::from(self) - DVec3::from(rhs)).into()
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        (DVec3::from(self) * rhs).into()
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        (-DVec3::from(self)).into()
    }
}
