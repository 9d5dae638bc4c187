//! Resolved particle values and start/end keyframes

use crate::vector::Vector3;
use std::ops::Add;

/// A sampled value, either a number or a vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A single number
    Scalar(f64),
    /// A vector (position, size or color)
    Vector(Vector3),
}

impl Value {
    /// Get the value as a number, if it is one
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Vector(_) => None,
        }
    }

    /// Get the value as a vector, if it is one
    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            Value::Scalar(_) => None,
            Value::Vector(v) => Some(*v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vector3> for Value {
    fn from(v: Vector3) -> Self {
        Value::Vector(v)
    }
}

/// A resolved, composable particle value
///
/// Once sampled the wrapped value never changes. [`ParticleInput::add`]
/// returns a new input, so heading corrections can be layered on without
/// drawing new random numbers.
///
/// # Examples
///
/// ```
/// use particle_template::ParticleInput;
///
/// let base = ParticleInput::new(5.0);
/// let shifted = base.add(3.0);
/// assert_eq!(shifted.value(), 8.0);
/// assert_eq!(base.value(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleInput<T> {
    value: T,
}

impl<T: Copy> ParticleInput<T> {
    /// Wrap an already resolved value
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Get the resolved value
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Copy + Add<Output = T>> ParticleInput<T> {
    /// Create a new input offset by `delta`
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn add(&self, delta: T) -> Self {
        Self::new(self.value + delta)
    }
}

/// A start/end pair interpolated over a particle's lifetime
///
/// A missing end means the value holds at `start` for the whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    /// Value at spawn
    pub start: ParticleInput<T>,
    /// Value at the end of the lifetime
    pub end: Option<ParticleInput<T>>,
}

impl<T: Copy> Keyframe<T> {
    /// Create a keyframe from sampled start and end values
    pub fn new(start: T, end: Option<T>) -> Self {
        Self {
            start: ParticleInput::new(start),
            end: end.map(ParticleInput::new),
        }
    }

    /// A keyframe whose start and end are the same value
    pub fn fixed(value: T) -> Self {
        Self {
            start: ParticleInput::new(value),
            end: Some(ParticleInput::new(value)),
        }
    }

    /// The end value, falling back to the start value
    pub fn end_or_start(&self) -> T {
        self.end.unwrap_or(self.start).value()
    }
}

impl<T: Copy + Add<Output = T>> Keyframe<T> {
    /// Shift both ends by `delta`
    #[must_use]
    pub fn offset(&self, delta: T) -> Self {
        Self {
            start: self.start.add(delta),
            end: self.end.map(|end| end.add(delta)),
        }
    }
}
