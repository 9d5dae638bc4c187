//! Random sampling of classified template fields

use crate::error::{Result, TemplateError};
use crate::field::{Field, FieldKind, FieldSpec};
use crate::input::{Keyframe, ParticleInput, Value};
use crate::variables::Environment;
use crate::vector::Vector3;
use rand::distr::{Distribution, Uniform};
use rand::{Rng, RngCore};

/// A field set that can be sampled in one pass
///
/// Implementors draw every declared field exactly once and return a parallel
/// record of resolved values.
pub trait SampleObject {
    /// Record of resolved values
    type Output;

    /// Sample every field of `self`
    fn sample_object(&self, sampler: &mut Sampler<'_>) -> Result<Self::Output>;
}

/// Draws concrete values from template fields
///
/// A sampler borrows the environment of the current generation call and the
/// caller's random number generator.
pub struct Sampler<'a> {
    env: &'a Environment,
    rng: &'a mut dyn RngCore,
}

impl<'a> Sampler<'a> {
    /// Create a sampler over an evaluated environment
    pub fn new(env: &'a Environment, rng: &'a mut dyn RngCore) -> Self {
        Self { env, rng }
    }

    /// The environment variables are resolved against
    pub fn env(&self) -> &Environment {
        self.env
    }

    /// Resolve a field into one concrete value
    ///
    /// Literals return themselves, ranges draw uniformly (bounds inclusive),
    /// choices pick one alternative uniformly and sample it, and variable
    /// references read the environment. The value's shape is not checked.
    pub fn random_value(&mut self, field: &Field) -> Result<Value> {
        self.sample_spec(field.name, &field.spec)
    }

    /// Resolve a field and wrap it in a [`ParticleInput`]
    pub fn random_input(&mut self, field: &Field) -> Result<ParticleInput<Value>> {
        self.random_value(field).map(ParticleInput::new)
    }

    /// Sample a scalar field
    pub fn scalar(&mut self, field: &Field) -> Result<f64> {
        self.random_value(field)?
            .as_scalar()
            .ok_or(TemplateError::TypeMismatch {
                field: field.name,
                expected: FieldKind::Scalar.name(),
            })
    }

    /// Sample a vector field
    pub fn vector(&mut self, field: &Field) -> Result<Vector3> {
        self.random_value(field)?
            .as_vector()
            .ok_or(TemplateError::TypeMismatch {
                field: field.name,
                expected: FieldKind::Vector.name(),
            })
    }

    /// Sample an optional scalar field
    pub fn optional_scalar(&mut self, field: Option<&Field>) -> Result<Option<f64>> {
        field.map(|field| self.scalar(field)).transpose()
    }

    /// Sample an optional vector field
    pub fn optional_vector(&mut self, field: Option<&Field>) -> Result<Option<Vector3>> {
        field.map(|field| self.vector(field)).transpose()
    }

    /// Sample a scalar start/end pair with independent draws
    pub fn scalar_keyframe(&mut self, start: &Field, end: Option<&Field>) -> Result<Keyframe<f64>> {
        let start = self.scalar(start)?;
        let end = self.optional_scalar(end)?;
        Ok(Keyframe::new(start, end))
    }

    /// Sample a vector start/end pair with independent draws
    pub fn vector_keyframe(
        &mut self,
        start: &Field,
        end: Option<&Field>,
    ) -> Result<Keyframe<Vector3>> {
        let start = self.vector(start)?;
        let end = self.optional_vector(end)?;
        Ok(Keyframe::new(start, end))
    }

    /// Sample every field of a template in one pass
    pub fn object<T: SampleObject + ?Sized>(&mut self, template: &T) -> Result<T::Output> {
        template.sample_object(self)
    }

    /// Uniform draw in `[min, max]` for the field `name`
    pub fn uniform(&mut self, name: &'static str, min: f64, max: f64) -> Result<f64> {
        if max <= min {
            return Ok(min);
        }
        let range = Uniform::new_inclusive(min, max)
            .map_err(|e| TemplateError::invalid(name, format!("range [{min}, {max}]: {e}")))?;
        Ok(range.sample(&mut *self.rng))
    }

    /// Uniform index in `0..len`, `len` must be non-zero
    pub fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn sample_spec(&mut self, name: &'static str, spec: &FieldSpec) -> Result<Value> {
        match spec {
            FieldSpec::Literal(value) => Ok(*value),
            FieldSpec::Range { min, max } => Ok(Value::Scalar(self.uniform(name, *min, *max)?)),
            FieldSpec::Choices(choices) => {
                let index = self.pick(choices.len());
                self.sample_spec(name, &choices[index])
            }
            FieldSpec::Components(components) => {
                let mut xyz = [0.0; 3];
                for (slot, component) in xyz.iter_mut().zip(components.iter()) {
                    *slot = self
                        .sample_spec(name, component)?
                        .as_scalar()
                        .ok_or(TemplateError::TypeMismatch {
                            field: name,
                            expected: FieldKind::Scalar.name(),
                        })?;
                }
                Ok(Value::Vector(Vector3::new(xyz[0], xyz[1], xyz[2])))
            }
            FieldSpec::Variable(variable) => {
                self.env
                    .get(variable)
                    .ok_or_else(|| TemplateError::UnresolvedVariable {
                        field: name,
                        name: variable.clone(),
                    })
            }
        }
    }
}
