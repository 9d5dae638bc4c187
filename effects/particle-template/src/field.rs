//! Template field shapes and their build-time classification
//!
//! Configuration fields arrive as loosely typed [`RawField`] values (numbers,
//! strings, lists or `{x, y}` objects). Each field is classified once, when
//! the template is built, into a [`FieldSpec`] that the sampler can draw from
//! without inspecting shapes again.
//!
//! | Raw shape | Scalar field | Vector field |
//! |-----------|--------------|--------------|
//! | `12` | literal | rejected |
//! | `"12"` | literal | rejected |
//! | `"speed"` | variable reference | variable reference |
//! | `[1, 5]` | uniform range | literal `(1, 5, 0)` |
//! | `[1, 5, 9]` | choice | literal `(1, 5, 9)` |
//! | `[[1, 2], [3, 4]]` | choice of ranges | choice of vectors |
//! | `{"x": [1, 2], "y": 3}` | rejected | per-component fields |

use crate::error::{Result, TemplateError};
use crate::input::Value;
use crate::vector::Vector3;
use serde::{Deserialize, Serialize};

/// A configuration field exactly as it appears in a template definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// A number
    Number(f64),
    /// A string: numeric text, a variable name or a placeable id
    Text(String),
    /// A range, a vector or a list of alternatives
    List(Vec<RawField>),
    /// An `{x, y, z?, r?}` object
    Point(RawPoint),
}

/// Object form of a vector or position field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// X component
    pub x: Box<RawField>,
    /// Y component
    pub y: Box<RawField>,
    /// Z component (defaults to 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Box<RawField>>,
    /// Facing in degrees, only meaningful for placement fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<Box<RawField>>,
}

impl RawField {
    /// A `[min, max]` range
    pub fn range(min: f64, max: f64) -> Self {
        RawField::List(vec![RawField::Number(min), RawField::Number(max)])
    }

    /// A list of alternatives
    pub fn choices(items: impl IntoIterator<Item = RawField>) -> Self {
        RawField::List(items.into_iter().collect())
    }

    /// An `{x, y}` point
    pub fn point(x: f64, y: f64) -> Self {
        RawField::Point(RawPoint {
            x: Box::new(RawField::Number(x)),
            y: Box::new(RawField::Number(y)),
            z: None,
            r: None,
        })
    }

    /// An `{x, y, r}` position with a facing in degrees
    pub fn facing_point(x: f64, y: f64, facing: f64) -> Self {
        RawField::Point(RawPoint {
            x: Box::new(RawField::Number(x)),
            y: Box::new(RawField::Number(y)),
            z: None,
            r: Some(Box::new(RawField::Number(facing))),
        })
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn is_vector_shaped(&self) -> bool {
        matches!(self, RawField::List(_) | RawField::Point(_))
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<[f64; 2]> for RawField {
    fn from(value: [f64; 2]) -> Self {
        RawField::List(value.iter().copied().map(RawField::Number).collect())
    }
}

impl From<[f64; 3]> for RawField {
    fn from(value: [f64; 3]) -> Self {
        RawField::List(value.iter().copied().map(RawField::Number).collect())
    }
}

/// Parse text the way a host scripting layer would treat a numeric string
pub(crate) fn parse_numeric_text(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Expected shape of a field's sampled value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single number
    Scalar,
    /// A vector
    Vector,
}

impl FieldKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Vector => "vector",
        }
    }
}

/// A classified template field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// A fixed value
    Literal(Value),
    /// Uniform draw in `[min, max]`
    Range {
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },
    /// Uniform pick among alternatives, each sampled in turn
    Choices(Vec<FieldSpec>),
    /// A vector whose components are sampled independently
    Components(Box<[FieldSpec; 3]>),
    /// A reference into the evaluated variable environment
    Variable(String),
}

impl FieldSpec {
    /// Whether sampling this spec never draws random numbers
    pub fn is_literal(&self) -> bool {
        matches!(self, FieldSpec::Literal(_))
    }
}

/// A named, classified template field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Configuration name, used in error messages
    pub name: &'static str,
    /// Shape the sampled value must have
    pub kind: FieldKind,
    /// Classified field
    pub spec: FieldSpec,
}

impl Field {
    /// Classify a scalar field
    pub fn scalar(name: &'static str, raw: &RawField) -> Result<Self> {
        Ok(Self {
            name,
            kind: FieldKind::Scalar,
            spec: classify_scalar(name, raw)?,
        })
    }

    /// Classify a vector field
    pub fn vector(name: &'static str, raw: &RawField) -> Result<Self> {
        Ok(Self {
            name,
            kind: FieldKind::Vector,
            spec: classify_vector(name, raw)?,
        })
    }

    /// A scalar field with a fixed value
    pub fn fixed_scalar(name: &'static str, value: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
            spec: FieldSpec::Literal(Value::Scalar(value)),
        }
    }

    /// A vector field with a fixed value
    pub fn fixed_vector(name: &'static str, value: Vector3) -> Self {
        Self {
            name,
            kind: FieldKind::Vector,
            spec: FieldSpec::Literal(Value::Vector(value)),
        }
    }

    /// Classify an optional scalar field
    pub fn optional_scalar(name: &'static str, raw: Option<&RawField>) -> Result<Option<Self>> {
        raw.map(|raw| Self::scalar(name, raw)).transpose()
    }

    /// Classify an optional vector field
    pub fn optional_vector(name: &'static str, raw: Option<&RawField>) -> Result<Option<Self>> {
        raw.map(|raw| Self::vector(name, raw)).transpose()
    }

    /// Classify a scalar field, falling back to a fixed default
    pub fn scalar_or(name: &'static str, raw: Option<&RawField>, default: f64) -> Result<Self> {
        match raw {
            Some(raw) => Self::scalar(name, raw),
            None => Ok(Self::fixed_scalar(name, default)),
        }
    }

    /// Classify a vector field, falling back to a fixed default
    pub fn vector_or(name: &'static str, raw: Option<&RawField>, default: Vector3) -> Result<Self> {
        match raw {
            Some(raw) => Self::vector(name, raw),
            None => Ok(Self::fixed_vector(name, default)),
        }
    }
}

fn classify_scalar(name: &'static str, raw: &RawField) -> Result<FieldSpec> {
    match raw {
        RawField::Number(n) => Ok(FieldSpec::Literal(Value::Scalar(*n))),
        RawField::Text(text) => classify_text(name, text, FieldKind::Scalar),
        RawField::List(items) => {
            if let [RawField::Number(a), RawField::Number(b)] = items.as_slice() {
                let (min, max) = (a.min(*b), a.max(*b));
                if !(max - min).is_finite() {
                    return Err(TemplateError::invalid(
                        name,
                        format!("range [{min}, {max}] is too wide to sample"),
                    ));
                }
                return Ok(FieldSpec::Range { min, max });
            }
            if items.is_empty() {
                return Err(TemplateError::invalid(name, "empty list of alternatives"));
            }
            let choices = items
                .iter()
                .map(|item| classify_scalar(name, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(FieldSpec::Choices(choices))
        }
        RawField::Point(_) => Err(TemplateError::invalid(
            name,
            "an {x, y} object cannot be used where a number is expected",
        )),
    }
}

fn classify_vector(name: &'static str, raw: &RawField) -> Result<FieldSpec> {
    match raw {
        RawField::Number(_) => Err(TemplateError::invalid(
            name,
            "a bare number is not a vector, use [x, y] or {x, y}",
        )),
        RawField::Text(text) => classify_text(name, text, FieldKind::Vector),
        RawField::List(items) => {
            if items.is_empty() {
                return Err(TemplateError::invalid(name, "empty list"));
            }
            let numbers: Option<Vec<f64>> = items.iter().map(RawField::as_number).collect();
            if let Some(numbers) = numbers {
                return Vector3::build(numbers.as_slice())
                    .map(|v| FieldSpec::Literal(Value::Vector(v)))
                    .ok_or_else(|| {
                        TemplateError::invalid(
                            name,
                            format!("expected 2 or 3 components, got {}", numbers.len()),
                        )
                    });
            }
            if items.iter().all(RawField::is_vector_shaped) {
                let choices = items
                    .iter()
                    .map(|item| classify_vector(name, item))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(FieldSpec::Choices(choices));
            }
            Err(TemplateError::invalid(
                name,
                "list mixes numbers and vectors, use {x, y} for per-component ranges",
            ))
        }
        RawField::Point(point) => {
            let z = match &point.z {
                Some(z) => classify_scalar(name, z)?,
                None => FieldSpec::Literal(Value::Scalar(0.0)),
            };
            let components = [
                classify_scalar(name, &point.x)?,
                classify_scalar(name, &point.y)?,
                z,
            ];
            Ok(collapse_components(components))
        }
    }
}

fn classify_text(name: &'static str, text: &str, kind: FieldKind) -> Result<FieldSpec> {
    if text.trim().is_empty() {
        return Err(TemplateError::invalid(name, "empty string"));
    }
    match (parse_numeric_text(text), kind) {
        (Some(n), FieldKind::Scalar) => Ok(FieldSpec::Literal(Value::Scalar(n))),
        (Some(_), FieldKind::Vector) => Err(TemplateError::invalid(
            name,
            "a numeric string is not a vector",
        )),
        (None, _) => Ok(FieldSpec::Variable(text.to_string())),
    }
}

fn collapse_components(components: [FieldSpec; 3]) -> FieldSpec {
    match &components {
        [
            FieldSpec::Literal(Value::Scalar(x)),
            FieldSpec::Literal(Value::Scalar(y)),
            FieldSpec::Literal(Value::Scalar(z)),
        ] => FieldSpec::Literal(Value::Vector(Vector3::new(*x, *y, *z))),
        _ => FieldSpec::Components(Box::new(components)),
    }
}
