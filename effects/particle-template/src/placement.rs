//! Source and target placement fields
//!
//! A placement names where a particle comes from or goes to. It can be a
//! literal position, a placeable id resolved through the host, a variable
//! holding a position, or a list of alternatives. Ids are resolved once when
//! the template is built; the live position of a resolved placeable is read
//! on every generation call.

use crate::error::{Result, TemplateError};
use crate::field::{Field, RawField, parse_numeric_text};
use crate::host::{Anchor, Host, PlaceableRef, ShapeDescriptor};
use crate::input::Value;
use crate::particle::GeneratedParticle;
use crate::sampler::Sampler;
use log::warn;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Whether a string should be resolved as a placeable id
///
/// Numeric strings and strings containing `_` are never ids. The underscore
/// lets authors pass values that would otherwise look like ids.
///
/// # Examples
///
/// ```
/// use particle_template::is_placeable_id;
///
/// assert!(is_placeable_id("tokenA"));
/// assert!(!is_placeable_id("token_a"));
/// assert!(!is_placeable_id("42"));
/// ```
pub fn is_placeable_id(text: &str) -> bool {
    !text.trim().is_empty() && parse_numeric_text(text).is_none() && !text.contains('_')
}

/// A sampled placement
#[derive(Debug, Clone)]
pub enum Location {
    /// A fixed point
    Point(Anchor),
    /// A placeable whose position is read from the host
    Placeable(PlaceableRef),
    /// Another particle, followed while it is alive
    Particle(Weak<RefCell<GeneratedParticle>>),
}

impl Location {
    /// Current anchor, `None` once the placeable or particle is gone
    pub fn anchor(&self, host: &dyn Host) -> Option<Anchor> {
        match self {
            Location::Point(anchor) => Some(*anchor),
            Location::Placeable(placeable) => host.anchor_position(placeable),
            Location::Particle(particle) => particle.upgrade().map(|particle| {
                let position = particle.borrow().position();
                Anchor::new(position.x, position.y, 0.0)
            }),
        }
    }

    /// Region shape, when the location is a measured template
    pub fn shape(&self) -> Option<&ShapeDescriptor> {
        match self {
            Location::Placeable(placeable) => placeable.shape.as_ref(),
            Location::Point(_) | Location::Particle(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
enum PlacementSpec {
    Point { x: Field, y: Field, facing: Field },
    Placeable(PlaceableRef),
    Unresolved,
    Variable(String),
    Choices(Vec<PlacementSpec>),
    Follow(Weak<RefCell<GeneratedParticle>>),
}

/// A classified source or target field
#[derive(Debug, Clone)]
pub struct Placement {
    name: &'static str,
    spec: PlacementSpec,
}

impl Placement {
    /// Classify a placement and resolve placeable ids through `host`
    pub fn build(name: &'static str, raw: &RawField, host: &dyn Host) -> Result<Self> {
        Ok(Self {
            name,
            spec: classify(name, raw, host)?,
        })
    }

    /// Classify an optional placement
    pub fn optional(
        name: &'static str,
        raw: Option<&RawField>,
        host: &dyn Host,
    ) -> Result<Option<Self>> {
        raw.map(|raw| Self::build(name, raw, host)).transpose()
    }

    /// Follow another particle's live position
    pub fn follow(name: &'static str, particle: &Rc<RefCell<GeneratedParticle>>) -> Self {
        Self {
            name,
            spec: PlacementSpec::Follow(Rc::downgrade(particle)),
        }
    }

    /// Configuration name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Draw one location, `None` when an id failed to resolve at build time
    pub fn sample(&self, sampler: &mut Sampler<'_>) -> Result<Option<Location>> {
        sample_spec(self.name, &self.spec, sampler)
    }
}

fn classify(name: &'static str, raw: &RawField, host: &dyn Host) -> Result<PlacementSpec> {
    match raw {
        RawField::Number(_) => Err(TemplateError::invalid(
            name,
            "a bare number is not a position, use {x, y}",
        )),
        RawField::Text(text) if is_placeable_id(text) => match host.resolve_placeable(text) {
            Some(placeable) => Ok(PlacementSpec::Placeable(placeable)),
            None => {
                warn!("Placeable '{}' for field '{}' not found", text, name);
                Ok(PlacementSpec::Unresolved)
            }
        },
        RawField::Text(text) => {
            if text.trim().is_empty() || parse_numeric_text(text).is_some() {
                return Err(TemplateError::invalid(
                    name,
                    format!("'{}' is not a position or variable name", text),
                ));
            }
            Ok(PlacementSpec::Variable(text.clone()))
        }
        RawField::List(items) => {
            if items.is_empty() {
                return Err(TemplateError::invalid(name, "empty list"));
            }
            if let Some(numbers) = items
                .iter()
                .map(|item| match item {
                    RawField::Number(n) => Some(*n),
                    _ => None,
                })
                .collect::<Option<Vec<f64>>>()
            {
                return match numbers.as_slice() {
                    [x, y] => Ok(point(name, *x, *y, 0.0)),
                    [x, y, facing] => Ok(point(name, *x, *y, *facing)),
                    _ => Err(TemplateError::invalid(
                        name,
                        format!("expected [x, y] or [x, y, r], got {} numbers", numbers.len()),
                    )),
                };
            }
            if items.iter().any(|item| matches!(item, RawField::Number(_))) {
                return Err(TemplateError::invalid(name, "list mixes numbers and positions"));
            }
            items
                .iter()
                .map(|item| classify(name, item, host))
                .collect::<Result<Vec<_>>>()
                .map(PlacementSpec::Choices)
        }
        RawField::Point(raw_point) => {
            let facing = match &raw_point.r {
                Some(r) => Field::scalar(name, r)?,
                None => Field::fixed_scalar(name, 0.0),
            };
            Ok(PlacementSpec::Point {
                x: Field::scalar(name, &raw_point.x)?,
                y: Field::scalar(name, &raw_point.y)?,
                facing,
            })
        }
    }
}

fn point(name: &'static str, x: f64, y: f64, facing: f64) -> PlacementSpec {
    PlacementSpec::Point {
        x: Field::fixed_scalar(name, x),
        y: Field::fixed_scalar(name, y),
        facing: Field::fixed_scalar(name, facing),
    }
}

fn sample_spec(
    name: &'static str,
    spec: &PlacementSpec,
    sampler: &mut Sampler<'_>,
) -> Result<Option<Location>> {
    match spec {
        PlacementSpec::Point { x, y, facing } => {
            let anchor = Anchor::new(
                sampler.scalar(x)?,
                sampler.scalar(y)?,
                sampler.scalar(facing)?,
            );
            Ok(Some(Location::Point(anchor)))
        }
        PlacementSpec::Placeable(placeable) => Ok(Some(Location::Placeable(placeable.clone()))),
        PlacementSpec::Unresolved => Ok(None),
        PlacementSpec::Variable(variable) => match sampler.env().get(variable) {
            Some(Value::Vector(v)) => Ok(Some(Location::Point(Anchor::new(v.x, v.y, 0.0)))),
            Some(Value::Scalar(_)) => Err(TemplateError::TypeMismatch {
                field: name,
                expected: "position",
            }),
            None => Err(TemplateError::UnresolvedVariable {
                field: name,
                name: variable.clone(),
            }),
        },
        PlacementSpec::Choices(choices) => {
            let index = sampler.pick(choices.len());
            sample_spec(name, &choices[index], sampler)
        }
        PlacementSpec::Follow(particle) => Ok(Some(Location::Particle(particle.clone()))),
    }
}
