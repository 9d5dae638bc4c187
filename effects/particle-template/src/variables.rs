//! Advanced variables block and the environment it evaluates to
//!
//! Templates may declare named variables that are evaluated once per
//! generation call. Any template field can then reference a variable by name,
//! so several fields of the same particle share one random draw.

use crate::error::Result;
use crate::field::{Field, RawField};
use crate::input::Value;
use crate::sampler::Sampler;
use log::trace;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One named variable in the advanced block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Name referenced from template fields
    pub name: String,
    /// Field evaluated to produce the variable's value
    pub value: RawField,
}

/// The `advanced` section of a template definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedConfig {
    /// Variables evaluated before every generation call
    #[serde(default)]
    pub variables: Vec<VariableDefinition>,
}

/// Evaluated variables for a single generation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    /// An environment with no variables
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Set a variable, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variables are defined
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluate variable definitions in declaration order
///
/// Each definition is sampled against the variables evaluated before it, so a
/// later variable may reference an earlier one. Three-number lists and
/// `{x, y}` objects evaluate to vectors; every other shape follows the scalar
/// rules, so `[min, max]` is a range.
pub fn evaluate_variables(
    definitions: &[VariableDefinition],
    rng: &mut dyn RngCore,
) -> Result<Environment> {
    let mut env = Environment::new();
    for definition in definitions {
        let field = variable_field(&definition.value)?;
        let value = Sampler::new(&env, &mut *rng).random_value(&field)?;
        trace!("Variable '{}' evaluated to {:?}", definition.name, value);
        env.insert(definition.name.clone(), value);
    }
    Ok(env)
}

fn variable_field(raw: &RawField) -> Result<Field> {
    const NAME: &str = "advanced.variables";
    match raw {
        RawField::Point(_) => Field::vector(NAME, raw),
        RawField::List(items)
            if items.len() == 3 && items.iter().all(|i| matches!(i, RawField::Number(_))) =>
        {
            Field::vector(NAME, raw)
        }
        _ => Field::scalar(NAME, raw),
    }
}
