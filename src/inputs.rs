use std::collections::HashMap;

use crate::error::{FuzzyError, FuzzyResult};
use crate::terms::Term;
use crate::variable::{LinguisticVariable, Variable, VariableKey};

/// Crisp facts for one inference run.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.0.get(&var.0).copied()
    }

    pub(crate) fn value<T: Term>(&self, key: VariableKey, var: &LinguisticVariable<T>) -> FuzzyResult<f64> {
        self.0.get(&key).copied().ok_or_else(|| FuzzyError::MissingInput {
            variable: var.name().to_string(),
        })
    }
}
