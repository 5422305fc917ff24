use std::collections::HashMap;

use crate::error::FuzzyResult;
use crate::variable::{Variable, VariableKey};

/// Defuzzified result per decision variable.
///
/// A variable no rule fired for is absent. A variable whose aggregated
/// membership came out zero everywhere holds the error instead of a value.
#[derive(Clone, Debug, Default)]
pub struct Outputs {
    defuzzificated_inferred_memberships: HashMap<VariableKey, FuzzyResult<f64>>,
}

impl Outputs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, var_key: VariableKey, inferred: FuzzyResult<f64>) {
        self.defuzzificated_inferred_memberships.insert(var_key, inferred);
    }

    pub fn get_inferred_membership<I>(&self, var: Variable<I>) -> FuzzyResult<Option<f64>> {
        self.defuzzificated_inferred_memberships
            .get(&var.0)
            .cloned()
            .transpose()
    }

    pub(crate) fn by_key(&self, var_key: VariableKey) -> Option<&FuzzyResult<f64>> {
        self.defuzzificated_inferred_memberships.get(&var_key)
    }

    pub fn contains<I>(&self, var: Variable<I>) -> bool {
        self.defuzzificated_inferred_memberships.contains_key(&var.0)
    }

    pub fn len(&self) -> usize {
        self.defuzzificated_inferred_memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defuzzificated_inferred_memberships.is_empty()
    }
}
