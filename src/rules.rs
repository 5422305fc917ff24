use crate::dsl::Expr;
use crate::error::{FuzzyError, FuzzyResult};
use crate::terms::Term;
use crate::variable::{VariableKey, Variables};

/// Ordered knowledge base. Rules are numbered from 1 in logs and errors.
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// The consequence must be a single `is` proposition on the decision
    /// variable; [`Rules::validate`] rejects anything else.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.0.push(Rule {
            premise,
            consequence,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> + '_ {
        self.0.iter()
    }
}

impl<T: Term> Rules<T> {
    /// Checks every rule against `vars`: each referenced term must exist on its
    /// variable, and each consequence must name exactly one term.
    pub fn validate(&self, vars: &Variables<T>) -> FuzzyResult<()> {
        for (i, rule) in self.0.iter().enumerate() {
            for (var_key, term) in rule.premise.propositions() {
                vars.by_key(*var_key)?.term_set(term)?;
            }

            let (var_key, term) = rule.consequent().ok_or(FuzzyError::InvalidConsequent { rule: i + 1 })?;

            vars.by_key(var_key)?.term_set(term)?;
        }

        Ok(())
    }
}

pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    /// Decision variable and term of the consequence, when it is a single
    /// `is` proposition.
    pub fn consequent(&self) -> Option<(VariableKey, &T)> {
        match &self.consequence {
            Expr::Is(var_key, term) => Some((*var_key, term)),
            _ => None,
        }
    }
}
