use std::fmt;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, FuzzyResult};
use crate::fuzzy_set::FuzzySet;
use crate::terms::{Key, Term, Terms};

/// A crisp value belongs to a term when its membership exceeds this.
pub const MEMBERSHIP_THRESHOLD: f64 = 1e-5;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable whose terms are the `I` enum.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        Variable(self.0, PhantomData)
    }
}

impl<I> Copy for Variable<I> {}

impl<I> fmt::Debug for Variable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

/// Arena of the linguistic variables of one knowledge base.
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T: Term> Default for Variables<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Term> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// Registers a variable over `universe_range` with the given term tables.
    ///
    /// Every table must form a valid [`FuzzySet`] lying inside the universe.
    pub fn add<I: Into<T> + Key>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<'_, I>,
    ) -> FuzzyResult<Variable<I>> {
        let start_term_coords = terms.0.iter().map(|(k, v)| (k.into(), *v));
        let variable = LinguisticVariable::new(name.into(), universe_range, start_term_coords)?;
        let key = self.0.insert(variable);

        Ok(Variable(key, PhantomData))
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.0.get(var.0)
    }

    pub(crate) fn by_key(&self, key: VariableKey) -> FuzzyResult<&LinguisticVariable<T>> {
        self.0.get(key).ok_or(FuzzyError::UnknownVariable)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One physical quantity's vocabulary: term name to membership function.
#[derive(Debug)]
pub struct LinguisticVariable<T> {
    name: String,
    min_u: f64,
    max_u: f64,
    terms: IndexMap<T, FuzzySet>,
}

impl<T: Term> LinguisticVariable<T> {
    fn new<'t>(
        name: String,
        universe_range: RangeInclusive<f64>,
        start_term_coords: impl IntoIterator<Item = (T, &'t [(f64, f64)])>,
    ) -> FuzzyResult<Self> {
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();
        let mut terms = IndexMap::new();

        for (term, membership) in start_term_coords {
            let set = FuzzySet::new(membership.iter().copied()).map_err(|e| match e {
                FuzzyError::InvalidFuzzySet { reason } => {
                    FuzzyError::invalid_set(format!("{name} is {term}: {reason}"))
                }
                other => other,
            })?;
            let (start, end) = set.support();

            if start < min_u || end > max_u {
                return Err(FuzzyError::invalid_set(format!(
                    "{name} is {term}: breakpoints span [{start}, {end}] outside the universe [{min_u}, {max_u}]"
                )));
            }

            terms.insert(term, set);
        }

        Ok(Self {
            name,
            min_u,
            max_u,
            terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    /// Terms in the order their tables were declared.
    pub fn terms(&self) -> impl Iterator<Item = (T, &FuzzySet)> + '_ {
        self.terms.iter().map(|(term, set)| (*term, set))
    }

    pub fn term_set(&self, term: &T) -> FuzzyResult<&FuzzySet> {
        self.terms.get(term).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: term.to_string(),
        })
    }

    /// Membership degree of `x` in `term`. An unknown term is an error.
    pub fn membership(&self, x: f64, term: &T) -> FuzzyResult<f64> {
        Ok(self.term_set(term)?.get(x))
    }

    /// Whether `x` belongs to `term` at all. An unknown term reads as not a member.
    pub fn is_member(&self, x: f64, term: &T) -> bool {
        self.terms
            .get(term)
            .map_or(false, |set| set.get(x) > MEMBERSHIP_THRESHOLD)
    }
}
