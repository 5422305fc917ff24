use indexmap::IndexMap;
use tracing::{debug, debug_span, trace, warn};

use crate::error::{FuzzyError, FuzzyResult};
use crate::fuzzy_set::{FuzzySet, MIN_SAMPLE_STEP, SAMPLE_STEP};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::Term;
use crate::variable::{Variable, VariableKey, Variables};

/// Record of one rule that fired during a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Firing {
    /// Rule number, counted from 1
    pub rule: usize,
    pub variable: VariableKey,
    pub strength: f64,
}

/// Scaled consequents of every fired rule, grouped by decision variable in
/// the order the variables first received one.
#[derive(Clone, Debug, Default)]
pub struct PreResults {
    scaled: IndexMap<VariableKey, Vec<FuzzySet>>,
    firings: Vec<Firing>,
}

impl PreResults {
    pub(crate) fn push(&mut self, firing: Firing, scaled: FuzzySet) {
        self.scaled.entry(firing.variable).or_default().push(scaled);
        self.firings.push(firing);
    }

    /// Scaled consequents for `var`; empty when no rule concluded on it.
    pub fn get<I>(&self, var: Variable<I>) -> &[FuzzySet] {
        self.scaled.get(&var.0).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn firings(&self) -> &[Firing] {
        &self.firings
    }

    pub fn len(&self) -> usize {
        self.scaled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scaled.is_empty()
    }
}

/// Mamdani-style inference: min/max premises, consequents scaled by firing
/// strength, pointwise-max aggregation and centroid defuzzification.
#[derive(Clone, Copy, Debug)]
pub struct MamdaniInference {
    sample_step: f64,
}

impl Default for MamdaniInference {
    fn default() -> Self {
        Self {
            sample_step: SAMPLE_STEP,
        }
    }
}

impl MamdaniInference {
    /// `sample_step` is the resolution at which aggregated sets are sampled.
    /// It must be finite and no finer than [`MIN_SAMPLE_STEP`].
    pub fn new(sample_step: f64) -> FuzzyResult<Self> {
        if !(sample_step.is_finite() && sample_step >= MIN_SAMPLE_STEP) {
            return Err(FuzzyError::InvalidSampleStep {
                step: sample_step,
                min: MIN_SAMPLE_STEP,
            });
        }

        Ok(Self { sample_step })
    }

    pub fn sample_step(&self) -> f64 {
        self.sample_step
    }

    /// Evaluates every rule against `inputs`. A rule whose premise does not
    /// hold contributes nothing; one that holds contributes its consequent
    /// scaled by the premise's strength.
    pub fn fire_rules<T: Term>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        inputs: &Inputs,
    ) -> FuzzyResult<PreResults> {
        let mut pre_results = PreResults::default();

        for (i, rule) in rules.0.iter().enumerate() {
            let number = i + 1;

            if !rule.premise.holds(vars, inputs)? {
                trace!(rule = number, "premise does not hold");
                continue;
            }

            let (var_key, term) = rule
                .consequent()
                .ok_or(FuzzyError::InvalidConsequent { rule: number })?;
            let var = vars.by_key(var_key)?;
            let strength = rule.premise.strength(vars, inputs)?;

            debug!(rule = number, variable = var.name(), term = %term, strength, "rule fired");

            pre_results.push(
                Firing {
                    rule: number,
                    variable: var_key,
                    strength,
                },
                var.term_set(term)?.multiply(strength),
            );
        }

        Ok(pre_results)
    }

    /// Unions each decision variable's scaled consequents and defuzzifies the
    /// result by centroid.
    pub fn aggregate<T: Term>(&self, vars: &Variables<T>, pre_results: &PreResults) -> FuzzyResult<Outputs> {
        let mut outputs = Outputs::new();

        for (var_key, sets) in &pre_results.scaled {
            let var = vars.by_key(*var_key)?;
            let inferred = FuzzySet::union(sets, self.sample_step)
                .and_then(|aggregated| aggregated.centroid())
                .ok_or_else(|| FuzzyError::DegenerateAggregation {
                    variable: var.name().to_string(),
                });

            match &inferred {
                Ok(value) => debug!(variable = var.name(), value, rules = sets.len(), "defuzzified"),
                Err(_) => warn!(variable = var.name(), "aggregated membership is zero everywhere"),
            }

            outputs.insert(*var_key, inferred);
        }

        Ok(outputs)
    }

    pub fn eval<T: Term>(&self, vars: &Variables<T>, rules: &Rules<T>, inputs: &Inputs) -> FuzzyResult<Outputs> {
        let _span = debug_span!("eval", rules = rules.len()).entered();
        let pre_results = self.fire_rules(vars, rules, inputs)?;

        self.aggregate(vars, &pre_results)
    }
}
