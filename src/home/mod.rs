//! Home-automation advisor: five sensed quantities, four decision variables
//! and fifteen rules relating them.
//!
//! ```
//! use fuzzy_home_advisor::home::{CrispInput, Decision, HomeAdvisor};
//!
//! let advisor = HomeAdvisor::new()?;
//! let input = CrispInput {
//!     outdoor_brightness: 5.,
//!     lamp_brightness: 0.,
//!     indoor_temperature: 20.,
//!     water_heater_temperature: 50.,
//!     humidity: 50.,
//! };
//!
//! advisor.validate(&input)?;
//!
//! let recommendations = advisor.infer(&input)?;
//!
//! assert!(recommendations.get(Decision::LampBrightness)?.unwrap() > 85.);
//! # Ok::<(), fuzzy_home_advisor::FuzzyError>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::{MamdaniInference, PreResults};
use crate::inputs::Inputs;
use crate::rules::Rules;
use crate::variable::{VariableKey, Variables};

mod advice;
mod input;
mod knowledge;
mod terms;

pub use advice::{Advice, Decision, LAMP_OFF_BELOW};
pub use input::{CrispInput, Sensor, RANGE_TOLERANCE};
pub use knowledge::HomeVariables;
pub use terms::{HomeTerm, Humidity, IndoorTemperature, LampBrightness, OutdoorBrightness, WaterHeaterTemperature};

/// The static home knowledge base together with the inference model run over it.
///
/// Built once; every method takes `&self`, so one advisor can serve any number
/// of snapshots.
pub struct HomeAdvisor {
    vars: Variables<HomeTerm>,
    rules: Rules<HomeTerm>,
    handles: HomeVariables,
    model: MamdaniInference,
}

impl HomeAdvisor {
    pub fn new() -> FuzzyResult<Self> {
        Self::with_inference(MamdaniInference::default())
    }

    /// Builds the variables and rules and validates both. Any malformed table
    /// or rule fails here rather than during a run.
    pub fn with_inference(model: MamdaniInference) -> FuzzyResult<Self> {
        let (vars, handles) = knowledge::variables()?;
        let rules = knowledge::rules(&handles);

        rules.validate(&vars)?;

        Ok(Self {
            vars,
            rules,
            handles,
            model,
        })
    }

    pub fn variables(&self) -> &Variables<HomeTerm> {
        &self.vars
    }

    pub fn handles(&self) -> &HomeVariables {
        &self.handles
    }

    pub fn rules(&self) -> &Rules<HomeTerm> {
        &self.rules
    }

    pub fn model(&self) -> &MamdaniInference {
        &self.model
    }

    /// Rejects a reading outside `sensor`'s range by more than [`RANGE_TOLERANCE`].
    pub fn check_reading(&self, sensor: Sensor, value: f64) -> FuzzyResult<f64> {
        let range = sensor.range();
        let (min, max) = (*range.start(), *range.end());

        if value + RANGE_TOLERANCE >= min && value - RANGE_TOLERANCE <= max {
            Ok(value)
        } else {
            Err(FuzzyError::OutOfRange {
                quantity: sensor.label().to_string(),
                value,
                min,
                max,
            })
        }
    }

    pub fn validate(&self, input: &CrispInput) -> FuzzyResult<()> {
        for sensor in Sensor::ALL {
            self.check_reading(sensor, input.get(sensor))?;
        }

        Ok(())
    }

    /// Degree of `value` in every term of `sensor`'s variable, in declaration order.
    pub fn memberships(&self, sensor: Sensor, value: f64) -> FuzzyResult<Vec<(HomeTerm, f64)>> {
        let var = self.vars.by_key(self.handles.key(sensor))?;

        Ok(var.terms().map(|(term, set)| (term, set.get(value))).collect())
    }

    /// Scaled consequents of every rule that fires for `input`.
    pub fn fire(&self, input: &CrispInput) -> FuzzyResult<PreResults> {
        self.model.fire_rules(&self.vars, &self.rules, &self.inputs(input))
    }

    /// Runs the whole pipeline for one snapshot.
    ///
    /// The input is not range checked here; see [`HomeAdvisor::validate`].
    pub fn infer(&self, input: &CrispInput) -> FuzzyResult<Recommendations> {
        let _span = tracing::debug_span!("eval", rules = self.rules.len()).entered();
        let pre_results = self.fire(input)?;
        let outputs = self.model.aggregate(&self.vars, &pre_results)?;
        let mut results = BTreeMap::new();

        for decision in Decision::ALL {
            if let Some(inferred) = outputs.by_key(self.decision_key(decision)) {
                results.insert(decision, inferred.clone());
            }
        }

        let firings = pre_results
            .firings()
            .iter()
            .filter_map(|firing| {
                let (_, term) = self.rules.iter().nth(firing.rule - 1)?.consequent()?;

                Some(RuleFiring {
                    rule: firing.rule,
                    decision: self.decision_of(firing.variable)?,
                    term: *term,
                    strength: firing.strength,
                })
            })
            .collect();

        Ok(Recommendations { results, firings })
    }

    fn inputs(&self, input: &CrispInput) -> Inputs {
        let mut inputs = Inputs::new();

        inputs.add(self.handles.outdoor_brightness, input.outdoor_brightness);
        inputs.add(self.handles.lamp_brightness, input.lamp_brightness);
        inputs.add(self.handles.indoor_temperature, input.indoor_temperature);
        inputs.add(self.handles.water_heater_temperature, input.water_heater_temperature);
        inputs.add(self.handles.humidity, input.humidity);
        inputs
    }

    fn decision_key(&self, decision: Decision) -> VariableKey {
        self.handles.key(decision.sensor())
    }

    fn decision_of(&self, var_key: VariableKey) -> Option<Decision> {
        Decision::ALL
            .into_iter()
            .find(|decision| self.decision_key(*decision) == var_key)
    }
}

/// A rule that fired, described in domain terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RuleFiring {
    pub rule: usize,
    pub decision: Decision,
    pub term: HomeTerm,
    pub strength: f64,
}

/// Crisp targets of one run. Decision variables no rule fired for are absent.
#[derive(Clone, Debug, Default)]
pub struct Recommendations {
    results: BTreeMap<Decision, FuzzyResult<f64>>,
    firings: Vec<RuleFiring>,
}

impl Recommendations {
    /// The inferred target, `Ok(None)` when no rule fired for `decision`, or
    /// [`FuzzyError::DegenerateAggregation`].
    pub fn get(&self, decision: Decision) -> FuzzyResult<Option<f64>> {
        self.results.get(&decision).cloned().transpose()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Decision, &FuzzyResult<f64>)> + '_ {
        self.results.iter().map(|(decision, result)| (*decision, result))
    }

    pub fn firings(&self) -> &[RuleFiring] {
        &self.firings
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Advisories in reporting order, comparing each target with the reading
    /// it would replace.
    pub fn advise(&self, input: &CrispInput) -> Vec<Advice> {
        self.iter()
            .filter_map(|(decision, result)| match result {
                Ok(target) => Advice::decide(decision, *target, input.get(decision.sensor())),
                Err(err) => Some(Advice::Unavailable {
                    decision,
                    reason: err.to_string(),
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn check_reading_tolerates_rounding_at_the_bounds() {
        let advisor = HomeAdvisor::new().unwrap();

        assert_eq!(advisor.check_reading(Sensor::Humidity, 100.00005), Ok(100.00005));
        assert_eq!(advisor.check_reading(Sensor::WaterHeaterTemperature, 19.99995), Ok(19.99995));
        assert_eq!(
            advisor.check_reading(Sensor::IndoorTemperature, 40.5),
            Err(FuzzyError::OutOfRange {
                quantity: "Indoor temperature".to_string(),
                value: 40.5,
                min: 0.,
                max: 40.,
            })
        );
        assert!(advisor.check_reading(Sensor::LampBrightness, f64::NAN).is_err());
    }

    #[test]
    fn memberships_follow_declaration_order() {
        let advisor = HomeAdvisor::new().unwrap();
        let degrees = advisor.memberships(Sensor::OutdoorBrightness, 20.).unwrap();

        assert_eq!(degrees.len(), 4);
        assert_eq!(degrees[0].0, HomeTerm::from(OutdoorBrightness::Dark));
        assert_eq!(degrees[0].1, 0.);
        assert_abs_diff_eq!(degrees[1].1, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn decision_keys_round_trip() {
        let advisor = HomeAdvisor::new().unwrap();

        for decision in Decision::ALL {
            assert_eq!(advisor.decision_of(advisor.decision_key(decision)), Some(decision));
        }
        assert_eq!(advisor.decision_of(advisor.handles.outdoor_brightness.key()), None);
    }
}
