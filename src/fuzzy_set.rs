//! Piecewise-linear fuzzy sets.
//!
//! A [`FuzzySet`] is a list of breakpoints sorted by x. Membership between two
//! breakpoints is linearly interpolated and membership outside the breakpoints
//! is held flat at the nearest end, so open-ended sets such as "very hot" act as
//! a plateau past their last breakpoint.

use serde::Serialize;

use crate::error::{FuzzyError, FuzzyResult};
use crate::linspace::Linspace;
use crate::math::interp;
use crate::ops::Connective;

/// A query within this distance of a breakpoint's x reads that breakpoint's
/// degree exactly, absorbing noise from repeated scaling and sampling.
pub const BREAKPOINT_TOLERANCE: f64 = 0.001;

/// Step, in units of the variable's physical scale, at which [`FuzzySet::union`]
/// samples the combined domain.
pub const SAMPLE_STEP: f64 = 0.1;

/// Finest sampling step accepted for aggregation.
pub const MIN_SAMPLE_STEP: f64 = 1e-4;

/// One breakpoint of a membership function.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FuzzyValue {
    pub x: f64,
    pub degree: f64,
}

impl FuzzyValue {
    pub fn new(x: f64, degree: f64) -> Self {
        Self { x, degree }
    }
}

impl From<(f64, f64)> for FuzzyValue {
    fn from((x, degree): (f64, f64)) -> Self {
        Self { x, degree }
    }
}

/// A membership function given by breakpoints strictly increasing in x.
///
/// Never empty. Scaling and union allocate new sets; a set is not mutated after
/// construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FuzzySet(Vec<FuzzyValue>);

impl FuzzySet {
    /// Builds a set from breakpoints, rejecting an empty list, x values that are
    /// not strictly increasing, non-finite numbers and degrees outside [0, 1].
    pub fn new<P: Into<FuzzyValue>>(points: impl IntoIterator<Item = P>) -> FuzzyResult<Self> {
        let points: Vec<FuzzyValue> = points.into_iter().map(Into::into).collect();

        if points.is_empty() {
            return Err(FuzzyError::invalid_set("no breakpoints"));
        }

        for point in &points {
            if !point.x.is_finite() || !point.degree.is_finite() {
                return Err(FuzzyError::invalid_set(format!(
                    "non-finite breakpoint ({}, {})",
                    point.x, point.degree
                )));
            }
            if !(0. ..=1.).contains(&point.degree) {
                return Err(FuzzyError::invalid_set(format!(
                    "degree {} at x = {} is outside [0, 1]",
                    point.degree, point.x
                )));
            }
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[0].x >= pair[1].x) {
            return Err(FuzzyError::invalid_set(format!(
                "breakpoints are not strictly increasing at x = {} then x = {}",
                pair[0].x, pair[1].x
            )));
        }

        Ok(Self(points))
    }

    pub fn points(&self) -> &[FuzzyValue] {
        &self.0
    }

    /// Smallest and largest breakpoint x.
    pub fn support(&self) -> (f64, f64) {
        // Non-empty by construction
        (self.0[0].x, self.0[self.0.len() - 1].x)
    }

    /// Membership degree at `x`.
    pub fn get(&self, x: f64) -> f64 {
        interp(x, self.0.iter().map(|p| (p.x, p.degree)), BREAKPOINT_TOLERANCE)
    }

    /// Scales every degree by `strength`, keeping the x coordinates.
    ///
    /// This is how a rule's firing strength is applied to its consequent: the
    /// whole shape is scaled, not clipped at the strength.
    pub fn multiply(&self, strength: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|p| FuzzyValue::new(p.x, p.degree * strength))
                .collect(),
        )
    }

    /// Pointwise maximum of `sets`, sampled every `step` across the union of
    /// their supports. Returns `None` for an empty list, or when `step` is too
    /// fine to index the span.
    pub fn union(sets: &[FuzzySet], step: f64) -> Option<Self> {
        let (min, max) = sets
            .iter()
            .map(FuzzySet::support)
            .reduce(|(lo, hi), (start, end)| (f64::min(lo, start), f64::max(hi, end)))?;

        let points = Linspace::stepped(min, max, step)?
            .map(|x| FuzzyValue::new(x, Connective::Or.fold(sets.iter().map(|set| set.get(x)))))
            .collect();

        Some(Self(points))
    }

    /// Discrete center of gravity: `sum(x * degree) / sum(degree)` over the
    /// breakpoints. `None` when every degree is zero.
    pub fn centroid(&self) -> Option<f64> {
        let (weighted, total) = self
            .0
            .iter()
            .fold((0., 0.), |(weighted, total), p| (weighted + p.x * p.degree, total + p.degree));

        if total <= 0. {
            None
        } else {
            Some(weighted / total)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn set(points: &[(f64, f64)]) -> FuzzySet {
        FuzzySet::new(points.iter().copied()).unwrap()
    }

    #[test]
    fn rejects_invalid_breakpoints() {
        assert!(matches!(
            FuzzySet::new(Vec::<(f64, f64)>::new()),
            Err(FuzzyError::InvalidFuzzySet { .. })
        ));
        assert!(FuzzySet::new([(10., 0.), (5., 1.)]).is_err());
        assert!(FuzzySet::new([(10., 0.), (10., 1.)]).is_err());
        assert!(FuzzySet::new([(10., 1.5)]).is_err());
        assert!(FuzzySet::new([(f64::NAN, 1.)]).is_err());
    }

    #[test]
    fn interpolates_within_a_segment() {
        let fz = set(&[(10., 0.), (30., 1.)]);

        assert_eq!(fz.get(20.), 0.5);
        assert_abs_diff_eq!(fz.get(15.), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn extrapolates_flat() {
        let very_hot = set(&[(30., 0.), (35., 1.), (40., 1.)]);
        let dark = set(&[(0., 1.), (12., 0.)]);

        assert_eq!(very_hot.get(10.), very_hot.get(30.));
        assert_eq!(very_hot.get(45.), 1.);
        assert_eq!(dark.get(-5.), 1.);
        assert_eq!(dark.get(50.), 0.);
    }

    #[test]
    fn multiply_scales_degrees_only() {
        let fz = set(&[(10., 0.), (30., 1.), (50., 0.)]);
        let scaled = fz.multiply(0.4);

        assert_eq!(
            scaled.points(),
            &[
                FuzzyValue::new(10., 0.),
                FuzzyValue::new(30., 0.4),
                FuzzyValue::new(50., 0.)
            ]
        );
        // Input untouched
        assert_eq!(fz.get(30.), 1.);
        for x in [0., 12.5, 20., 37., 60.] {
            assert_abs_diff_eq!(scaled.get(x), 0.4 * fz.get(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn centroid_of_symmetric_triangle_is_its_peak() {
        let fz = set(&[(10., 0.), (30., 1.), (50., 0.)]);
        let sampled = FuzzySet::union(&[fz.clone()], SAMPLE_STEP).unwrap();

        assert_abs_diff_eq!(fz.centroid().unwrap(), 30., epsilon = 1e-9);
        assert_abs_diff_eq!(sampled.centroid().unwrap(), 30., epsilon = 1e-6);
    }

    #[test]
    fn centroid_of_all_zero_set_is_none() {
        let fz = set(&[(10., 0.), (30., 1.), (50., 0.)]).multiply(0.);

        assert_eq!(fz.centroid(), None);
    }

    #[test]
    fn union_is_pointwise_max() {
        let a = set(&[(10., 0.), (30., 1.), (50., 0.)]);
        let b = set(&[(40., 0.), (60., 1.), (80., 0.)]).multiply(0.5);
        let joined = FuzzySet::union(&[a.clone(), b.clone()], SAMPLE_STEP).unwrap();

        assert_eq!(joined.support().0, 10.);
        assert_abs_diff_eq!(joined.support().1, 80., epsilon = 1e-9);
        assert_eq!(joined.points().len(), 701);
        for x in [10., 25., 30., 44., 46., 60., 75., 80.] {
            assert_abs_diff_eq!(joined.get(x), a.get(x).max(b.get(x)), epsilon = 0.01);
        }
    }

    #[test]
    fn union_of_nothing_is_none() {
        assert_eq!(FuzzySet::union(&[], SAMPLE_STEP), None);
    }

    #[test]
    fn union_of_single_point_sets() {
        let joined = FuzzySet::union(&[set(&[(5., 0.3)]), set(&[(5., 0.6)])], SAMPLE_STEP).unwrap();

        assert_eq!(joined.points(), &[FuzzyValue::new(5., 0.6)]);
    }
}
