use std::ops::Not;

use crate::error::FuzzyResult;
use crate::inputs::Inputs;
use crate::ops::{complement, Connective};
use crate::terms::Term;
use crate::variable::{Variable, VariableKey, Variables};

/// Premise of a rule: propositions over (variable, term) leaves.
///
/// The same tree is read two ways. [`Expr::holds`] is the boolean gate, where a
/// leaf is true when the crisp input belongs to the term at all. [`Expr::strength`]
/// is the firing degree, with AND as min, OR as max and NOT as complement.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    Not(Box<Expr<T>>),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            }
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn or2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.or(rhs).or(rhs2)
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            }
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    pub fn propositions(&self) -> Vec<(&VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(&'p VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((var_key, term)),
                Expr::Not(expr) => parse(expr, out),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                }
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<T: Term> Expr<T> {
    /// Boolean reading of the premise. Short-circuits, and an unknown term
    /// reads as false.
    pub fn holds(&self, vars: &Variables<T>, inputs: &Inputs) -> FuzzyResult<bool> {
        match self {
            Expr::Is(var_key, term) => {
                let var = vars.by_key(*var_key)?;

                Ok(var.is_member(inputs.value(*var_key, var)?, term))
            }
            Expr::Not(expr) => Ok(!expr.holds(vars, inputs)?),
            Expr::And(exprs) => {
                for expr in exprs {
                    if !expr.holds(vars, inputs)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Expr::Or(exprs) => {
                for expr in exprs {
                    if expr.holds(vars, inputs)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Firing degree of the premise, in [0, 1].
    pub fn strength(&self, vars: &Variables<T>, inputs: &Inputs) -> FuzzyResult<f64> {
        match self {
            Expr::Is(var_key, term) => {
                let var = vars.by_key(*var_key)?;

                var.membership(inputs.value(*var_key, var)?, term)
            }
            Expr::Not(expr) => Ok(complement(expr.strength(vars, inputs)?)),
            Expr::And(exprs) => Self::combine(Connective::And, exprs, vars, inputs),
            Expr::Or(exprs) => Self::combine(Connective::Or, exprs, vars, inputs),
        }
    }

    fn combine(op: Connective, exprs: &[Expr<T>], vars: &Variables<T>, inputs: &Inputs) -> FuzzyResult<f64> {
        let degrees = exprs
            .iter()
            .map(|expr| expr.strength(vars, inputs))
            .collect::<FuzzyResult<Vec<f64>>>()?;

        Ok(op.fold(degrees))
    }
}

impl<T> Not for Expr<T> {
    type Output = Expr<T>;

    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::FuzzyError;
    use crate::inference::MamdaniInference;
    use crate::rules::Rules;
    use crate::terms::{Key, Terms};

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Level {
        Low,
        High,
    }

    impl std::fmt::Display for Level {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            std::fmt::Debug::fmt(self, f)
        }
    }

    fn level_terms() -> Terms<'static, Level> {
        let mut terms = Terms::new();

        terms.insert(Level::Low, &[(0., 1.), (10., 0.)]);
        terms.insert(Level::High, &[(5., 0.), (10., 1.)]);
        terms
    }

    /// `High` climbs so slowly that at 0.5 it is about 5e-6, below the
    /// membership threshold but not zero.
    fn faint_terms() -> Terms<'static, Level> {
        let mut terms = Terms::new();

        terms.insert(Level::Low, &[(0., 1.), (1000., 0.)]);
        terms.insert(Level::High, &[(0., 0.), (1000., 0.01)]);
        terms
    }

    #[test]
    fn gate_and_strength_agree_on_shape() {
        let mut vars = Variables::<Level>::new();
        let a = vars.add("a", 0. ..=10., level_terms()).unwrap();
        let b = vars.add("b", 0. ..=10., level_terms()).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(a, 2.);
        inputs.add(b, 7.);

        // a is low (0.8) AND (b is high (0.4) OR b is low (0.3))
        let expr = a.is(Level::Low).and(b.is(Level::High).or(b.is(Level::Low)));

        assert_eq!(expr.holds(&vars, &inputs), Ok(true));
        assert_abs_diff_eq!(expr.strength(&vars, &inputs).unwrap(), 0.4, epsilon = 1e-12);

        // NOT a is high: a is high at 2 is 0, so the complement is 1
        let negated = !a.is(Level::High);

        assert_eq!(negated.holds(&vars, &inputs), Ok(true));
        assert_eq!(negated.strength(&vars, &inputs), Ok(1.));
    }

    #[test]
    fn gate_fails_when_any_and_operand_is_zero() {
        let mut vars = Variables::<Level>::new();
        let a = vars.add("a", 0. ..=10., level_terms()).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(a, 3.);

        let expr = a.is(Level::Low).and(a.is(Level::High));

        assert_eq!(expr.holds(&vars, &inputs), Ok(false));
        assert_eq!(expr.strength(&vars, &inputs), Ok(0.));
    }

    #[test]
    fn degree_at_or_below_threshold_fails_the_gate() {
        let mut vars = Variables::<Level>::new();
        let a = vars.add("a", 0. ..=10., level_terms()).unwrap();
        let b = vars.add("b", 0. ..=1000., faint_terms()).unwrap();
        let mut inputs = Inputs::new();

        inputs.add(a, 2.);
        inputs.add(b, 0.5);

        let expr = a.is(Level::Low).and(b.is(Level::High));
        let strength = expr.strength(&vars, &inputs).unwrap();

        assert_eq!(expr.holds(&vars, &inputs), Ok(false));
        assert!(strength > 0. && strength <= crate::MEMBERSHIP_THRESHOLD, "{strength}");

        // The same faint leaf negated lets the gate through
        let negated = a.is(Level::Low).and(!b.is(Level::High));

        assert_eq!(negated.holds(&vars, &inputs), Ok(true));
        assert_abs_diff_eq!(negated.strength(&vars, &inputs).unwrap(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn rule_with_a_faint_leaf_is_skipped() {
        let mut vars = Variables::<Level>::new();
        let a = vars.add("a", 0. ..=10., level_terms()).unwrap();
        let b = vars.add("b", 0. ..=1000., faint_terms()).unwrap();
        let c = vars.add("c", 0. ..=10., level_terms()).unwrap();
        let mut rules = Rules::new();
        let mut inputs = Inputs::new();

        rules.add(a.is(Level::Low).and(b.is(Level::High)), c.is(Level::High));
        rules.add(a.is(Level::Low).and(!b.is(Level::High)), c.is(Level::Low));
        rules.validate(&vars).unwrap();
        inputs.add(a, 2.);
        inputs.add(b, 0.5);

        let pre_results = MamdaniInference::default().fire_rules(&vars, &rules, &inputs).unwrap();

        assert_eq!(pre_results.len(), 1);
        assert_eq!(pre_results.firings().len(), 1);
        assert_eq!(pre_results.firings()[0].rule, 2);
        assert_abs_diff_eq!(pre_results.firings()[0].strength, 0.8, epsilon = 1e-12);
        assert_eq!(pre_results.get(c).len(), 1);
    }

    #[test]
    fn builders_flatten() {
        let mut vars = Variables::<Level>::new();
        let a = vars.add("a", 0. ..=10., level_terms()).unwrap();
        let expr: Expr<Level> = a.is(Level::Low).and2(a.is(Level::High), !a.is(Level::Low));

        match &expr {
            Expr::And(exprs) => assert_eq!(exprs.len(), 3),
            other => panic!("expected a flat conjunction, got {other:?}"),
        }
        assert_eq!(expr.propositions().len(), 3);
    }

    #[test]
    fn missing_input_is_reported() {
        let mut vars = Variables::<Level>::new();
        let a = vars.add("a", 0. ..=10., level_terms()).unwrap();

        assert_eq!(
            a.is(Level::Low).holds(&vars, &Inputs::new()),
            Err(FuzzyError::MissingInput {
                variable: "a".to_string()
            })
        );
    }
}
