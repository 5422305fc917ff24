use num::Float;

/// Connective for combining membership degrees, both inside rule premises and
/// when aggregating rule consequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    /// Fuzzy AND: minimum
    And,
    /// Fuzzy OR: maximum
    Or,
}

impl Connective {
    /// The degree that leaves any other degree unchanged under this connective.
    pub fn identity<F: Float>(self) -> F {
        match self {
            Self::And => F::one(),
            Self::Or => F::zero(),
        }
    }

    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::And => F::min(u, v),
            Self::Or => F::max(u, v),
        }
    }

    /// Folds any number of degrees; an empty input yields the identity.
    pub fn fold<F: Float>(self, degrees: impl IntoIterator<Item = F>) -> F {
        degrees
            .into_iter()
            .fold(self.identity(), |acc, degree| self.call(acc, degree))
    }
}

/// Fuzzy NOT
pub fn complement<F: Float>(degree: F) -> F {
    F::one() - degree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectives() {
        assert_eq!(Connective::And.call(0.6, 0.4), 0.4);
        assert_eq!(Connective::Or.call(0.6, 0.4), 0.6);
        assert_eq!(Connective::And.fold([0.9, 0.2, 0.7]), 0.2);
        assert_eq!(Connective::Or.fold([0.1, 0.2, 0.7f32]), 0.7);
        assert_eq!(complement(0.25), 0.75);
    }

    #[test]
    fn empty_fold_is_identity() {
        assert_eq!(Connective::And.fold(Vec::<f64>::new()), 1.);
        assert_eq!(Connective::Or.fold(Vec::<f64>::new()), 0.);
    }
}
