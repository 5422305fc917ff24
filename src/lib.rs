//! Mamdani-style fuzzy inference over piecewise-linear membership functions,
//! plus the home-automation knowledge base built on it.
//!
//! The generic engine works with any term enum: each variable gets its own
//! [`Key`] enum of terms, and one wrapping enum unifies them for rules.
//!
//! ```
//! use fuzzy_home_advisor::{Inputs, Key, MamdaniInference, Rules, Terms, Variables};
//!
//! #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
//! enum Temp {
//!     Cold,
//!     Hot,
//! }
//!
//! #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
//! enum Fan {
//!     Slow,
//!     Fast,
//! }
//!
//! #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
//! enum Term {
//!     Temp(Temp),
//!     Fan(Fan),
//! }
//!
//! impl From<Temp> for Term {
//!     fn from(t: Temp) -> Self {
//!         Term::Temp(t)
//!     }
//! }
//!
//! impl From<Fan> for Term {
//!     fn from(f: Fan) -> Self {
//!         Term::Fan(f)
//!     }
//! }
//!
//! impl std::fmt::Display for Term {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         std::fmt::Debug::fmt(self, f)
//!     }
//! }
//!
//! let mut temp_terms = Terms::new();
//! let mut fan_terms = Terms::new();
//!
//! temp_terms.insert(Temp::Cold, &[(0., 1.), (20., 0.)]);
//! temp_terms.insert(Temp::Hot, &[(15., 0.), (35., 1.)]);
//! fan_terms.insert(Fan::Slow, &[(0., 1.), (50., 0.)]);
//! fan_terms.insert(Fan::Fast, &[(50., 0.), (100., 1.)]);
//!
//! let mut vars = Variables::<Term>::new();
//! let temp = vars.add("temperature", 0. ..=40., temp_terms)?;
//! let fan = vars.add("fan", 0. ..=100., fan_terms)?;
//! let mut rules = Rules::new();
//!
//! rules.add(temp.is(Temp::Hot), fan.is(Fan::Fast));
//! rules.add(temp.is(Temp::Cold), fan.is(Fan::Slow));
//! rules.validate(&vars)?;
//!
//! let mut inputs = Inputs::new();
//!
//! inputs.add(temp, 30.);
//!
//! let outputs = MamdaniInference::default().eval(&vars, &rules, &inputs)?;
//!
//! assert!(outputs.get_inferred_membership(fan)?.unwrap() > 50.);
//! # Ok::<(), fuzzy_home_advisor::FuzzyError>(())
//! ```

pub mod config;
mod dsl;
mod error;
mod fuzzy_set;
pub mod home;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use dsl::Expr;
pub use error::{FuzzyError, FuzzyResult};
pub use fuzzy_set::{FuzzySet, FuzzyValue, BREAKPOINT_TOLERANCE, MIN_SAMPLE_STEP, SAMPLE_STEP};
pub use inference::{Firing, MamdaniInference, PreResults};
pub use inputs::Inputs;
pub use ops::{complement, Connective};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use terms::{Key, Term, Terms};
pub use variable::{LinguisticVariable, Variable, VariableKey, Variables, MEMBERSHIP_THRESHOLD};
