use std::fmt;
use std::hash::Hash;

pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

/// Bound on the term type shared by all variables of one knowledge base,
/// usually an enum wrapping each variable's own [`Key`] enum.
pub trait Term: Copy + Eq + Hash + fmt::Display {}

impl<T: Copy + Eq + Hash + fmt::Display> Term for T {}

/// Breakpoint tables for the linguistic terms of a single variable.
pub struct Terms<'t, K: Key>(pub(crate) FixedMap<K, &'t [(f64, f64)]>);

impl<'t, K: Key> Default for Terms<'t, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, K: Key> Terms<'t, K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, value: &'t [(f64, f64)]) {
        self.0.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'t, K: Key> FromIterator<(K, &'t [(f64, f64)])> for Terms<'t, K> {
    fn from_iter<It: IntoIterator<Item = (K, &'t [(f64, f64)])>>(iter: It) -> Self {
        let mut terms = Self::new();

        for (key, value) in iter {
            terms.insert(key, value);
        }

        terms
    }
}
