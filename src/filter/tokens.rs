//! Filter Tokens
//!
//! Insertion-ordered set of filter tokens. Chips render in the order the
//! user added them, so this is a `Vec` with set semantics on insert.

use serde::{Deserialize, Serialize};

use crate::domain::push_unique;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a token, trimmed.
    ///
    /// Blank tokens and tokens already present are ignored. Returns
    /// whether the set changed.
    pub fn add(&mut self, token: &str) -> bool {
        push_unique(&mut self.0, token)
    }

    /// Remove an exact match; absent tokens are ignored
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != token);
        self.0.len() != before
    }

    /// By-value form of [`TokenSet::add`]
    pub fn with(mut self, token: &str) -> Self {
        self.add(token);
        self
    }

    /// By-value form of [`TokenSet::remove`]
    pub fn without(mut self, token: &str) -> Self {
        self.remove(token);
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Same tokens, ignoring insertion order
    pub fn same_members(&self, other: &TokenSet) -> bool {
        self.len() == other.len() && self.0.iter().all(|t| other.contains(t))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for token in iter {
            set.add(token.as_ref());
        }
        set
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
