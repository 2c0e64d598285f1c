//! Match Predicate
//!
//! Decides whether one entity is visible under a query and filter tokens.
//! Three independent checks, all of which must pass:
//! - name: case-insensitive substring of the query
//! - place: ANY location token is a case-insensitive substring
//! - tags: EVERY tag token is present, exact and case-sensitive

use crate::domain::{Board, BoardSummary, Location};

use super::tokens::TokenSet;

/// Fields the filter looks at
pub trait Filterable {
    fn name(&self) -> &str;

    /// Text matched by location tokens
    fn place(&self) -> &str {
        ""
    }

    fn tags(&self) -> &[String] {
        &[]
    }
}

impl Filterable for Location {
    fn name(&self) -> &str {
        &self.name
    }

    fn place(&self) -> &str {
        Location::place(self)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

// Boards are only searched by name. They carry no place or tags, so any
// active location/tag token hides them.
impl Filterable for Board {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Filterable for BoardSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn place(&self) -> &str {
        (**self).place()
    }

    fn tags(&self) -> &[String] {
        (**self).tags()
    }
}

pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn matches_place(place: &str, tokens: &TokenSet) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let place = place.to_lowercase();
    tokens.iter().any(|token| place.contains(&token.to_lowercase()))
}

pub fn matches_tags(tags: &[String], tokens: &TokenSet) -> bool {
    tokens.iter().all(|token| tags.iter().any(|tag| tag == token))
}

/// Whether `entity` passes the query and both token filters
pub fn matches<T: Filterable + ?Sized>(
    entity: &T,
    query: &str,
    location_tokens: &TokenSet,
    tag_tokens: &TokenSet,
) -> bool {
    matches_query(entity.name(), query)
        && matches_place(entity.place(), location_tokens)
        && matches_tags(entity.tags(), tag_tokens)
}
