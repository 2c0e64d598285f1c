//! Filter State
//!
//! Per-screen filter state: the search query, the active criteria that
//! drive the visible list, and a draft copy edited in the filter modal.
//! Draft edits are invisible until applied. Clearing filters never
//! touches the query.

use serde::{Deserialize, Serialize};

use crate::domain::{color_for, FALLBACK_TAG_COLOR, PREDEFINED_TAGS};

use super::matcher::{matches, Filterable};
use super::tokens::TokenSet;

/// Location and tag tokens, active or staged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub locations: TokenSet,
    pub tags: TokenSet,
}

impl FilterCriteria {
    pub fn new(locations: TokenSet, tags: TokenSet) -> Self {
        Self { locations, tags }
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.locations.clear();
        self.tags.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipKind {
    Location,
    Tag,
}

/// An active filter as rendered above the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    query: String,
    active: FilterCriteria,
    draft: FilterCriteria,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn active(&self) -> &FilterCriteria {
        &self.active
    }

    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    pub fn has_active_filters(&self) -> bool {
        !self.active.is_empty()
    }

    // ========================
    // Draft (filter modal)
    // ========================

    /// Start editing: the draft becomes a copy of the active criteria
    pub fn open_draft(&mut self) {
        self.draft = self.active.clone();
    }

    pub fn add_draft_location(&mut self, token: &str) -> bool {
        self.draft.locations.add(token)
    }

    pub fn remove_draft_location(&mut self, token: &str) -> bool {
        self.draft.locations.remove(token)
    }

    pub fn add_draft_tag(&mut self, token: &str) -> bool {
        self.draft.tags.add(token)
    }

    pub fn remove_draft_tag(&mut self, token: &str) -> bool {
        self.draft.tags.remove(token)
    }

    /// Throw away draft edits
    pub fn cancel_draft(&mut self) {
        self.draft = self.active.clone();
    }

    /// Commit the draft, replacing the active criteria
    pub fn apply_draft(&mut self) {
        self.active = self.draft.clone();
    }

    /// Replace the active criteria (and the draft) with `criteria`
    pub fn apply(&mut self, criteria: FilterCriteria) {
        self.active = criteria.clone();
        self.draft = criteria;
    }

    /// Predefined tags not yet in the draft, for the suggestion chips
    pub fn draft_tag_suggestions(&self) -> Vec<&'static str> {
        suggested_tags(&[self.draft.tags.as_slice()])
    }

    // ========================
    // Active filters
    // ========================

    /// Drop every location and tag token, active and draft. The query stays.
    pub fn clear_filters(&mut self) {
        self.active.clear();
        self.draft.clear();
    }

    /// Remove one active chip from its own axis only
    pub fn remove_active(&mut self, kind: ChipKind, token: &str) -> bool {
        match kind {
            ChipKind::Location => self.active.locations.remove(token),
            ChipKind::Tag => self.active.tags.remove(token),
        }
    }

    /// Remove the active filter a rendered chip stands for
    pub fn remove_chip(&mut self, chip: &FilterChip) -> bool {
        self.remove_active(chip.kind, &chip.label)
    }

    /// Active chips: locations first, then tags, each in insertion order
    pub fn chips(&self) -> Vec<FilterChip> {
        let locations = self.active.locations.iter().map(|token| FilterChip {
            kind: ChipKind::Location,
            label: token.clone(),
            color: FALLBACK_TAG_COLOR.to_string(),
        });
        let tags = self.active.tags.iter().map(|token| FilterChip {
            kind: ChipKind::Tag,
            label: token.clone(),
            color: color_for(token).to_string(),
        });
        locations.chain(tags).collect()
    }

    pub fn matches<T: Filterable + ?Sized>(&self, entity: &T) -> bool {
        matches(entity, &self.query, &self.active.locations, &self.active.tags)
    }

    /// Matching items, in input order
    pub fn visible<'a, T: Filterable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Predefined tags that appear in none of `exclude`, in vocabulary order
pub fn suggested_tags(exclude: &[&[String]]) -> Vec<&'static str> {
    PREDEFINED_TAGS
        .iter()
        .copied()
        .filter(|tag| !exclude.iter().any(|list| list.iter().any(|t| t == tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn sample() -> Vec<Location> {
        vec![
            Location::new("1".into(), "Totoro Cafe".into(), String::new())
                .with_country("Japan")
                .with_tags(["Food"]),
            Location::new("2".into(), "Times Square".into(), String::new())
                .with_country("USA")
                .with_tags(["Landmark"]),
        ]
    }

    fn names(items: Vec<&Location>) -> Vec<&str> {
        items.into_iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_query_scenario() {
        let items = sample();
        let mut state = FilterState::new();
        state.set_query("Totoro");
        assert_eq!(names(state.visible(&items)), vec!["Totoro Cafe"]);
    }

    #[test]
    fn test_location_and_tag_scenario() {
        let items = sample();
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(
            ["Japan"].into_iter().collect(),
            ["Food"].into_iter().collect(),
        ));
        assert_eq!(names(state.visible(&items)), vec!["Totoro Cafe"]);
    }

    #[test]
    fn test_tags_require_all_scenario() {
        let items = sample();
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(
            TokenSet::new(),
            ["Food", "Landmark"].into_iter().collect(),
        ));
        assert!(state.visible(&items).is_empty());
    }

    #[test]
    fn test_draft_is_invisible_until_applied() {
        let items = sample();
        let mut state = FilterState::new();
        state.open_draft();
        state.add_draft_location("USA");
        assert_eq!(state.visible(&items).len(), 2);

        state.apply_draft();
        assert_eq!(names(state.visible(&items)), vec!["Times Square"]);
    }

    #[test]
    fn test_apply_replaces_previous_filters() {
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(["Japan"].into_iter().collect(), TokenSet::new()));

        state.open_draft();
        state.remove_draft_location("Japan");
        state.add_draft_tag("Food");
        state.apply_draft();

        assert!(state.active().locations.is_empty());
        assert_eq!(state.active().tags.as_slice(), ["Food"]);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(TokenSet::new(), ["Food"].into_iter().collect()));
        state.open_draft();
        state.add_draft_tag("Nightlife");
        state.cancel_draft();

        assert_eq!(state.draft(), state.active());
        state.apply_draft();
        assert_eq!(state.active().tags.as_slice(), ["Food"]);
    }

    #[test]
    fn test_clear_filters_keeps_query() {
        let mut state = FilterState::new();
        state.set_query("cafe");
        state.apply(FilterCriteria::new(
            ["Japan"].into_iter().collect(),
            ["Food"].into_iter().collect(),
        ));
        state.clear_filters();

        assert!(state.active().is_empty());
        assert!(state.draft().is_empty());
        assert!(!state.has_active_filters());
        assert_eq!(state.query(), "cafe");
    }

    #[test]
    fn test_remove_active_chip() {
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(
            ["Japan"].into_iter().collect(),
            ["Food", "Nightlife"].into_iter().collect(),
        ));

        assert!(state.remove_active(ChipKind::Tag, "Food"));
        assert!(state.remove_active(ChipKind::Location, "Japan"));
        assert!(!state.remove_active(ChipKind::Tag, "Shopping"));
        assert!(!state.remove_active(ChipKind::Location, "Nightlife"));
        assert!(state.active().locations.is_empty());
        assert_eq!(state.active().tags.as_slice(), ["Nightlife"]);
    }

    #[test]
    fn test_remove_chip_leaves_other_axis() {
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(
            ["Food"].into_iter().collect(),
            ["Food"].into_iter().collect(),
        ));

        let chips = state.chips();
        assert_eq!(chips.len(), 2);
        assert!(state.remove_chip(&chips[1]));

        let left = state.chips();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, ChipKind::Location);
        assert_eq!(left[0].label, "Food");
        assert!(state.active().tags.is_empty());
    }

    #[test]
    fn test_chips_order_and_colors() {
        let mut state = FilterState::new();
        state.apply(FilterCriteria::new(
            ["Japan"].into_iter().collect(),
            ["Food", "ramen"].into_iter().collect(),
        ));

        let chips = state.chips();
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0].kind, ChipKind::Location);
        assert_eq!(chips[0].label, "Japan");
        assert_eq!(chips[1].color, "#FFD700");
        assert_eq!(chips[2].color, FALLBACK_TAG_COLOR);
    }

    #[test]
    fn test_suggestions_skip_used_tags() {
        let mut state = FilterState::new();
        state.open_draft();
        state.add_draft_tag("Food");
        let suggestions = state.draft_tag_suggestions();
        assert_eq!(suggestions.len(), 9);
        assert_eq!(suggestions[0], "Nature");

        let on_location = vec!["Nature".to_string()];
        let picked = vec!["Culture".to_string()];
        let suggestions = suggested_tags(&[on_location.as_slice(), picked.as_slice()]);
        assert!(!suggestions.contains(&"Nature"));
        assert!(!suggestions.contains(&"Culture"));
        assert!(suggestions.contains(&"Food"));
    }
}
