//! List View
//!
//! What one list screen holds: the latest fetched snapshot and its filter
//! state. A new fetch replaces the snapshot wholesale; the filter state
//! survives so the user's query and chips stay put.

use crate::domain::{Board, Entity, Location};

use super::matcher::{matches_query, Filterable};
use super::state::{FilterChip, FilterState};

#[derive(Debug, Clone, Default)]
pub struct ListView<T> {
    items: Vec<T>,
    pub filter: FilterState,
}

impl<T: Filterable> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            filter: FilterState::new(),
        }
    }

    /// Swap in a freshly fetched collection
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> Vec<&T> {
        self.filter.visible(&self.items)
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        self.filter.chips()
    }
}

impl<T: Filterable + Entity> ListView<T> {
    /// Replace the item with the same id, or append it
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, id: &T::Id) {
        self.items.retain(|item| item.id() != id);
    }
}

/// Locations that can still be added to `board`, narrowed by name
pub fn addable_locations<'a>(all: &'a [Location], board: &Board, query: &str) -> Vec<&'a Location> {
    all.iter()
        .filter(|loc| matches_query(&loc.name, query) && !board.contains(&loc.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCriteria;

    fn loc(id: &str, name: &str) -> Location {
        Location::new(id.to_string(), name.to_string(), String::new())
    }

    #[test]
    fn test_filter_survives_refresh() {
        let mut view = ListView::new(vec![loc("1", "Totoro Cafe"), loc("2", "Times Square")]);
        view.filter.set_query("times");
        assert_eq!(view.visible().len(), 1);

        view.replace_items(vec![loc("3", "Times Square"), loc("4", "Tokyo Tower")]);
        assert_eq!(view.filter.query(), "times");
        let ids: Vec<&str> = view.visible().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut view = ListView::new(vec![loc("1", "Totoro Cafe")]);
        view.upsert(loc("1", "Totoro Cafe (moved)"));
        view.upsert(loc("2", "Times Square"));
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.items()[0].name, "Totoro Cafe (moved)");

        view.remove(&"1".to_string());
        assert_eq!(view.items().len(), 1);
    }

    #[test]
    fn test_chips_follow_active_filters() {
        let mut view: ListView<Location> = ListView::new(Vec::new());
        view.filter.apply(FilterCriteria::new(
            ["Japan"].into_iter().collect(),
            ["Food"].into_iter().collect(),
        ));
        assert_eq!(view.chips().len(), 2);
    }

    #[test]
    fn test_addable_locations_excludes_members() {
        let all = vec![loc("1", "Totoro Cafe"), loc("2", "Times Square"), loc("3", "Tokyo Tower")];
        let mut board = Board::new("b".into(), "Tokyo".into());
        board.locations.push(all[0].clone());

        let names: Vec<&str> = addable_locations(&all, &board, "to")
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Tokyo Tower"]);
    }
}
