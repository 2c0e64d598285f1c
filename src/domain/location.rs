//! Location Entity
//!
//! A saved point of interest. Locations are shared between boards: a board
//! only references them, so removing one from a board leaves it intact.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::tag::push_unique;

/// A saved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text place or address description
    #[serde(default)]
    pub location: String,
    pub country: Option<String>,
    pub category: Option<String>,
    /// User labels, no duplicates
    #[serde(default)]
    pub tags: Vec<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub image_src: Option<String>,
    /// Link the location was extracted from
    pub source_link: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Location {
    /// Create a location with default values
    pub fn new(id: String, name: String, location: String) -> Self {
        Self {
            id,
            name,
            location,
            country: None,
            category: None,
            tags: Vec::new(),
            note: None,
            is_favorite: false,
            image_src: None,
            source_link: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a location extracted from a shared link
    pub fn from_link(id: String, name: String, source_link: String) -> Self {
        Self {
            source_link: Some(source_link),
            ..Self::new(id, name, String::new())
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_tags(tags);
        self
    }

    /// Text that location filters are matched against.
    ///
    /// The country when one is recorded, otherwise the free-text location.
    pub fn place(&self) -> &str {
        match self.country.as_deref() {
            Some(country) if !country.trim().is_empty() => country,
            _ => &self.location,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Replace all tags, trimming and dropping blanks and duplicates
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        self.add_tags(tags);
    }

    /// Append tags the location does not have yet, returns how many were added
    pub fn add_tags<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .filter(|tag| push_unique(&mut self.tags, tag.as_ref()))
            .count()
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Set the note; blank text clears it
    pub fn set_note(&mut self, note: &str) {
        let note = note.trim();
        self.note = if note.is_empty() { None } else { Some(note.to_string()) };
    }

    /// Flip the favorite flag, returns the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}

impl Entity for Location {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> Location {
        Location::new("1".to_string(), "Totoro Cafe".to_string(), "Setagaya, Tokyo".to_string())
    }

    #[test]
    fn test_location_creation() {
        let loc = cafe();
        assert_eq!(loc.id(), "1");
        assert!(loc.tags.is_empty());
        assert!(!loc.is_favorite);
        assert!(loc.note.is_none());
    }

    #[test]
    fn test_from_link() {
        let loc = Location::from_link("2".into(), "Shibuya Sky".into(), "https://vm.tiktok.com/x".into());
        assert_eq!(loc.source_link.as_deref(), Some("https://vm.tiktok.com/x"));
        assert!(loc.location.is_empty());
    }

    #[test]
    fn test_place_prefers_country() {
        let loc = cafe();
        assert_eq!(loc.place(), "Setagaya, Tokyo");

        let loc = loc.with_country("Japan");
        assert_eq!(loc.place(), "Japan");

        let mut loc = cafe().with_country("  ");
        assert_eq!(loc.place(), "Setagaya, Tokyo");
        loc.country = None;
        assert_eq!(loc.place(), "Setagaya, Tokyo");
    }

    #[test]
    fn test_tags_have_no_duplicates() {
        let mut loc = cafe().with_tags(["Food", "Food", " Culture ", ""]);
        assert_eq!(loc.tags, vec!["Food", "Culture"]);

        let added = loc.add_tags(["Culture", "Nightlife", "food"]);
        assert_eq!(added, 2);
        assert_eq!(loc.tags, vec!["Food", "Culture", "Nightlife", "food"]);
    }

    #[test]
    fn test_remove_tag() {
        let mut loc = cafe().with_tags(["Food", "Culture"]);
        assert!(loc.remove_tag("Food"));
        assert!(!loc.remove_tag("Food"));
        assert!(!loc.has_tag("Food"));
        assert!(loc.has_tag("Culture"));
    }

    #[test]
    fn test_note_editing() {
        let mut loc = cafe();
        loc.set_note("  try the cream puffs ");
        assert_eq!(loc.note.as_deref(), Some("try the cream puffs"));
        loc.set_note("   ");
        assert!(loc.note.is_none());
    }

    #[test]
    fn test_toggle_favorite() {
        let mut loc = cafe();
        assert!(loc.toggle_favorite());
        assert!(!loc.toggle_favorite());
    }

    #[test]
    fn test_serde_field_names() {
        let loc = cafe().with_country("Japan");
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["country"], "Japan");

        let parsed: Location = serde_json::from_str(
            r#"{"id":"9","name":"Times Square","country":"USA","category":null,
                "note":null,"imageSrc":null,"sourceLink":null,"createdAt":null,"updatedAt":null}"#,
        )
        .unwrap();
        assert!(parsed.tags.is_empty());
        assert_eq!(parsed.location, "");
    }
}
