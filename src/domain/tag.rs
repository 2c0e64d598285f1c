//! Tag Vocabulary
//!
//! The fixed set of category tags offered in tag pickers and filter
//! suggestions, and the chip color each one renders with. User-defined
//! tags are free text and all share the fallback color.

/// Predefined tags, in the order they are offered.
///
/// "Accomodation" is spelled this way in stored data and must stay so.
pub const PREDEFINED_TAGS: [&str; 10] = [
    "Food",
    "Nature",
    "Culture",
    "Entertainment",
    "Shopping",
    "Accomodation",
    "Landmark",
    "Services",
    "Nightlife",
    "Photo Spot",
];

/// Color for any tag outside the predefined set
pub const FALLBACK_TAG_COLOR: &str = "#E5E1FF";

const TAG_COLORS: [(&str, &str); 10] = [
    ("Food", "#FFD700"),
    ("Nature", "#90EE90"),
    ("Culture", "#DEB887"),
    ("Entertainment", "#ADD8E6"),
    ("Shopping", "#FFC0CB"),
    ("Accomodation", "#F5DEB3"),
    ("Landmark", "#D8BFD8"),
    ("Services", "#8FBC8F"),
    ("Nightlife", "#A495FD"),
    ("Photo Spot", "#F4A460"),
];

/// Chip color for a tag (exact, case-sensitive lookup)
pub fn color_for(tag: &str) -> &'static str {
    TAG_COLORS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_TAG_COLOR)
}

pub fn is_predefined(tag: &str) -> bool {
    PREDEFINED_TAGS.contains(&tag)
}

/// Append `value` trimmed unless it is blank or already in `list`.
///
/// Shared by tag editing and filter tokens, which follow the same rule.
pub(crate) fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || list.iter().any(|existing| existing == value) {
        return false;
    }
    list.push(value.to_string());
    true
}
