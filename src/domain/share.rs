//! Share Text and Link Capture
//!
//! Plain-text formatting for sharing locations, and validation of links
//! pasted in to extract new locations from.

use once_cell::sync::Lazy;
use regex::Regex;

use super::location::Location;

static SHARE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("share link pattern is valid"));

/// One `name\nlocation` block per location, separated by a blank line
pub fn share_text<'a, I>(locations: I) -> String
where
    I: IntoIterator<Item = &'a Location>,
{
    locations
        .into_iter()
        .map(|loc| format!("{}\n{}", loc.name, loc.location))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Locations from `locations` whose id is in `selected`, in list order
pub fn select_for_share<'a>(locations: &'a [Location], selected: &[String]) -> Vec<&'a Location> {
    locations
        .iter()
        .filter(|loc| selected.iter().any(|id| *id == loc.id))
        .collect()
}

/// Whether pasted text looks like an http(s) link worth submitting
pub fn is_share_link(text: &str) -> bool {
    SHARE_LINK.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: &str, name: &str, place: &str) -> Location {
        Location::new(id.to_string(), name.to_string(), place.to_string())
    }

    #[test]
    fn test_share_text() {
        let locations = vec![
            loc("1", "Totoro Cafe", "Setagaya, Tokyo"),
            loc("2", "Times Square", "Manhattan, NY"),
        ];
        assert_eq!(
            share_text(&locations),
            "Totoro Cafe\nSetagaya, Tokyo\n\nTimes Square\nManhattan, NY"
        );
        assert_eq!(share_text(&Vec::<Location>::new()), "");
    }

    #[test]
    fn test_select_for_share_keeps_list_order() {
        let locations = vec![loc("1", "A", ""), loc("2", "B", ""), loc("3", "C", "")];
        let picked = select_for_share(&locations, &["3".to_string(), "1".to_string()]);
        let names: Vec<&str> = picked.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_is_share_link() {
        assert!(is_share_link("https://vm.tiktok.com/ZMabc123/"));
        assert!(is_share_link("  http://example.com/video?id=1 "));
        assert!(!is_share_link(""));
        assert!(!is_share_link("   "));
        assert!(!is_share_link("tiktok.com/abc"));
        assert!(!is_share_link("https://exa mple.com"));
    }
}
