//! Board Entity
//!
//! A user-curated collection of locations. Membership lives in the
//! `board_location` join table; the board never owns its locations.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::location::Location;

/// Cover used when a board is created without an image
pub const DEFAULT_COVER_COLOR: &str = "#D1D5DB";

/// How far back a board counts as recently opened
pub const RECENT_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Recent boards shown when picking a board for new locations
pub const RECENT_LIMIT: usize = 3;

/// A board with its member locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    /// Image reference or color token
    pub cover_image: String,
    /// Creating user
    pub owner: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub last_accessed: Option<i64>,
    pub created_at: Option<i64>,
}

impl Board {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            cover_image: DEFAULT_COVER_COLOR.to_string(),
            owner: None,
            locations: Vec::new(),
            last_accessed: None,
            created_at: None,
        }
    }

    /// Set the cover, falling back to the default color when blank
    pub fn set_cover(&mut self, cover: Option<&str>) {
        self.cover_image = match cover.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => DEFAULT_COVER_COLOR.to_string(),
        };
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn contains(&self, location_id: &str) -> bool {
        self.locations.iter().any(|l| l.id == location_id)
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            cover_image: self.cover_image.clone(),
            location_count: self.location_count(),
            last_accessed: self.last_accessed,
        }
    }
}

impl Entity for Board {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Board row for list screens, without member locations loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
    pub cover_image: String,
    pub location_count: usize,
    pub last_accessed: Option<i64>,
}

impl BoardSummary {
    /// "1 location" / "3 locations"
    pub fn count_label(&self) -> String {
        if self.location_count == 1 {
            "1 location".to_string()
        } else {
            format!("{} locations", self.location_count)
        }
    }
}

/// Boards opened within the last week, newest first, at most `limit`
pub fn recent_boards(boards: &[BoardSummary], now_ms: i64, limit: usize) -> Vec<&BoardSummary> {
    let cutoff = now_ms - RECENT_WINDOW_MS;
    let mut recent: Vec<&BoardSummary> = boards
        .iter()
        .filter(|b| b.last_accessed.map_or(false, |ts| ts > cutoff))
        .collect();
    recent.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));
    recent.truncate(limit);
    recent
}
