//! Filter Engine
//!
//! Search and filter logic shared by every list screen: locations, boards,
//! board detail and selected locations all run through the same
//! predicate and state machine.

mod tokens;
mod matcher;
mod state;
mod view;

pub use tokens::TokenSet;
pub use matcher::{matches, matches_place, matches_query, matches_tags, Filterable};
pub use state::{suggested_tags, ChipKind, FilterChip, FilterCriteria, FilterState};
pub use view::{addable_locations, ListView};
