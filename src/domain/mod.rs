//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer does no I/O.

mod entity;
mod location;
mod board;
mod tag;
mod share;
mod collate;

pub use entity::{new_id, Entity, DomainError, DomainResult};
pub(crate) use entity::require_name;
pub use location::Location;
pub use board::{recent_boards, Board, BoardSummary, DEFAULT_COVER_COLOR, RECENT_LIMIT, RECENT_WINDOW_MS};
pub use tag::{color_for, is_predefined, FALLBACK_TAG_COLOR, PREDEFINED_TAGS};
pub(crate) use tag::push_unique;
pub use share::{is_share_link, select_for_share, share_text};
pub use collate::{collate_key, distinct_tags, sort_names};
