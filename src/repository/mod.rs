//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod location_repo;
pub mod board;


pub use traits::{Repository, SearchableRepository};
pub use db::{init_db, DbState, SharedConnection};
pub use location_repo::LocationRepository;
pub use board::{BoardLocationOperations, BoardRepository};
