//! Board Repository Module
//!
//! - board_repo: Core CRUD operations and list summaries
//! - board_location: Board-Location relationship operations

mod board_repo;
mod board_location;

pub use board_repo::BoardRepository;

// Re-export the operation trait so it can be used by importing BoardRepository
pub use board_location::BoardLocationOperations;
