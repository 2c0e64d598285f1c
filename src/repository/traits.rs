//! Repository Traits
//!
//! Storage interface shared by the location and board stores. Both key
//! their rows by string ids and are backed by the one SQLite connection.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// CRUD over one kind of stored record (`Location` or `Board`)
///
/// Unknown ids are `NotFound` on update and delete, and `None` on lookup.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Store a new record; a blank id gets a fresh one, a taken id is `Conflict`
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Look a record up by id
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// Every stored record, in the store's display order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Overwrite a stored record, returning it as written
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete by id; board memberships of the record go with it
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}

/// Name search for the list screens
#[async_trait]
pub trait SearchableRepository<T: Entity>: Repository<T> {
    /// Records whose name contains `query`, ignoring case; an empty query matches all
    async fn search(&self, query: &str) -> DomainResult<Vec<T>>;
}
