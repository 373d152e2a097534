//! Generic CRUD contract, one instance per entity.

mod pg;
#[cfg(test)]
pub(crate) mod memory;

pub use pg::PgRepository;

use crate::error::StorageError;
use crate::model::Record;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Parameterized CRUD over one entity table. Implementations must be safe to call
/// concurrently without outside locking.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Row with `id`, or `None` when nothing matches.
    async fn get(&self, id: i32) -> Result<Option<R>, StorageError>;

    /// Every row, ordered by id. Empty table yields an empty vec.
    async fn list(&self) -> Result<Vec<R>, StorageError>;

    /// Insert all data columns of `record` (its id is ignored) and return the generated id.
    async fn add(&self, record: &R) -> Result<i32, StorageError>;

    /// Replace every data column of the row keyed by `record.id()`. Returns rows affected.
    async fn update(&self, record: &R) -> Result<u64, StorageError>;

    /// Delete the row with `id`. Returns rows affected.
    async fn delete(&self, id: i32) -> Result<u64, StorageError>;
}

/// Builds the repository for each entity when the catalog is wired.
pub trait RepositoryFactory {
    fn repository<R: Record>(&self) -> Arc<dyn Repository<R>>;
}

impl RepositoryFactory for PgPool {
    fn repository<R: Record>(&self) -> Arc<dyn Repository<R>> {
        Arc::new(PgRepository::<R>::new(self.clone()))
    }
}
