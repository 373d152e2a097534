//! In-memory repository for service and route tests.

use crate::error::StorageError;
use crate::model::Record;
use crate::repository::{Repository, RepositoryFactory};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub struct MemoryRepository<R> {
    rows: Mutex<(i32, BTreeMap<i32, R>)>,
    /// When set, every call fails with a fresh error from this constructor.
    failure: Option<fn() -> StorageError>,
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        MemoryRepository {
            rows: Mutex::new((0, BTreeMap::new())),
            failure: None,
        }
    }
}

impl<R> MemoryRepository<R> {
    pub fn failing(failure: fn() -> StorageError) -> Self {
        MemoryRepository {
            failure: Some(failure),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        match self.failure {
            Some(f) => Err(f()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
    async fn get(&self, id: i32) -> Result<Option<R>, StorageError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().1.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<R>, StorageError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().1.values().cloned().collect())
    }

    async fn add(&self, record: &R) -> Result<i32, StorageError> {
        self.check()?;
        let mut guard = self.rows.lock().unwrap();
        guard.0 += 1;
        let id = guard.0;
        let mut row = record.clone();
        row.set_id(id);
        guard.1.insert(id, row);
        Ok(id)
    }

    async fn update(&self, record: &R) -> Result<u64, StorageError> {
        self.check()?;
        let mut guard = self.rows.lock().unwrap();
        match guard.1.get_mut(&record.id()) {
            Some(row) => {
                *row = record.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, StorageError> {
        self.check()?;
        Ok(u64::from(self.rows.lock().unwrap().1.remove(&id).is_some()))
    }
}

/// Hands every entity a fresh, empty [`MemoryRepository`].
pub struct MemoryFactory;

impl RepositoryFactory for MemoryFactory {
    fn repository<R: Record>(&self) -> Arc<dyn Repository<R>> {
        Arc::new(MemoryRepository::<R>::default())
    }
}
