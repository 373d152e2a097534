//! Entity service: JSON in, repository call, JSON out.

use crate::codec::{decode, encode};
use crate::config::{EnvelopeStyle, MatchPolicy};
use crate::error::{ServiceError, StorageError};
use crate::model::Record;
use crate::repository::Repository;
use crate::response;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceOptions {
    pub envelope: EnvelopeStyle,
    pub match_policy: MatchPolicy,
}

pub struct EntityService<R: Record> {
    repo: Arc<dyn Repository<R>>,
    options: ServiceOptions,
}

impl<R: Record> EntityService<R> {
    pub fn new(repo: Arc<dyn Repository<R>>, options: ServiceOptions) -> Self {
        EntityService { repo, options }
    }

    /// The record as a JSON object, or JSON `null` when absent.
    pub async fn get(&self, id: i32) -> Result<String, ServiceError> {
        let row = self.repo.get(id).await.map_err(|e| self.wrap("get", e))?;
        encode(&row)
    }

    /// Every record as a JSON array; `[]` when the table is empty.
    pub async fn list(&self) -> Result<String, ServiceError> {
        let rows = self.repo.list().await.map_err(|e| self.wrap("list", e))?;
        encode(&rows)
    }

    /// Decode `body`, insert it and return the creation envelope with the new id.
    pub async fn add(&self, body: &str) -> Result<String, ServiceError> {
        let record: R = decode(body).map_err(|e| self.rejected("add", e))?;
        let id = self.repo.add(&record).await.map_err(|e| self.wrap("add", e))?;
        tracing::info!(entity = R::entity().table, id, "created");
        encode(&response::created(R::entity(), id, self.options.envelope))
    }

    /// Decode `body` and replace the row keyed by its `id`. Omitted fields are reset to
    /// their defaults.
    pub async fn update(&self, body: &str) -> Result<String, ServiceError> {
        let record: R = decode(body).map_err(|e| self.rejected("update", e))?;
        let affected = self.repo.update(&record).await.map_err(|e| self.wrap("update", e))?;
        self.check_matched("update", record.id(), affected)?;
        encode(&response::success(self.options.envelope))
    }

    pub async fn delete(&self, id: i32) -> Result<String, ServiceError> {
        let affected = self.repo.delete(id).await.map_err(|e| self.wrap("delete", e))?;
        self.check_matched("delete", id, affected)?;
        encode(&response::success(self.options.envelope))
    }

    fn check_matched(&self, op: &'static str, id: i32, affected: u64) -> Result<(), ServiceError> {
        if affected > 0 {
            return Ok(());
        }
        let table = R::entity().table;
        match self.options.match_policy {
            MatchPolicy::Lenient => {
                tracing::debug!(entity = table, op, id, "no row matched");
                Ok(())
            }
            MatchPolicy::Strict => {
                let err = ServiceError::NotFound(format!("{} {}", table, id));
                tracing::warn!(entity = table, op, reason = %err.reason(), "service failure");
                Err(err)
            }
        }
    }

    fn wrap(&self, op: &'static str, e: StorageError) -> ServiceError {
        let err = ServiceError::from(e);
        tracing::warn!(entity = R::entity().table, op, reason = %err.reason(), "service failure");
        err
    }

    fn rejected(&self, op: &'static str, err: ServiceError) -> ServiceError {
        tracing::warn!(entity = R::entity().table, op, reason = %err.reason(), "rejected request body");
        err
    }
}
