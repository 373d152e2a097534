//! PostgreSQL repository. Each call checks one connection out of the pool for a single
//! auto-committed statement; the connection returns to the pool on every exit path.

use crate::config::ID_COLUMN;
use crate::error::StorageError;
use crate::model::Record;
use crate::repository::Repository;
use crate::sql::{self, bind_all};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::marker::PhantomData;

pub struct PgRepository<R> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> PgRepository<R> {
    pub fn new(pool: PgPool) -> Self {
        PgRepository {
            pool,
            _record: PhantomData,
        }
    }

    fn fail(op: &'static str) -> impl FnOnce(sqlx::Error) -> StorageError {
        move |e| {
            let err = StorageError::from(e);
            tracing::error!(entity = R::entity().table, op, error = %err, "storage failure");
            err
        }
    }
}

#[async_trait]
impl<R: Record> Repository<R> for PgRepository<R> {
    async fn get(&self, id: i32) -> Result<Option<R>, StorageError> {
        let sql = sql::select_by_id(R::entity());
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::fail("get"))?;
        row.map(|r| R::from_row(&r)).transpose().map_err(Self::fail("get"))
    }

    async fn list(&self) -> Result<Vec<R>, StorageError> {
        let sql = sql::select_list(R::entity());
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Self::fail("list"))?;
        rows.iter()
            .map(R::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Self::fail("list"))
    }

    async fn add(&self, record: &R) -> Result<i32, StorageError> {
        let entity = R::entity();
        let q = sql::insert(entity, record.bind_values());
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), q.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::fail("add"))?;
        let Some(row) = row else {
            let err = StorageError::MissingGeneratedKey { table: entity.table };
            tracing::error!(entity = entity.table, op = "add", error = %err, "storage failure");
            return Err(err);
        };
        row.try_get::<i32, _>(ID_COLUMN).map_err(Self::fail("add"))
    }

    async fn update(&self, record: &R) -> Result<u64, StorageError> {
        let q = sql::update(R::entity(), record.id(), record.bind_values());
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let done = bind_all(sqlx::query(&q.sql), q.params)
            .execute(&self.pool)
            .await
            .map_err(Self::fail("update"))?;
        Ok(done.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, StorageError> {
        let sql = sql::delete(R::entity());
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::fail("delete"))?;
        Ok(done.rows_affected())
    }
}
