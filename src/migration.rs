//! Schema bootstrap: one `CREATE TABLE IF NOT EXISTS` per entity, in foreign-key order.

use crate::config::{validate, EntityDef, ID_COLUMN};
use crate::error::StartupError;
use crate::sql::quoted;
use sqlx::PgPool;

/// DDL for one entity table. Foreign keys are inline `REFERENCES` clauses, so referenced
/// tables must be created first.
pub fn create_table_sql(entity: &EntityDef) -> String {
    let mut cols = vec![format!("{} SERIAL PRIMARY KEY", quoted(ID_COLUMN))];
    for c in entity.columns {
        let mut col = format!("{} {}", quoted(c.name), c.kind.pg_type());
        if let Some(target) = c.references {
            col.push_str(&format!(" REFERENCES {} ({})", quoted(target), quoted(ID_COLUMN)));
        }
        cols.push(col);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(entity.table),
        cols.join(", ")
    )
}

/// Validate the model, then create any missing table. Existing tables are left untouched.
pub async fn apply_migrations(pool: &PgPool, entities: &[&EntityDef]) -> Result<(), StartupError> {
    validate(entities)?;
    for entity in entities {
        sqlx::query(&create_table_sql(entity)).execute(pool).await?;
        tracing::debug!(table = entity.table, "table ensured");
    }
    tracing::info!(tables = entities.len(), "schema ready");
    Ok(())
}
