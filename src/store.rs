//! Connection provider: the bounded pool every repository draws from, plus database bootstrap.

use crate::config::Settings;
use crate::error::StorageError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Connect options for `settings`, with the server-side statement timeout applied to
/// every session.
pub fn connect_options(settings: &Settings) -> Result<PgConnectOptions, StorageError> {
    let opts = PgConnectOptions::from_str(&settings.database_url).map_err(StorageError::Unavailable)?;
    let timeout_ms = settings.statement_timeout.as_millis();
    Ok(if timeout_ms > 0 {
        opts.options([("statement_timeout", timeout_ms.to_string())])
    } else {
        opts
    })
}

/// Build the pool. Acquisition waits up to `acquire_timeout`, then fails as unavailable.
pub async fn connect(settings: &Settings) -> Result<PgPool, StorageError> {
    let opts = connect_options(settings)?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(opts)
        .await
        .map_err(StorageError::Unavailable)?;
    tracing::info!(max_connections = settings.max_connections, "database pool ready");
    Ok(pool)
}

/// Create the target database through the `postgres` maintenance database when it does
/// not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StorageError> {
    let (admin_url, db_name) = split_db_name(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url).map_err(StorageError::Unavailable)?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(StorageError::Unavailable)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (URL of the `postgres` database, target database name).
fn split_db_name(url: &str) -> (String, String) {
    let (base, rest) = match url.find("://") {
        Some(scheme_end) => {
            let after = scheme_end + 3;
            match url[after..].find('/') {
                Some(slash) => url.split_at(after + slash + 1),
                None => return (url.to_string(), String::new()),
            }
        }
        None => return (url.to_string(), String::new()),
    };
    let mut parts = rest.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let admin_url = match parts.next() {
        Some(query) => format!("{}postgres?{}", base, query),
        None => format!("{}postgres", base),
    };
    (admin_url, db_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn splits_database_name_and_keeps_query() {
        assert_eq!(
            split_db_name("postgres://u:p@host:5432/emptytomb?sslmode=disable"),
            (
                "postgres://u:p@host:5432/postgres?sslmode=disable".to_string(),
                "emptytomb".to_string()
            )
        );
        assert_eq!(
            split_db_name("postgres://localhost/emptytomb"),
            ("postgres://localhost/postgres".to_string(), "emptytomb".to_string())
        );
        assert_eq!(split_db_name("postgres://localhost").1, "");
    }

    #[test]
    fn statement_timeout_is_optional() {
        let mut settings = Settings::default();
        assert!(connect_options(&settings).is_ok());
        settings.statement_timeout = Duration::ZERO;
        assert!(connect_options(&settings).is_ok());
        settings.database_url = "not a url".into();
        assert!(matches!(connect_options(&settings), Err(StorageError::Unavailable(_))));
    }
}
