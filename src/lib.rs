//! Empty Tomb catalog: CRUD REST façade over PostgreSQL for organizations, scripture,
//! commentary and quiz data.
//!
//! Each entity is a typed [`model::Record`]. A [`repository::Repository`] persists it, an
//! [`service::EntityService`] turns JSON bodies into repository calls, and
//! [`routes::entity_routes`] exposes those services over HTTP.

pub mod case;
pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{EnvelopeStyle, MatchPolicy, Settings};
pub use error::{ConfigError, ServiceError, StartupError, StorageError};
pub use migration::apply_migrations;
pub use repository::{PgRepository, Repository, RepositoryFactory};
pub use routes::{common_routes, common_routes_with_ready, entity_routes};
pub use service::{EntityService, ServiceOptions};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
pub use telemetry::init_tracing;

use axum::{extract::DefaultBodyLimit, Router};
use sqlx::PgPool;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full application: entity routes (under `api_prefix` when set), health routes at the
/// root, request tracing and the body size limit.
pub fn app(settings: &Settings, pool: PgPool) -> Router {
    let options = ServiceOptions {
        envelope: settings.envelope,
        match_policy: settings.match_policy,
    };
    let entities = entity_routes(&pool, options);
    let entities = if settings.api_prefix.is_empty() {
        entities
    } else {
        Router::new().nest(&settings.api_prefix, entities)
    };
    entities
        .merge(common_routes_with_ready(AppState { pool }))
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/emptytomb_unreachable")
            .unwrap()
    }

    fn settings(prefix: &str) -> Settings {
        Settings {
            api_prefix: prefix.to_string(),
            body_limit_bytes: 16,
            ..Settings::default()
        }
    }

    async fn status(app: Router, req: Request<Body>) -> StatusCode {
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn entities_mount_under_prefix_and_health_stays_at_root() {
        let app = app(&settings("/api"), lazy_pool());
        let get = |uri: &str| Request::get(uri).body(Body::empty()).unwrap();
        assert_eq!(status(app.clone(), get("/health")).await, StatusCode::OK);
        assert_eq!(status(app.clone(), get("/organization")).await, StatusCode::NOT_FOUND);
        assert_eq!(status(app, get("/api/organization/abc")).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let body = r#"{"name":"a name well past the limit"}"#;
        let req = Request::put("/organization")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        assert_eq!(
            status(app(&settings(""), lazy_pool()), req).await,
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[tokio::test]
    async fn configured_limit_above_extractor_default_is_honored() {
        let settings = Settings {
            body_limit_bytes: 10 * 1024 * 1024,
            ..Settings::default()
        };
        // Past the extractor's 2 MiB default; not JSON, so it stops at decode.
        let body = "x".repeat(3 * 1024 * 1024);
        let req = Request::put("/organization")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        assert_eq!(status(app(&settings, lazy_pool()), req).await, StatusCode::BAD_REQUEST);
    }
}
