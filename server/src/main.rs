//! Catalog server: loads settings, prepares the database and serves the REST API.
//!
//! Run from repo root: `cargo run -p emptytomb-server`

use emptytomb_catalog::{
    apply_migrations, app, connect, ensure_database_exists, init_tracing, model, Settings,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let settings = Settings::load()?;

    if settings.create_database {
        ensure_database_exists(&settings.database_url).await?;
    }
    let pool = connect(&settings).await?;
    if settings.run_migrations {
        apply_migrations(&pool, &model::all()).await?;
    }

    let router = app(&settings, pool.clone());
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %settings.api_prefix,
        envelope = ?settings.envelope,
        match_policy = ?settings.match_policy,
        "service initialized"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
