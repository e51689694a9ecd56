mod activity;
mod auth;
mod authz;
mod config;
mod db;
mod entities;
mod error;
mod filters;
mod models;
mod notify;
mod pagination;
mod rating;
mod routes;
mod storage;
#[cfg(test)]
mod testutil;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, storage::Storage};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Storage,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,kinoteka=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let storage = Storage::new(&config);

    let state = Arc::new(AppState { db, storage });

    let app = routes::router()
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
