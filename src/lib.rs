//! Parts movement log
//!
//! Records where etched parts move between locations. Exposes the etchings
//! catalog, a submitter registry and an append-only movement log (with CSV
//! export) over a JSON API mounted at `/api`, backed by a single SQLite file.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod seed;
pub mod services;
pub mod tracing;

use axum::{http::HeaderValue, Router};
use std::{path::Path, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

// `tracing` at the crate root names the local module; reach the external crate explicitly
use ::tracing::{info, warn};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Self {
        let db = Arc::new(db);
        let services = AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// JSON API routes, relative to the `/api` prefix
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::etchings::etching_routes())
        .merge(handlers::submitters::submitter_routes())
        .merge(handlers::parts_log::parts_log_routes())
}

/// CORS from configuration: the listed origins, or permissive when none are configured
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        info!("CORS restricted to {} configured origin(s)", origins.len());
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Full application router: `/api`, `/health`, Swagger UI and, when present, static assets
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let mut router = Router::<AppState>::new()
        .nest("/api", api_routes())
        .merge(handlers::health::health_routes())
        .merge(openapi::swagger_ui());

    if let Some(dir) = state.config.static_dir.as_deref() {
        if Path::new(dir).is_dir() {
            info!("Serving static files from {}", dir);
            router = router.fallback_service(ServeDir::new(dir));
        } else {
            warn!("Static directory {} not found; static files disabled", dir);
        }
    }

    router
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
