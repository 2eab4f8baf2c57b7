//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - JSON request/response types with amounts as cents plus display strings
//! - Mapping of domain errors to HTTP responses

pub mod error;
pub mod money;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderName;
use chrono::{NaiveDate, Utc};
use fidu_shared::config::BillingConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Tax rate and payment terms defaults.
    pub billing: Arc<BillingConfig>,
}

impl AppState {
    /// Creates the state from a connection and the billing settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, billing: BillingConfig) -> Self {
        Self {
            db: Arc::new(db),
            billing: Arc::new(billing),
        }
    }

    /// Business date used when a request omits one.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
