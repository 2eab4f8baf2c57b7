//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod counterparties;
pub mod documents;
pub mod expenses;
pub mod health;
pub mod payroll;
pub mod reports;
pub mod settlement;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(counterparties::routes())
        .merge(documents::routes())
        .merge(settlement::routes())
        .merge(expenses::routes())
        .merge(payroll::routes())
        .merge(reports::routes())
}
