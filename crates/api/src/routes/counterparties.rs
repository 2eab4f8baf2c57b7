//! Client and supplier routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use fidu_db::entities::{counterparties, sea_orm_active_enums::CounterpartyKind};
use fidu_db::repositories::{
    CounterpartyRepository, CreateCounterpartyInput, UpdateCounterpartyInput,
};
use fidu_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Creates the counterparty routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/counterparties/{id}",
            get(get_counterparty)
                .put(update_counterparty)
                .delete(delete_counterparty),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a client or supplier.
#[derive(Debug, Deserialize)]
pub struct CreateCounterpartyRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for updating a counterparty.
///
/// An absent field is left unchanged; an explicit `null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCounterpartyRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    /// New address.
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    /// New notes.
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// Distinguishes `null` (`Some(None)`) from an absent field (`None`).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response for a counterparty.
#[derive(Debug, Serialize)]
pub struct CounterpartyResponse {
    /// Counterparty ID.
    pub id: Uuid,
    /// `client` or `supplier`.
    pub kind: CounterpartyKind,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<counterparties::Model> for CounterpartyResponse {
    fn from(m: counterparties::Model) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            name: m.name,
            email: m.email,
            address: m.address,
            notes: m.notes,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn list_clients(
    state: State<AppState>,
    query: Query<PageRequest>,
) -> Result<Json<PageResponse<CounterpartyResponse>>, ApiError> {
    list_kind(state, CounterpartyKind::Client, query).await
}

async fn list_suppliers(
    state: State<AppState>,
    query: Query<PageRequest>,
) -> Result<Json<PageResponse<CounterpartyResponse>>, ApiError> {
    list_kind(state, CounterpartyKind::Supplier, query).await
}

async fn create_client(
    state: State<AppState>,
    payload: Json<CreateCounterpartyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    create_kind(state, CounterpartyKind::Client, payload).await
}

async fn create_supplier(
    state: State<AppState>,
    payload: Json<CreateCounterpartyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    create_kind(state, CounterpartyKind::Supplier, payload).await
}

async fn list_kind(
    State(state): State<AppState>,
    kind: CounterpartyKind,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<CounterpartyResponse>>, ApiError> {
    let repo = CounterpartyRepository::new((*state.db).clone());
    let page = repo.list(kind, &page).await?;
    Ok(Json(page.map(CounterpartyResponse::from)))
}

async fn create_kind(
    State(state): State<AppState>,
    kind: CounterpartyKind,
    Json(payload): Json<CreateCounterpartyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CounterpartyRepository::new((*state.db).clone());
    let created = repo
        .create(CreateCounterpartyInput {
            kind,
            name: payload.name,
            email: payload.email,
            address: payload.address,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CounterpartyResponse::from(created))))
}

/// GET `/counterparties/{id}`.
async fn get_counterparty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CounterpartyResponse>, ApiError> {
    let repo = CounterpartyRepository::new((*state.db).clone());
    Ok(Json(repo.find_by_id(id).await?.into()))
}

/// PUT `/counterparties/{id}`.
async fn update_counterparty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCounterpartyRequest>,
) -> Result<Json<CounterpartyResponse>, ApiError> {
    let repo = CounterpartyRepository::new((*state.db).clone());
    let updated = repo
        .update(
            id,
            UpdateCounterpartyInput {
                name: payload.name,
                email: payload.email,
                address: payload.address,
                notes: payload.notes,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE `/counterparties/{id}`.
async fn delete_counterparty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CounterpartyRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: UpdateCounterpartyRequest =
            serde_json::from_str(r#"{"email": null, "notes": "VIP"}"#).unwrap();
        assert_eq!(req.email, Some(None));
        assert_eq!(req.notes, Some(Some("VIP".to_string())));
        assert_eq!(req.address, None);
        assert_eq!(req.name, None);
    }
}
