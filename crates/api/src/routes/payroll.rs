//! Employee and salary routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use fidu_db::entities::{employees, salaries};
use fidu_db::repositories::{CreateEmployeeInput, CreateSalaryInput, PayrollRepository};
use fidu_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    money::{AmountInput, Money},
};

/// Creates the payroll routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/{id}/deactivate", post(deactivate_employee))
        .route(
            "/employees/{id}/salaries",
            get(list_salaries).post(create_salary),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing employees.
#[derive(Debug, Deserialize)]
pub struct ListEmployeesQuery {
    /// Include deactivated employees.
    #[serde(default)]
    pub include_inactive: bool,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating an employee.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Full name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
}

/// Request body for recording a salary.
#[derive(Debug, Deserialize)]
pub struct CreateSalaryRequest {
    /// Any day of the salary month.
    pub period: NaiveDate,
    /// Gross salary.
    pub gross: AmountInput,
    /// Social charges and withholdings; zero when omitted.
    pub deductions: Option<AmountInput>,
    /// Payout date.
    pub paid_on: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Response for an employee.
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    /// Employee ID.
    pub id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Whether salaries can still be recorded.
    pub is_active: bool,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(m: employees::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            is_active: m.is_active,
        }
    }
}

/// Response for a salary.
#[derive(Debug, Serialize)]
pub struct SalaryResponse {
    /// Salary ID.
    pub id: Uuid,
    /// Employee ID.
    pub employee_id: Uuid,
    /// First day of the salary month.
    pub period: NaiveDate,
    /// Gross salary.
    pub gross: Money,
    /// Deductions.
    pub deductions: Money,
    /// Net pay.
    pub net: Money,
    /// Payout date.
    pub paid_on: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl From<salaries::Model> for SalaryResponse {
    fn from(m: salaries::Model) -> Self {
        Self {
            id: m.id,
            employee_id: m.employee_id,
            period: m.period,
            gross: m.gross_cents.into(),
            deductions: m.deductions_cents.into(),
            net: m.net_cents.into(),
            paid_on: m.paid_on,
            notes: m.notes,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/employees`.
async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<PageResponse<EmployeeResponse>>, ApiError> {
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let repo = PayrollRepository::new((*state.db).clone());
    let result = repo.list_employees(query.include_inactive, &page).await?;
    Ok(Json(result.map(EmployeeResponse::from)))
}

/// POST `/employees`.
async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = PayrollRepository::new((*state.db).clone());
    let created = repo
        .create_employee(CreateEmployeeInput {
            full_name: payload.full_name,
            email: payload.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(created))))
}

/// POST `/employees/{id}/deactivate`.
async fn deactivate_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let repo = PayrollRepository::new((*state.db).clone());
    Ok(Json(repo.deactivate_employee(id).await?.into()))
}

/// GET `/employees/{id}/salaries`.
async fn list_salaries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SalaryResponse>>, ApiError> {
    let repo = PayrollRepository::new((*state.db).clone());
    let rows = repo.list_salaries(id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST `/employees/{id}/salaries`.
async fn create_salary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateSalaryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let deductions = match &payload.deductions {
        Some(amount) => amount.cents()?,
        None => fidu_shared::Cents::ZERO,
    };
    let input = CreateSalaryInput {
        period: payload.period,
        gross: payload.gross.cents()?,
        deductions,
        paid_on: payload.paid_on,
        notes: payload.notes,
    };

    let repo = PayrollRepository::new((*state.db).clone());
    let created = repo.create_salary(id, input).await?;

    Ok((StatusCode::CREATED, Json(SalaryResponse::from(created))))
}
