//! Receivables, payables and VAT report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use fidu_core::reports::{AgingBuckets, ReceivablesReport, VatSummary, VatTotals};
use fidu_db::entities::sea_orm_active_enums::DocumentKind;
use fidu_db::repositories::ReportRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError, money::Money};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/receivables", get(get_receivables))
        .route("/reports/payables", get(get_payables))
        .route("/reports/vat", get(get_vat_summary))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for balance reports.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// Reference date; today when omitted.
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for the VAT report.
#[derive(Debug, Deserialize)]
pub struct VatQuery {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}

/// Aging buckets of outstanding amounts.
#[derive(Debug, Serialize)]
pub struct AgingResponse {
    /// Not yet due.
    pub current: Money,
    /// 1 to 30 days late.
    pub days_1_30: Money,
    /// 31 to 60 days late.
    pub days_31_60: Money,
    /// 61 to 90 days late.
    pub days_61_90: Money,
    /// More than 90 days late.
    pub over_90: Money,
}

impl From<AgingBuckets> for AgingResponse {
    fn from(a: AgingBuckets) -> Self {
        Self {
            current: a.current.into(),
            days_1_30: a.days_1_30.into(),
            days_31_60: a.days_31_60.into(),
            days_61_90: a.days_61_90.into(),
            over_90: a.over_90.into(),
        }
    }
}

/// One counterparty row of a balance report.
#[derive(Debug, Serialize)]
pub struct CounterpartyBalanceResponse {
    /// Counterparty ID.
    pub counterparty_id: Uuid,
    /// Display name.
    pub name: String,
    /// Documents with a balance.
    pub open_documents: u32,
    /// Total outstanding.
    pub outstanding: Money,
    /// Outstanding past due.
    pub overdue: Money,
    /// Days late of the oldest overdue document.
    pub max_days_late: i64,
}

/// Receivables or payables report.
#[derive(Debug, Serialize)]
pub struct BalanceReportResponse {
    /// Reference date.
    pub as_of: NaiveDate,
    /// Rows, largest balance first.
    pub counterparties: Vec<CounterpartyBalanceResponse>,
    /// Total outstanding.
    pub total_outstanding: Money,
    /// Total overdue.
    pub total_overdue: Money,
    /// Documents with a balance.
    pub open_documents: u32,
    /// Outstanding by lateness.
    pub aging: AgingResponse,
}

impl From<ReceivablesReport> for BalanceReportResponse {
    fn from(r: ReceivablesReport) -> Self {
        Self {
            as_of: r.as_of,
            counterparties: r
                .counterparties
                .into_iter()
                .map(|c| CounterpartyBalanceResponse {
                    counterparty_id: c.counterparty_id.into_inner(),
                    name: c.name,
                    open_documents: c.open_documents,
                    outstanding: c.outstanding.into(),
                    overdue: c.overdue.into(),
                    max_days_late: c.max_days_late,
                })
                .collect(),
            total_outstanding: r.total_outstanding.into(),
            total_overdue: r.total_overdue.into(),
            open_documents: r.open_documents,
            aging: r.aging.into(),
        }
    }
}

/// Totals of one side of the VAT report.
#[derive(Debug, Serialize)]
pub struct VatTotalsResponse {
    /// Lines counted.
    pub count: u32,
    /// Net total.
    pub net: Money,
    /// VAT total.
    pub tax: Money,
    /// Gross total.
    pub gross: Money,
}

impl From<VatTotals> for VatTotalsResponse {
    fn from(t: VatTotals) -> Self {
        Self {
            count: t.count,
            net: t.net.into(),
            tax: t.tax.into(),
            gross: t.gross.into(),
        }
    }
}

/// VAT report of a period.
#[derive(Debug, Serialize)]
pub struct VatSummaryResponse {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// VAT on invoices.
    pub collected: VatTotalsResponse,
    /// VAT on expenses.
    pub deductible: VatTotalsResponse,
    /// Collected minus deductible; negative means a refund.
    pub vat_payable: Money,
}

impl From<VatSummary> for VatSummaryResponse {
    fn from(s: VatSummary) -> Self {
        Self {
            from: s.from,
            to: s.to,
            collected: s.collected.into(),
            deductible: s.deductible.into(),
            vat_payable: s.vat_payable.into(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/reports/receivables` - What clients owe.
async fn get_receivables(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceReportResponse>, ApiError> {
    balance_report(&state, DocumentKind::Invoice, query.as_of).await
}

/// GET `/reports/payables` - What is owed to suppliers.
async fn get_payables(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceReportResponse>, ApiError> {
    balance_report(&state, DocumentKind::Bill, query.as_of).await
}

async fn balance_report(
    state: &AppState,
    kind: DocumentKind,
    as_of: Option<NaiveDate>,
) -> Result<Json<BalanceReportResponse>, ApiError> {
    let as_of = as_of.unwrap_or_else(|| state.today());
    let repo = ReportRepository::new((*state.db).clone());
    Ok(Json(repo.outstanding(kind, as_of).await?.into()))
}

/// GET `/reports/vat?from=&to=`.
async fn get_vat_summary(
    State(state): State<AppState>,
    Query(query): Query<VatQuery>,
) -> Result<Json<VatSummaryResponse>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    Ok(Json(repo.vat_summary(query.from, query.to).await?.into()))
}
