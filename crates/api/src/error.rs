//! Mapping of domain and repository errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fidu_core::payroll::PayrollError;
use fidu_core::reports::ReportError;
use fidu_core::settlement::SettlementError;
use fidu_core::tax::AmountError;
use fidu_db::repositories::{
    CounterpartyError, DocumentError, ExpenseError, PayrollRepoError, ReportQueryError,
};
use fidu_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// An error rendered as `{"error": CODE, "message": text}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status and code.
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 with the given code.
    #[must_use]
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    /// 404 with the given code.
    #[must_use]
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    fn from_code(status: u16, code: &'static str, message: String) -> Self {
        Self::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message,
        )
    }

    fn internal(err: &impl std::fmt::Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            error!(code = self.code, error = %self.message, "request failed");
            "An error occurred".to_string()
        } else {
            self.message
        };

        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<AmountError> for ApiError {
    fn from(err: AmountError) -> Self {
        Self::from_code(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        Self::from_code(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<PayrollError> for ApiError {
    fn from(err: PayrollError) -> Self {
        Self::from_code(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self::from_code(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::from_code(err.status_code(), err.error_code(), err.to_string())
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::internal(&err)
    }
}

impl From<CounterpartyError> for ApiError {
    fn from(err: CounterpartyError) -> Self {
        let message = err.to_string();
        match err {
            CounterpartyError::NotFound(_) => Self::not_found("COUNTERPARTY_NOT_FOUND", message),
            CounterpartyError::EmptyName => Self::bad_request("EMPTY_NAME", message),
            CounterpartyError::InUse { .. } => {
                Self::new(StatusCode::CONFLICT, "COUNTERPARTY_IN_USE", message)
            }
            CounterpartyError::Database(e) => Self::from(e),
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        let message = err.to_string();
        match err {
            DocumentError::NotFound(_) => Self::not_found("DOCUMENT_NOT_FOUND", message),
            DocumentError::CounterpartyNotFound(_) => {
                Self::bad_request("COUNTERPARTY_NOT_FOUND", message)
            }
            DocumentError::CounterpartyKindMismatch { .. } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "COUNTERPARTY_KIND_MISMATCH",
                message,
            ),
            DocumentError::DuplicateNumber(_) => {
                Self::new(StatusCode::CONFLICT, "DUPLICATE_NUMBER", message)
            }
            DocumentError::EmptyNumber => Self::bad_request("EMPTY_NUMBER", message),
            DocumentError::DueBeforeIssue { .. } => Self::bad_request("INVALID_DUE_DATE", message),
            DocumentError::Amount(e) => Self::from(e),
            DocumentError::Settlement(e) => Self::from(e),
            DocumentError::Database(e) => Self::from(e),
        }
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        let message = err.to_string();
        match err {
            ExpenseError::NotFound(_) => Self::not_found("EXPENSE_NOT_FOUND", message),
            ExpenseError::EmptyVendor => Self::bad_request("EMPTY_VENDOR", message),
            ExpenseError::InvalidDateRange { .. } => {
                Self::bad_request("INVALID_DATE_RANGE", message)
            }
            ExpenseError::Amount(e) => Self::from(e),
            ExpenseError::Database(e) => Self::from(e),
        }
    }
}

impl From<PayrollRepoError> for ApiError {
    fn from(err: PayrollRepoError) -> Self {
        let message = err.to_string();
        match err {
            PayrollRepoError::EmployeeNotFound(_) => {
                Self::not_found("EMPLOYEE_NOT_FOUND", message)
            }
            PayrollRepoError::EmployeeInactive(_) => {
                Self::new(StatusCode::CONFLICT, "EMPLOYEE_INACTIVE", message)
            }
            PayrollRepoError::EmptyName => Self::bad_request("EMPTY_NAME", message),
            PayrollRepoError::DuplicatePeriod { .. } => {
                Self::new(StatusCode::CONFLICT, "DUPLICATE_PERIOD", message)
            }
            PayrollRepoError::Payroll(e) => Self::from(e),
            PayrollRepoError::Database(e) => Self::from(e),
        }
    }
}

impl From<ReportQueryError> for ApiError {
    fn from(err: ReportQueryError) -> Self {
        match err {
            ReportQueryError::Report(e) => Self::from(e),
            ReportQueryError::Database(e) => Self::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidu_shared::Cents;
    use fidu_shared::types::DocumentId;

    #[test]
    fn test_settlement_errors_keep_domain_status() {
        let canceled: ApiError = SettlementError::DocumentCanceled(DocumentId::new()).into();
        assert_eq!(canceled.status(), StatusCode::CONFLICT);
        assert_eq!(canceled.code(), "DOCUMENT_CANCELED");

        let amount: ApiError = SettlementError::InvalidPaymentAmount(Cents(-5)).into();
        assert_eq!(amount.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let err: ApiError = DocumentError::NotFound(uuid::Uuid::now_v7()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "DOCUMENT_NOT_FOUND");
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err: ApiError = DocumentError::Database(DbErr::Custom("boom".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
