//! Settlement errors.

use fidu_shared::Cents;
use fidu_shared::types::DocumentId;
use thiserror::Error;

use crate::tax::AmountError;

/// Errors raised while recording payments or settlements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Canceled documents accept no payments.
    #[error("Document {0} is canceled")]
    DocumentCanceled(DocumentId),

    /// Payment amounts must be strictly positive.
    #[error("Invalid payment amount: {0}")]
    InvalidPaymentAmount(Cents),

    /// An amount or rate could not be interpreted.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DocumentCanceled(_) => "DOCUMENT_CANCELED",
            Self::InvalidPaymentAmount(_) => "INVALID_PAYMENT_AMOUNT",
            Self::Amount(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::DocumentCanceled(_) => 409,
            Self::InvalidPaymentAmount(_) => 400,
            Self::Amount(err) => err.http_status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let id = DocumentId::new();
        assert_eq!(
            SettlementError::DocumentCanceled(id).error_code(),
            "DOCUMENT_CANCELED"
        );
        assert_eq!(
            SettlementError::from(AmountError::InvalidRate("x".into())).error_code(),
            "INVALID_RATE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        let id = DocumentId::new();
        assert_eq!(SettlementError::DocumentCanceled(id).http_status_code(), 409);
        assert_eq!(
            SettlementError::InvalidPaymentAmount(Cents::ZERO).http_status_code(),
            400
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SettlementError::InvalidPaymentAmount(Cents(-500)).to_string(),
            "Invalid payment amount: -5.00"
        );
    }
}
