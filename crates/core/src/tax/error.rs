//! Errors raised while interpreting amounts and rates.

use thiserror::Error;

/// Input could not be turned into cents or basis points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The text is not a non-negative amount resolving to whole cents.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The rate is unparseable or outside 0..=10000 bp.
    #[error("Invalid rate: {0}")]
    InvalidRate(String),
}

impl AmountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidRate(_) => "INVALID_RATE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<fidu_shared::RateOutOfRange> for AmountError {
    fn from(err: fidu_shared::RateOutOfRange) -> Self {
        Self::InvalidRate(err.to_string())
    }
}
