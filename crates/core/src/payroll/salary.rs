//! Gross-to-net salary breakdown.

use fidu_shared::Cents;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while computing a salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayrollError {
    /// Gross salary or deductions below zero.
    #[error("Salary amounts cannot be negative")]
    NegativeAmount,

    /// Deductions larger than the gross salary.
    #[error("Deductions {deductions} exceed gross salary {gross}")]
    DeductionsExceedGross {
        /// Gross salary.
        gross: Cents,
        /// Total deductions.
        deductions: Cents,
    },
}

impl PayrollError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::DeductionsExceedGross { .. } => "DEDUCTIONS_EXCEED_GROSS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NegativeAmount => 400,
            Self::DeductionsExceedGross { .. } => 422,
        }
    }
}

/// Gross salary, total deductions and the resulting net pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Gross salary.
    pub gross: Cents,
    /// Social charges and withholdings.
    pub deductions: Cents,
    /// Paid out amount.
    pub net: Cents,
}

impl SalaryBreakdown {
    /// Computes `net = gross - deductions`.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount is negative or deductions exceed gross.
    pub fn new(gross: Cents, deductions: Cents) -> Result<Self, PayrollError> {
        if gross.is_negative() || deductions.is_negative() {
            return Err(PayrollError::NegativeAmount);
        }
        if deductions > gross {
            return Err(PayrollError::DeductionsExceedGross { gross, deductions });
        }

        Ok(Self {
            gross,
            deductions,
            net: gross - deductions,
        })
    }
}
