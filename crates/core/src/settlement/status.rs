//! Derived document status.

use std::str::FromStr;

use fidu_shared::Cents;
use serde::{Deserialize, Serialize};

/// Settlement progress derived from payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Nothing paid yet.
    Open,
    /// Something paid, balance remaining.
    Partial,
    /// Amount due fully covered.
    Paid,
}

impl SettlementStatus {
    /// Derives the status from the amount due and the sum of payments.
    ///
    /// A zero amount due counts as paid even without payments.
    #[must_use]
    pub fn from_amounts(amount_due: Cents, total_paid: Cents) -> Self {
        if total_paid >= amount_due {
            Self::Paid
        } else if total_paid.value() <= 0 {
            Self::Open
        } else {
            Self::Partial
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

/// Status as stored and shown for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Nothing paid yet.
    Open,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Canceled; excluded from reports and closed to payments.
    Canceled,
}

impl DocumentStatus {
    /// Canceled documents never change status again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
        }
    }
}

impl From<SettlementStatus> for DocumentStatus {
    fn from(status: SettlementStatus) -> Self {
        match status {
            SettlementStatus::Open => Self::Open,
            SettlementStatus::Partial => Self::Partial,
            SettlementStatus::Paid => Self::Paid,
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            other => Err(format!("unknown document status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100_000, 0, SettlementStatus::Open)]
    #[case(100_000, 30_000, SettlementStatus::Partial)]
    #[case(100_000, 100_000, SettlementStatus::Paid)]
    #[case(100_000, 120_000, SettlementStatus::Paid)]
    #[case(0, 0, SettlementStatus::Paid)]
    fn test_status_boundaries(
        #[case] due: i64,
        #[case] paid: i64,
        #[case] expected: SettlementStatus,
    ) {
        assert_eq!(SettlementStatus::from_amounts(Cents(due), Cents(paid)), expected);
    }

    #[test]
    fn test_document_status_parsing() {
        assert_eq!("PAID".parse::<DocumentStatus>().unwrap(), DocumentStatus::Paid);
        assert_eq!(
            "cancelled".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::Canceled
        );
        assert!("void".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_only_canceled_is_terminal() {
        assert!(DocumentStatus::Canceled.is_terminal());
        assert!(!DocumentStatus::Paid.is_terminal());
        assert_eq!(
            DocumentStatus::from(SettlementStatus::Partial),
            DocumentStatus::Partial
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Canceled).unwrap(),
            "\"canceled\""
        );
    }
}
