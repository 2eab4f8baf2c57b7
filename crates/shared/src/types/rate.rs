//! Rates expressed in basis points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a rate falls outside 0..=10000 basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rate {0} bp is outside 0..=10000")]
pub struct RateOutOfRange(pub i64);

/// A rate in basis points: 1 bp = 0.01 %, 810 bp = 8.10 %.
///
/// Always within 0..=10000 (0 % to 100 %).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u32")]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Upper bound: 100 %.
    pub const MAX: u32 = 10_000;
    /// No rate.
    pub const ZERO: Self = Self(0);
    /// Standard VAT rate applied when none is given (8.1 %).
    pub const DEFAULT_TAX_RATE: Self = Self(810);

    /// Creates a rate, rejecting values above 10000 bp.
    ///
    /// # Errors
    ///
    /// Returns `RateOutOfRange` if `bp > 10000`.
    pub const fn new(bp: u32) -> Result<Self, RateOutOfRange> {
        if bp > Self::MAX {
            Err(RateOutOfRange(bp as i64))
        } else {
            Ok(Self(bp))
        }
    }

    /// Returns the raw basis points.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for BasisPoints {
    type Error = RateOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| RateOutOfRange(value))
            .and_then(Self::new)
    }
}

impl TryFrom<i32> for BasisPoints {
    type Error = RateOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<BasisPoints> for u32 {
    fn from(value: BasisPoints) -> Self {
        value.0
    }
}

impl From<BasisPoints> for i32 {
    fn from(value: BasisPoints) -> Self {
        // 10000 always fits
        value.0.cast_signed()
    }
}

impl std::fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}
