//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;
pub mod rate;

pub use id::*;
pub use money::Cents;
pub use pagination::{PageRequest, PageResponse};
pub use rate::{BasisPoints, RateOutOfRange};
