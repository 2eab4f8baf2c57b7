//! Core business logic for Fidu.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All money is integer cents and all rates are basis points.
//!
//! # Modules
//!
//! - `tax` - Gross/net/VAT split and amount parsing
//! - `settlement` - Payment status, outstanding balance and lateness
//! - `discount` - Early-payment discounts and negotiated settlements
//! - `reports` - Receivables, payables and VAT aggregation
//! - `payroll` - Gross-to-net salary arithmetic

pub mod discount;
pub mod payroll;
pub mod reports;
pub mod settlement;
pub mod tax;
