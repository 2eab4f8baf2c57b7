//! Salary arithmetic.

pub mod salary;

pub use salary::{PayrollError, SalaryBreakdown};
