//! Entity re-exports.

pub use super::counterparties::Entity as Counterparties;
pub use super::documents::Entity as Documents;
pub use super::employees::Entity as Employees;
pub use super::expenses::Entity as Expenses;
pub use super::payments::Entity as Payments;
pub use super::salaries::Entity as Salaries;
