//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod counterparty;
pub mod document;
pub mod expense;
pub mod payroll;
pub mod report;
pub mod settlement;

pub use counterparty::{
    CounterpartyError, CounterpartyRepository, CreateCounterpartyInput, UpdateCounterpartyInput,
};
pub use document::{
    CreateDocumentInput, DocumentError, DocumentFilter, DocumentRepository, DocumentWithPayments,
};
pub use expense::{
    CreateExpenseInput, ExpenseError, ExpenseFilter, ExpenseRepository, UpdateExpenseInput,
};
pub use payroll::{CreateEmployeeInput, CreateSalaryInput, PayrollRepoError, PayrollRepository};
pub use report::{ReportQueryError, ReportRepository};
pub use settlement::{SettlementOutcome, SettlementRepository};
