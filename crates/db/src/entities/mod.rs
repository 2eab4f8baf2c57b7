//! `SeaORM` entity definitions.

pub mod prelude;

pub mod counterparties;
pub mod documents;
pub mod employees;
pub mod expenses;
pub mod payments;
pub mod salaries;
pub mod sea_orm_active_enums;
