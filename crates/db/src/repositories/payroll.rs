//! Employee and salary repository.

use chrono::{Datelike, NaiveDate, Utc};
use fidu_core::payroll::{PayrollError, SalaryBreakdown};
use fidu_shared::Cents;
use fidu_shared::types::{EmployeeId, PageRequest, PageResponse, SalaryId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{employees, salaries};

/// Error types for payroll operations.
#[derive(Debug, thiserror::Error)]
pub enum PayrollRepoError {
    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(Uuid),

    /// Employee is deactivated.
    #[error("Employee is inactive: {0}")]
    EmployeeInactive(Uuid),

    /// Name is blank.
    #[error("Employee name cannot be empty")]
    EmptyName,

    /// A salary already exists for that month.
    #[error("Salary for {period} already recorded for employee {employee_id}")]
    DuplicatePeriod {
        /// Employee ID.
        employee_id: Uuid,
        /// First day of the month.
        period: NaiveDate,
    },

    /// Amounts rejected.
    #[error(transparent)]
    Payroll(#[from] PayrollError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for hiring an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Full name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
}

/// Input for recording a monthly salary.
#[derive(Debug, Clone)]
pub struct CreateSalaryInput {
    /// Any day of the month the salary is for.
    pub period: NaiveDate,
    /// Gross salary.
    pub gross: Cents,
    /// Social charges and withholdings.
    pub deductions: Cents,
    /// Payout date.
    pub paid_on: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Payroll repository.
#[derive(Debug, Clone)]
pub struct PayrollRepository {
    db: DatabaseConnection,
}

impl PayrollRepository {
    /// Creates a new payroll repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active employee.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` or a database error.
    pub async fn create_employee(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<employees::Model, PayrollRepoError> {
        let full_name = input.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(PayrollRepoError::EmptyName);
        }

        let now = Utc::now().into();
        let model = employees::ActiveModel {
            id: Set(EmployeeId::new().into_inner()),
            full_name: Set(full_name),
            email: Set(input.email),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(employee_id = %model.id, "employee created");
        Ok(model)
    }

    /// Finds an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no such employee exists.
    pub async fn find_employee(&self, id: Uuid) -> Result<employees::Model, PayrollRepoError> {
        employees::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PayrollRepoError::EmployeeNotFound(id))
    }

    /// Lists employees by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_employees(
        &self,
        include_inactive: bool,
        page: &PageRequest,
    ) -> Result<PageResponse<employees::Model>, PayrollRepoError> {
        let page = page.clamped();
        let mut query = employees::Entity::find();
        if !include_inactive {
            query = query.filter(employees::Column::IsActive.eq(true));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(employees::Column::FullName)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Marks an employee inactive. Salary history is kept.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or a database error.
    pub async fn deactivate_employee(&self, id: Uuid) -> Result<employees::Model, PayrollRepoError> {
        let existing = self.find_employee(id).await?;
        if !existing.is_active {
            return Ok(existing);
        }

        let mut active: employees::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;

        info!(employee_id = %id, "employee deactivated");
        Ok(updated)
    }

    /// Records the salary of one month for an active employee.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound`, `EmployeeInactive`, `DuplicatePeriod`,
    /// an amount error, or a database error.
    pub async fn create_salary(
        &self,
        employee_id: Uuid,
        input: CreateSalaryInput,
    ) -> Result<salaries::Model, PayrollRepoError> {
        let breakdown = SalaryBreakdown::new(input.gross, input.deductions)?;
        let employee = self.find_employee(employee_id).await?;
        if !employee.is_active {
            return Err(PayrollRepoError::EmployeeInactive(employee_id));
        }

        let period = first_of_month(input.period);
        let model = salaries::ActiveModel {
            id: Set(SalaryId::new().into_inner()),
            employee_id: Set(employee_id),
            period: Set(period),
            gross_cents: Set(breakdown.gross.value()),
            deductions_cents: Set(breakdown.deductions.value()),
            net_cents: Set(breakdown.net.value()),
            paid_on: Set(input.paid_on),
            notes: Set(input.notes),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => PayrollRepoError::DuplicatePeriod {
                employee_id,
                period,
            },
            _ => PayrollRepoError::Database(err),
        })?;

        info!(
            employee_id = %employee_id,
            salary_id = %model.id,
            %period,
            net_cents = model.net_cents,
            "salary recorded"
        );
        Ok(model)
    }

    /// Lists the salaries of an employee, newest period first.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or a database error.
    pub async fn list_salaries(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<salaries::Model>, PayrollRepoError> {
        self.find_employee(employee_id).await?;

        Ok(salaries::Entity::find()
            .filter(salaries::Column::EmployeeId.eq(employee_id))
            .order_by_desc(salaries::Column::Period)
            .all(&self.db)
            .await?)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
