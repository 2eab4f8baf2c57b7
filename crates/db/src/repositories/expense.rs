//! Expense repository.

use chrono::{NaiveDate, Utc};
use fidu_core::tax::{AmountError, split_gross_to_net_and_tax};
use fidu_shared::types::{ExpenseId, PageRequest, PageResponse};
use fidu_shared::{BasisPoints, Cents};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{expenses, sea_orm_active_enums::ExpenseCategory};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(Uuid),

    /// Vendor is blank.
    #[error("Expense vendor cannot be empty")]
    EmptyVendor,

    /// Start of the range is after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Amount or rate rejected.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Date the money was spent.
    pub spent_on: NaiveDate,
    /// Vendor or label.
    pub vendor: String,
    /// Category tag.
    pub category: ExpenseCategory,
    /// VAT rate.
    pub tax_rate: BasisPoints,
    /// Tax-inclusive total.
    pub gross: Cents,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Opaque pointer to a stored receipt.
    pub receipt_key: Option<String>,
}

/// Input for editing an expense. `None` leaves a field unchanged.
///
/// Changing either `gross` or `tax_rate` re-splits net and VAT.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    /// New date.
    pub spent_on: Option<NaiveDate>,
    /// New vendor.
    pub vendor: Option<String>,
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New VAT rate.
    pub tax_rate: Option<BasisPoints>,
    /// New gross amount.
    pub gross: Option<Cents>,
    /// New notes; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
    /// New receipt pointer; `Some(None)` clears it.
    pub receipt_key: Option<Option<String>>,
}

/// Filter options for listing expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    /// First day, inclusive.
    pub from: Option<NaiveDate>,
    /// Last day, inclusive.
    pub to: Option<NaiveDate>,
    /// Only this category.
    pub category: Option<ExpenseCategory>,
}

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense, splitting its gross amount into net and VAT.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor is blank, the gross amount is
    /// negative, or the insert fails.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<expenses::Model, ExpenseError> {
        let vendor = non_blank(&input.vendor)?;
        let gross = non_negative(input.gross)?;
        let split = split_gross_to_net_and_tax(gross, input.tax_rate);
        let now = Utc::now().into();

        let model = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            spent_on: Set(input.spent_on),
            vendor: Set(vendor),
            category: Set(input.category),
            tax_rate_bp: Set(i32::from(input.tax_rate)),
            gross_cents: Set(split.gross.value()),
            net_cents: Set(split.net.value()),
            tax_cents: Set(split.tax.value()),
            notes: Set(input.notes),
            receipt_key: Set(input.receipt_key),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(
            expense_id = %model.id,
            gross_cents = model.gross_cents,
            tax_cents = model.tax_cents,
            "expense recorded"
        );
        Ok(model)
    }

    /// Finds an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such expense exists.
    pub async fn find_by_id(&self, id: Uuid) -> Result<expenses::Model, ExpenseError> {
        expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    /// Lists expenses, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or a database error.
    pub async fn list(
        &self,
        filter: ExpenseFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<expenses::Model>, ExpenseError> {
        if let (Some(start), Some(end)) = (filter.from, filter.to)
            && start > end
        {
            return Err(ExpenseError::InvalidDateRange { start, end });
        }

        let page = page.clamped();
        let mut query = expenses::Entity::find();
        if let Some(from) = filter.from {
            query = query.filter(expenses::Column::SpentOn.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(expenses::Column::SpentOn.lte(to));
        }
        if let Some(category) = filter.category {
            query = query.filter(expenses::Column::Category.eq(category));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(expenses::Column::SpentOn)
            .order_by_desc(expenses::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Edits an expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a validation error, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateExpenseInput,
    ) -> Result<expenses::Model, ExpenseError> {
        let existing = self.find_by_id(id).await?;

        let resplit = if input.gross.is_some() || input.tax_rate.is_some() {
            let gross = non_negative(input.gross.unwrap_or(Cents(existing.gross_cents)))?;
            let rate = match input.tax_rate {
                Some(rate) => rate,
                None => BasisPoints::try_from(existing.tax_rate_bp).map_err(AmountError::from)?,
            };
            Some((rate, split_gross_to_net_and_tax(gross, rate)))
        } else {
            None
        };

        let mut active: expenses::ActiveModel = existing.into();
        if let Some(spent_on) = input.spent_on {
            active.spent_on = Set(spent_on);
        }
        if let Some(vendor) = input.vendor {
            active.vendor = Set(non_blank(&vendor)?);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some((rate, split)) = resplit {
            active.tax_rate_bp = Set(i32::from(rate));
            active.gross_cents = Set(split.gross.value());
            active.net_cents = Set(split.net.value());
            active.tax_cents = Set(split.tax.value());
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(receipt_key) = input.receipt_key {
            active.receipt_key = Set(receipt_key);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        info!(expense_id = %id, gross_cents = updated.gross_cents, "expense updated");
        Ok(updated)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, id: Uuid) -> Result<(), ExpenseError> {
        let result = expenses::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ExpenseError::NotFound(id));
        }

        info!(expense_id = %id, "expense deleted");
        Ok(())
    }
}

fn non_blank(vendor: &str) -> Result<String, ExpenseError> {
    let vendor = vendor.trim();
    if vendor.is_empty() {
        return Err(ExpenseError::EmptyVendor);
    }
    Ok(vendor.to_string())
}

fn non_negative(gross: Cents) -> Result<Cents, ExpenseError> {
    if gross.is_negative() {
        return Err(AmountError::InvalidAmount(format!("gross amount {gross} is negative")).into());
    }
    Ok(gross)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_trims() {
        assert_eq!(non_blank("  Coop  ").unwrap(), "Coop");
        assert!(matches!(non_blank("   "), Err(ExpenseError::EmptyVendor)));
    }

    #[test]
    fn test_negative_gross_rejected() {
        let err = non_negative(Cents(-1)).unwrap_err();
        assert!(matches!(err, ExpenseError::Amount(AmountError::InvalidAmount(_))));
        assert_eq!(non_negative(Cents::ZERO).unwrap(), Cents::ZERO);
    }
}
