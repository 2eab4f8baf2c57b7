//! Report repository.
//!
//! Loads rows and hands them to [`ReportService`]; no figure is computed
//! in SQL.

use chrono::NaiveDate;
use fidu_core::reports::{ReceivablesReport, ReportDocument, ReportService, VatLine, VatSummary};
use fidu_shared::Cents;
use fidu_shared::types::CounterpartyId;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use super::document::snapshot;
use crate::entities::{
    counterparties, documents, expenses,
    sea_orm_active_enums::{DocumentKind, DocumentStatus},
};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportQueryError {
    /// Report parameters rejected.
    #[error(transparent)]
    Report(#[from] fidu_core::reports::ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Balances still owed on documents of one kind.
    ///
    /// Invoices give the receivables report, bills the payables report.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn outstanding(
        &self,
        kind: DocumentKind,
        as_of: NaiveDate,
    ) -> Result<ReceivablesReport, ReportQueryError> {
        let rows = documents::Entity::find()
            .filter(documents::Column::Kind.eq(kind))
            .filter(documents::Column::Status.is_in([DocumentStatus::Open, DocumentStatus::Partial]))
            .find_also_related(counterparties::Entity)
            .order_by_asc(documents::Column::DueDate)
            .all(&self.db)
            .await?;

        let documents: Vec<ReportDocument> = rows
            .into_iter()
            .map(|(document, counterparty)| ReportDocument {
                counterparty_id: CounterpartyId::from_uuid(document.counterparty_id),
                counterparty_name: counterparty.map(|c| c.name).unwrap_or_default(),
                due_date: document.due_date,
                amount_due: snapshot(&document).amount_due(),
                total_paid: Cents(document.paid_cents),
                canceled: document.status == DocumentStatus::Canceled,
            })
            .collect();

        Ok(ReportService::receivables(&documents, as_of))
    }

    /// VAT collected on invoices issued and deductible on expenses spent
    /// between `from` and `to`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` or a database error.
    pub async fn vat_summary(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<VatSummary, ReportQueryError> {
        // Rejects an inverted range before touching the database.
        ReportService::vat_summary(from, to, &[], &[])?;

        let sales: Vec<VatLine> = documents::Entity::find()
            .filter(documents::Column::Kind.eq(DocumentKind::Invoice))
            .filter(documents::Column::IssueDate.between(from, to))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|d| VatLine {
                net: Cents(d.net_cents),
                tax: Cents(d.tax_cents),
                canceled: d.status == DocumentStatus::Canceled,
            })
            .collect();

        let purchases: Vec<VatLine> = expenses::Entity::find()
            .filter(expenses::Column::SpentOn.between(from, to))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| VatLine {
                net: Cents(e.net_cents),
                tax: Cents(e.tax_cents),
                canceled: false,
            })
            .collect();

        Ok(ReportService::vat_summary(from, to, &sales, &purchases)?)
    }
}
