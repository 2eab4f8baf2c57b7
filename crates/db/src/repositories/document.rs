//! Invoice and bill repository.
//!
//! Net and VAT are always derived from the gross amount by the tax
//! splitter; the cached `status`, `paid_cents` and `paid_at` columns are
//! rewritten from the payment list under a row lock whenever an input of
//! the settlement state changes.

use chrono::{NaiveDate, Utc};
use fidu_core::discount::DiscountCalculator;
use fidu_core::settlement::{
    DocumentSnapshot, PaymentLine, SettlementEngine, SettlementError, SettlementState,
};
use fidu_core::tax::{AmountError, split_gross_to_net_and_tax};
use fidu_shared::types::{DocumentId, PageRequest, PageResponse};
use fidu_shared::{BasisPoints, Cents};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    counterparties, documents, payments,
    sea_orm_active_enums::{DocumentKind, DocumentStatus},
};

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Counterparty not found.
    #[error("Counterparty not found: {0}")]
    CounterpartyNotFound(Uuid),

    /// Invoices need a client, bills a supplier.
    #[error("A {document} cannot be issued against a {counterparty}")]
    CounterpartyKindMismatch {
        /// Document kind.
        document: &'static str,
        /// Actual counterparty kind.
        counterparty: &'static str,
    },

    /// Document number already used for this kind.
    #[error("Document number already exists: {0}")]
    DuplicateNumber(String),

    /// Document number is blank.
    #[error("Document number cannot be empty")]
    EmptyNumber,

    /// Due date before issue date.
    #[error("Due date {due} is before issue date {issued}")]
    DueBeforeIssue {
        /// Issue date.
        issued: NaiveDate,
        /// Due date.
        due: NaiveDate,
    },

    /// Amount or rate rejected.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Settlement rule violated (e.g. document canceled).
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for issuing an invoice or recording a bill.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// Invoice or bill.
    pub kind: DocumentKind,
    /// Client (invoice) or supplier (bill).
    pub counterparty_id: Uuid,
    /// Document number, unique per kind.
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// VAT rate.
    pub tax_rate: BasisPoints,
    /// Tax-inclusive total.
    pub gross: Cents,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Filter options for listing documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Only this kind.
    pub kind: Option<DocumentKind>,
    /// Only this counterparty.
    pub counterparty_id: Option<Uuid>,
    /// Only this status.
    pub status: Option<DocumentStatus>,
    /// Only documents due on or before this date.
    pub due_on_or_before: Option<NaiveDate>,
}

/// A document with its payments and derived figures.
#[derive(Debug, Clone)]
pub struct DocumentWithPayments {
    /// Document row.
    pub document: documents::Model,
    /// Payments, oldest first.
    pub payments: Vec<payments::Model>,
    /// Settlement state recomputed from the payments.
    pub state: SettlementState,
    /// Calendar days past due while a balance remains.
    pub days_late: i64,
}

/// Document repository.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice or bill in status `open`.
    ///
    /// # Errors
    ///
    /// Returns an error if the counterparty is missing or of the wrong kind,
    /// the number is blank or taken, the dates are inverted, or the gross
    /// amount is negative.
    pub async fn create(
        &self,
        input: CreateDocumentInput,
    ) -> Result<documents::Model, DocumentError> {
        let number = input.number.trim().to_string();
        if number.is_empty() {
            return Err(DocumentError::EmptyNumber);
        }
        if input.due_date < input.issue_date {
            return Err(DocumentError::DueBeforeIssue {
                issued: input.issue_date,
                due: input.due_date,
            });
        }
        if input.gross.is_negative() {
            return Err(AmountError::InvalidAmount(format!(
                "gross amount {} is negative",
                input.gross
            ))
            .into());
        }

        let counterparty = counterparties::Entity::find_by_id(input.counterparty_id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::CounterpartyNotFound(input.counterparty_id))?;
        let expected = fidu_core::settlement::DocumentKind::from(input.kind).counterparty_kind();
        let actual = fidu_core::settlement::CounterpartyKind::from(counterparty.kind);
        if expected != actual {
            return Err(DocumentError::CounterpartyKindMismatch {
                document: fidu_core::settlement::DocumentKind::from(input.kind).as_str(),
                counterparty: actual.as_str(),
            });
        }

        let split = split_gross_to_net_and_tax(input.gross, input.tax_rate);
        let status = DocumentStatus::from(SettlementEngine::status(split.gross, Cents::ZERO));
        let paid_at = (status == DocumentStatus::Paid).then_some(input.issue_date);
        let now = Utc::now().into();

        let model = documents::ActiveModel {
            id: Set(DocumentId::new().into_inner()),
            kind: Set(input.kind),
            counterparty_id: Set(input.counterparty_id),
            number: Set(number.clone()),
            issue_date: Set(input.issue_date),
            due_date: Set(input.due_date),
            tax_rate_bp: Set(i32::from(input.tax_rate)),
            gross_cents: Set(split.gross.value()),
            net_cents: Set(split.net.value()),
            tax_cents: Set(split.tax.value()),
            discount_rate_bp: Set(None),
            discount_cents: Set(0),
            paid_cents: Set(0),
            status: Set(status),
            paid_at: Set(paid_at),
            canceled_at: Set(None),
            notes: Set(input.notes),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DocumentError::DuplicateNumber(number),
            _ => DocumentError::Database(err),
        })?;

        info!(
            document_id = %model.id,
            kind = ?model.kind,
            gross_cents = model.gross_cents,
            "document created"
        );
        Ok(model)
    }

    /// Finds a document by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such document exists.
    pub async fn find_by_id(&self, id: Uuid) -> Result<documents::Model, DocumentError> {
        documents::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Loads a document, its payments, and its live settlement state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such document exists.
    pub async fn find_with_payments(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<DocumentWithPayments, DocumentError> {
        let document = self.find_by_id(id).await?;
        let payments = load_payments(&self.db, id).await?;

        let state = SettlementEngine::state(&snapshot(&document), &payment_lines(&payments));
        let days_late = if document.status == DocumentStatus::Canceled {
            0
        } else {
            SettlementEngine::days_late(document.due_date, state.outstanding, today)
        };

        Ok(DocumentWithPayments {
            document,
            payments,
            state,
            days_late,
        })
    }

    /// Lists documents, most recent issue date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<documents::Model>, DocumentError> {
        let page = page.clamped();
        let mut query = documents::Entity::find();

        if let Some(kind) = filter.kind {
            query = query.filter(documents::Column::Kind.eq(kind));
        }
        if let Some(counterparty_id) = filter.counterparty_id {
            query = query.filter(documents::Column::CounterpartyId.eq(counterparty_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(documents::Column::Status.eq(status));
        }
        if let Some(due) = filter.due_on_or_before {
            query = query.filter(documents::Column::DueDate.lte(due));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(documents::Column::IssueDate)
            .order_by_desc(documents::Column::Number)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Corrects the gross amount (and optionally the rate) of a document.
    ///
    /// Net and VAT are re-split and the status is recomputed from the
    /// existing payments in the same transaction. A discount granted as a
    /// rate is re-applied to the new gross.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DocumentCanceled`, `InvalidAmount`, or a
    /// database error. Nothing is written on error.
    pub async fn correct_gross(
        &self,
        id: Uuid,
        gross: Cents,
        tax_rate: Option<BasisPoints>,
    ) -> Result<documents::Model, DocumentError> {
        if gross.is_negative() {
            return Err(
                AmountError::InvalidAmount(format!("gross amount {gross} is negative")).into(),
            );
        }

        let txn = self.db.begin().await?;
        let document = lock_document(&txn, id).await?;
        if document.status == DocumentStatus::Canceled {
            return Err(SettlementError::DocumentCanceled(DocumentId::from_uuid(id)).into());
        }

        let rate = match tax_rate {
            Some(rate) => rate,
            None => BasisPoints::try_from(document.tax_rate_bp).map_err(AmountError::from)?,
        };
        let split = split_gross_to_net_and_tax(gross, rate);
        let discount = corrected_discount(&document, split.gross)?;

        let payments = load_payments(&txn, id).await?;
        let snapshot = DocumentSnapshot {
            gross: split.gross,
            discount,
            ..snapshot(&document)
        };
        let state = SettlementEngine::state(&snapshot, &payment_lines(&payments));
        let version = document.version;

        let mut active: documents::ActiveModel = document.into();
        active.tax_rate_bp = Set(i32::from(rate));
        active.gross_cents = Set(split.gross.value());
        active.net_cents = Set(split.net.value());
        active.tax_cents = Set(split.tax.value());
        active.discount_cents = Set(discount.value());
        apply_state(&mut active, &state, version);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            document_id = %id,
            gross_cents = split.gross.value(),
            status = ?updated.status,
            "document gross corrected"
        );
        Ok(updated)
    }

    /// Cancels a document. Canceling twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn cancel(&self, id: Uuid) -> Result<documents::Model, DocumentError> {
        let txn = self.db.begin().await?;
        let document = lock_document(&txn, id).await?;
        if document.status == DocumentStatus::Canceled {
            txn.commit().await?;
            return Ok(document);
        }

        let now = Utc::now().into();
        let version = document.version;
        let mut active: documents::ActiveModel = document.into();
        active.status = Set(DocumentStatus::Canceled);
        active.canceled_at = Set(Some(now));
        active.version = Set(version + 1);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(document_id = %id, "document canceled");
        Ok(updated)
    }
}

/// Reads a document with `SELECT ... FOR UPDATE`.
pub(crate) async fn lock_document(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<documents::Model, DocumentError> {
    documents::Entity::find_by_id(id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(DocumentError::NotFound(id))
}

/// Loads the payments of a document, oldest first.
pub(crate) async fn load_payments<C: ConnectionTrait>(
    conn: &C,
    document_id: Uuid,
) -> Result<Vec<payments::Model>, DbErr> {
    payments::Entity::find()
        .filter(payments::Column::DocumentId.eq(document_id))
        .order_by_asc(payments::Column::PaidOn)
        .order_by_asc(payments::Column::CreatedAt)
        .all(conn)
        .await
}

/// The settlement view of a stored document.
pub(crate) fn snapshot(document: &documents::Model) -> DocumentSnapshot {
    DocumentSnapshot {
        id: DocumentId::from_uuid(document.id),
        gross: Cents(document.gross_cents),
        discount: Cents(document.discount_cents),
        canceled: document.status == DocumentStatus::Canceled,
        due_date: document.due_date,
    }
}

pub(crate) fn payment_lines(payments: &[payments::Model]) -> Vec<PaymentLine> {
    payments
        .iter()
        .map(|p| PaymentLine {
            amount: Cents(p.amount_cents),
            date: p.paid_on,
        })
        .collect()
}

/// Discount after a gross correction: a stored rate is re-applied to the
/// new gross, a negotiated discount is capped at it.
pub(crate) fn corrected_discount(
    document: &documents::Model,
    gross: Cents,
) -> Result<Cents, AmountError> {
    match document.discount_rate_bp {
        Some(bp) => {
            let rate = BasisPoints::try_from(bp).map_err(AmountError::from)?;
            Ok(DiscountCalculator::apply_discount_rate(gross, rate).discount)
        }
        None => Ok(Cents(document.discount_cents).min(gross.non_negative())),
    }
}

/// Writes a recomputed settlement state into the cached columns.
pub(crate) fn apply_state(active: &mut documents::ActiveModel, state: &SettlementState, version: i64) {
    active.status = Set(DocumentStatus::from(state.status));
    active.paid_cents = Set(state.total_paid.value());
    active.paid_at = Set(state.paid_at);
    active.version = Set(version + 1);
    active.updated_at = Set(Utc::now().into());
}
