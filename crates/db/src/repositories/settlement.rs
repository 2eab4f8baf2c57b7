//! Payment recording and discounted settlement.
//!
//! Both operations run in one transaction holding `FOR UPDATE` on the
//! document row, so concurrent payments on the same document serialize and
//! the cached status always matches the committed payment list.

use chrono::Utc;
use fidu_core::discount::{DiscountCalculator, DiscountTerms, SettlementRequest};
use fidu_core::settlement::{NewPaymentRecord, PaymentRequest, SettlementEngine, SettlementState};
use fidu_shared::types::PaymentId;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::document::{
    DocumentError, apply_state, load_payments, lock_document, payment_lines, snapshot,
};
use crate::entities::{documents, payments};

/// Result of a payment or settlement.
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    /// Document after the update.
    pub document: documents::Model,
    /// Inserted payment, if any cash moved.
    pub payment: Option<payments::Model>,
    /// Settlement state after the update.
    pub state: SettlementState,
}

/// Settlement repository.
#[derive(Debug, Clone)]
pub struct SettlementRepository {
    db: DatabaseConnection,
}

impl SettlementRepository {
    /// Creates a new settlement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment against a document.
    ///
    /// Without an amount the payment covers the current outstanding
    /// balance. Amounts above the balance are accepted and leave the
    /// document `paid`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DocumentCanceled`, `InvalidPaymentAmount`, or a
    /// database error. Nothing is written on error.
    pub async fn record_payment(
        &self,
        document_id: Uuid,
        request: PaymentRequest,
    ) -> Result<SettlementOutcome, DocumentError> {
        let txn = self.db.begin().await?;
        let document = lock_document(&txn, document_id).await?;
        let existing = load_payments(&txn, document_id).await?;

        let planned = SettlementEngine::plan_payment(
            &snapshot(&document),
            &payment_lines(&existing),
            request,
        )?;
        let payment = insert_payment(&txn, planned.payment).await?;

        let version = document.version;
        let mut active: documents::ActiveModel = document.into();
        apply_state(&mut active, &planned.after, version);
        let document = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            document_id = %document_id,
            payment_id = %payment.id,
            amount_cents = payment.amount_cents,
            status = ?document.status,
            "payment recorded"
        );
        Ok(SettlementOutcome {
            document,
            payment: Some(payment),
            state: planned.after,
        })
    }

    /// Settles a document in one step, waiving part of the balance.
    ///
    /// The document always ends up `paid`. No payment row is written when
    /// prior payments already cover the discounted target.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DocumentCanceled`, `InvalidPaymentAmount`, or a
    /// database error. Nothing is written on error.
    pub async fn settle_with_discount(
        &self,
        document_id: Uuid,
        terms: DiscountTerms,
        request: SettlementRequest,
    ) -> Result<SettlementOutcome, DocumentError> {
        let txn = self.db.begin().await?;
        let document = lock_document(&txn, document_id).await?;
        let existing = load_payments(&txn, document_id).await?;

        let planned = DiscountCalculator::plan_settlement(
            &snapshot(&document),
            &payment_lines(&existing),
            terms,
            request,
        )?;
        let payment = match planned.payment {
            Some(record) => Some(insert_payment(&txn, record).await?),
            None => None,
        };

        let version = document.version;
        let mut active: documents::ActiveModel = document.into();
        active.discount_cents = Set(planned.discount.value());
        active.discount_rate_bp = Set(planned.discount_rate.map(i32::from));
        apply_state(&mut active, &planned.after, version);
        let document = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            document_id = %document_id,
            discount_cents = planned.discount.value(),
            paid_cents = document.paid_cents,
            "document settled with discount"
        );
        Ok(SettlementOutcome {
            document,
            payment,
            state: planned.after,
        })
    }
}

async fn insert_payment(
    txn: &DatabaseTransaction,
    record: NewPaymentRecord,
) -> Result<payments::Model, DbErr> {
    payments::ActiveModel {
        id: Set(PaymentId::new().into_inner()),
        document_id: Set(record.document_id.into_inner()),
        paid_on: Set(record.date),
        amount_cents: Set(record.amount.value()),
        method: Set(record.method),
        reference: Set(record.reference),
        created_at: Set(Utc::now().into()),
    }
    .insert(txn)
    .await
}
