//! Report generation service.

use std::collections::HashMap;

use chrono::NaiveDate;
use fidu_shared::Cents;
use fidu_shared::types::CounterpartyId;

use super::error::ReportError;
use super::types::{
    AgingBucket, AgingBuckets, CounterpartyBalance, ReceivablesReport, ReportDocument, VatLine,
    VatSummary, VatTotals,
};
use crate::settlement::SettlementEngine;

/// Service for generating reports.
pub struct ReportService;

impl ReportService {
    /// Aggregates outstanding balances per counterparty as of `as_of`.
    ///
    /// Canceled and fully paid documents are left out.
    #[must_use]
    pub fn receivables(documents: &[ReportDocument], as_of: NaiveDate) -> ReceivablesReport {
        let mut rows: HashMap<CounterpartyId, CounterpartyBalance> = HashMap::new();
        let mut aging = AgingBuckets::default();

        for doc in documents.iter().filter(|d| !d.canceled) {
            let outstanding = SettlementEngine::outstanding(doc.amount_due, doc.total_paid);
            if !outstanding.is_positive() {
                continue;
            }
            let days_late = SettlementEngine::days_late(doc.due_date, outstanding, as_of);
            aging.add(AgingBucket::for_days_late(days_late), outstanding);

            let row = rows
                .entry(doc.counterparty_id)
                .or_insert_with(|| CounterpartyBalance {
                    counterparty_id: doc.counterparty_id,
                    name: doc.counterparty_name.clone(),
                    open_documents: 0,
                    outstanding: Cents::ZERO,
                    overdue: Cents::ZERO,
                    max_days_late: 0,
                });
            row.open_documents += 1;
            row.outstanding += outstanding;
            if days_late > 0 {
                row.overdue += outstanding;
                row.max_days_late = row.max_days_late.max(days_late);
            }
        }

        let mut counterparties: Vec<CounterpartyBalance> = rows.into_values().collect();
        counterparties.sort_by(|a, b| {
            b.outstanding
                .cmp(&a.outstanding)
                .then_with(|| a.name.cmp(&b.name))
        });

        ReceivablesReport {
            as_of,
            total_outstanding: counterparties.iter().map(|c| c.outstanding).sum(),
            total_overdue: counterparties.iter().map(|c| c.overdue).sum(),
            open_documents: counterparties.iter().map(|c| c.open_documents).sum(),
            counterparties,
            aging,
        }
    }

    /// Builds the VAT summary of a period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `from` is after `to`.
    pub fn vat_summary(
        from: NaiveDate,
        to: NaiveDate,
        sales: &[VatLine],
        expenses: &[VatLine],
    ) -> Result<VatSummary, ReportError> {
        if from > to {
            return Err(ReportError::InvalidDateRange {
                start: from,
                end: to,
            });
        }

        let collected = Self::vat_totals(sales);
        let deductible = Self::vat_totals(expenses);

        Ok(VatSummary {
            from,
            to,
            collected,
            deductible,
            vat_payable: collected.tax - deductible.tax,
        })
    }

    fn vat_totals(lines: &[VatLine]) -> VatTotals {
        lines
            .iter()
            .filter(|line| !line.canceled)
            .fold(VatTotals::default(), |mut totals, line| {
                totals.count += 1;
                totals.net += line.net;
                totals.tax += line.tax;
                totals.gross += line.net + line.tax;
                totals
            })
    }
}
