//! Postgres enum types and their domain counterparts.

use fidu_core::settlement;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "counterparty_kind")]
#[serde(rename_all = "lowercase")]
pub enum CounterpartyKind {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "supplier")]
    Supplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[sea_orm(string_value = "invoice")]
    Invoice,
    #[sea_orm(string_value = "bill")]
    Bill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "partial")]
    Partial,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_category")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "office")]
    Office,
    #[sea_orm(string_value = "travel")]
    Travel,
    #[sea_orm(string_value = "meals")]
    Meals,
    #[sea_orm(string_value = "equipment")]
    Equipment,
    #[sea_orm(string_value = "software")]
    Software,
    #[sea_orm(string_value = "rent")]
    Rent,
    #[sea_orm(string_value = "utilities")]
    Utilities,
    #[sea_orm(string_value = "insurance")]
    Insurance,
    #[sea_orm(string_value = "marketing")]
    Marketing,
    #[sea_orm(string_value = "professional_fees")]
    ProfessionalFees,
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<settlement::CounterpartyKind> for CounterpartyKind {
    fn from(kind: settlement::CounterpartyKind) -> Self {
        match kind {
            settlement::CounterpartyKind::Client => Self::Client,
            settlement::CounterpartyKind::Supplier => Self::Supplier,
        }
    }
}

impl From<CounterpartyKind> for settlement::CounterpartyKind {
    fn from(kind: CounterpartyKind) -> Self {
        match kind {
            CounterpartyKind::Client => Self::Client,
            CounterpartyKind::Supplier => Self::Supplier,
        }
    }
}

impl From<settlement::DocumentKind> for DocumentKind {
    fn from(kind: settlement::DocumentKind) -> Self {
        match kind {
            settlement::DocumentKind::Invoice => Self::Invoice,
            settlement::DocumentKind::Bill => Self::Bill,
        }
    }
}

impl From<DocumentKind> for settlement::DocumentKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice => Self::Invoice,
            DocumentKind::Bill => Self::Bill,
        }
    }
}

impl From<settlement::DocumentStatus> for DocumentStatus {
    fn from(status: settlement::DocumentStatus) -> Self {
        match status {
            settlement::DocumentStatus::Open => Self::Open,
            settlement::DocumentStatus::Partial => Self::Partial,
            settlement::DocumentStatus::Paid => Self::Paid,
            settlement::DocumentStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<settlement::SettlementStatus> for DocumentStatus {
    fn from(status: settlement::SettlementStatus) -> Self {
        settlement::DocumentStatus::from(status).into()
    }
}

impl From<DocumentStatus> for settlement::DocumentStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Open => Self::Open,
            DocumentStatus::Partial => Self::Partial,
            DocumentStatus::Paid => Self::Paid,
            DocumentStatus::Canceled => Self::Canceled,
        }
    }
}
