//! Initial database migration.
//!
//! Creates enums, tables, indexes and the trigger that keeps payments
//! insert-only.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: COUNTERPARTIES & DOCUMENTS
        // ============================================================
        db.execute_unprepared(COUNTERPARTIES_SQL).await?;
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        // ============================================================
        // PART 3: EXPENSES
        // ============================================================
        db.execute_unprepared(EXPENSES_SQL).await?;

        // ============================================================
        // PART 4: PAYROLL
        // ============================================================
        db.execute_unprepared(EMPLOYEES_SQL).await?;
        db.execute_unprepared(SALARIES_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE counterparty_kind AS ENUM ('client', 'supplier');

CREATE TYPE document_kind AS ENUM ('invoice', 'bill');

-- Cached projection of the payment sum, see documents.paid_cents
CREATE TYPE document_status AS ENUM ('open', 'partial', 'paid', 'canceled');

CREATE TYPE expense_category AS ENUM (
    'office',
    'travel',
    'meals',
    'equipment',
    'software',
    'rent',
    'utilities',
    'insurance',
    'marketing',
    'professional_fees',
    'other'
);
";

const COUNTERPARTIES_SQL: &str = r"
CREATE TABLE counterparties (
    id UUID PRIMARY KEY,
    kind counterparty_kind NOT NULL,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    address TEXT,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_counterparties_kind_name ON counterparties(kind, name);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY,
    kind document_kind NOT NULL,
    counterparty_id UUID NOT NULL REFERENCES counterparties(id) ON DELETE RESTRICT,
    number VARCHAR(64) NOT NULL,
    issue_date DATE NOT NULL,
    due_date DATE NOT NULL,
    tax_rate_bp INTEGER NOT NULL,
    gross_cents BIGINT NOT NULL,
    net_cents BIGINT NOT NULL,
    tax_cents BIGINT NOT NULL,
    discount_rate_bp INTEGER,
    discount_cents BIGINT NOT NULL DEFAULT 0,
    paid_cents BIGINT NOT NULL DEFAULT 0,
    status document_status NOT NULL DEFAULT 'open',
    paid_at DATE,
    canceled_at TIMESTAMPTZ,
    notes TEXT,
    version BIGINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_documents_kind_number UNIQUE (kind, number),
    CONSTRAINT chk_documents_split CHECK (gross_cents = net_cents + tax_cents),
    CONSTRAINT chk_documents_gross CHECK (gross_cents >= 0 AND tax_cents >= 0),
    CONSTRAINT chk_documents_tax_rate CHECK (tax_rate_bp BETWEEN 0 AND 10000),
    CONSTRAINT chk_documents_discount_rate CHECK (
        discount_rate_bp IS NULL OR discount_rate_bp BETWEEN 0 AND 10000
    ),
    CONSTRAINT chk_documents_discount CHECK (
        discount_cents >= 0 AND discount_cents <= gross_cents
    ),
    CONSTRAINT chk_documents_dates CHECK (due_date >= issue_date)
);

CREATE INDEX idx_documents_counterparty ON documents(counterparty_id);
CREATE INDEX idx_documents_kind_status ON documents(kind, status);
CREATE INDEX idx_documents_due_date ON documents(due_date) WHERE status IN ('open', 'partial');
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    document_id UUID NOT NULL REFERENCES documents(id) ON DELETE RESTRICT,
    paid_on DATE NOT NULL,
    amount_cents BIGINT NOT NULL,
    method VARCHAR(50),
    reference VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_payments_amount_positive CHECK (amount_cents > 0)
);

CREATE INDEX idx_payments_document ON payments(document_id, paid_on);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    spent_on DATE NOT NULL,
    vendor VARCHAR(255) NOT NULL,
    category expense_category NOT NULL DEFAULT 'other',
    tax_rate_bp INTEGER NOT NULL,
    gross_cents BIGINT NOT NULL,
    net_cents BIGINT NOT NULL,
    tax_cents BIGINT NOT NULL,
    notes TEXT,
    receipt_key VARCHAR(512),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_expenses_split CHECK (gross_cents = net_cents + tax_cents),
    CONSTRAINT chk_expenses_gross CHECK (gross_cents >= 0 AND tax_cents >= 0),
    CONSTRAINT chk_expenses_tax_rate CHECK (tax_rate_bp BETWEEN 0 AND 10000)
);

CREATE INDEX idx_expenses_spent_on ON expenses(spent_on);
CREATE INDEX idx_expenses_category ON expenses(category, spent_on);
";

const EMPLOYEES_SQL: &str = r"
CREATE TABLE employees (
    id UUID PRIMARY KEY,
    full_name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SALARIES_SQL: &str = r"
CREATE TABLE salaries (
    id UUID PRIMARY KEY,
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE RESTRICT,
    -- First day of the month the salary is for
    period DATE NOT NULL,
    gross_cents BIGINT NOT NULL,
    deductions_cents BIGINT NOT NULL DEFAULT 0,
    net_cents BIGINT NOT NULL,
    paid_on DATE,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_salaries_employee_period UNIQUE (employee_id, period),
    CONSTRAINT chk_salaries_net CHECK (net_cents = gross_cents - deductions_cents),
    CONSTRAINT chk_salaries_amounts CHECK (
        gross_cents >= 0 AND deductions_cents >= 0 AND deductions_cents <= gross_cents
    )
);

CREATE INDEX idx_salaries_period ON salaries(period);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: prevent_payment_modification
-- Payments are corrected by adding new ones, never edited
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_payment_modification()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Payments are immutable. Record a new payment instead.';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_payment_mod
BEFORE UPDATE OR DELETE ON payments
FOR EACH ROW
EXECUTE FUNCTION prevent_payment_modification();
";

const DROP_ALL_SQL: &str = r"
DROP TRIGGER IF EXISTS trg_prevent_payment_mod ON payments;
DROP FUNCTION IF EXISTS prevent_payment_modification();

DROP TABLE IF EXISTS salaries;
DROP TABLE IF EXISTS employees;
DROP TABLE IF EXISTS expenses;
DROP TABLE IF EXISTS payments;
DROP TABLE IF EXISTS documents;
DROP TABLE IF EXISTS counterparties;

DROP TYPE IF EXISTS expense_category;
DROP TYPE IF EXISTS document_status;
DROP TYPE IF EXISTS document_kind;
DROP TYPE IF EXISTS counterparty_kind;
";
