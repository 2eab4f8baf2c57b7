//! Demo data seeder for Fidu development.
//!
//! Creates a client, a supplier, invoices in every settlement state, a paid
//! bill, expenses and one employee with a salary, all through the
//! repositories so the cached document status is computed the normal way.
//! Running it twice is a no-op.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Days, NaiveDate, Utc};
use fidu_core::discount::{DiscountTerms, SettlementRequest};
use fidu_core::settlement::PaymentRequest;
use fidu_core::tax::{parse_amount, parse_percent};
use fidu_db::entities::{
    counterparties,
    sea_orm_active_enums::{CounterpartyKind, DocumentKind, ExpenseCategory},
};
use fidu_db::repositories::{
    CounterpartyRepository, CreateCounterpartyInput, CreateDocumentInput, CreateEmployeeInput,
    CreateExpenseInput, CreateSalaryInput, DocumentRepository, ExpenseRepository,
    PayrollRepository, SettlementRepository,
};
use fidu_shared::BasisPoints;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

const DEMO_CLIENT: &str = "Acme Demo AG";
const DEMO_SUPPLIER: &str = "Papeterie Muster GmbH";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = fidu_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    if counterparties::Entity::find()
        .filter(counterparties::Column::Name.eq(DEMO_CLIENT))
        .one(&db)
        .await?
        .is_some()
    {
        println!("Demo data already present, skipping...");
        return Ok(());
    }

    let today = Utc::now().date_naive();

    println!("Seeding counterparties...");
    let (client, supplier) = seed_counterparties(&db).await?;

    println!("Seeding invoices and bills...");
    seed_documents(&db, client, supplier, today).await?;

    println!("Seeding expenses...");
    seed_expenses(&db, today).await?;

    println!("Seeding payroll...");
    seed_payroll(&db, today).await?;

    println!("Seeding complete!");
    Ok(())
}

fn days_ago(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

fn days_ahead(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap_or(today)
}

async fn seed_counterparties(db: &DatabaseConnection) -> anyhow::Result<(Uuid, Uuid)> {
    let repo = CounterpartyRepository::new(db.clone());

    let client = repo
        .create(CreateCounterpartyInput {
            kind: CounterpartyKind::Client,
            name: DEMO_CLIENT.to_string(),
            email: Some("ap@acme.example".to_string()),
            address: Some("Bahnhofstrasse 1, 8001 Zürich".to_string()),
            notes: None,
        })
        .await?;

    let supplier = repo
        .create(CreateCounterpartyInput {
            kind: CounterpartyKind::Supplier,
            name: DEMO_SUPPLIER.to_string(),
            email: Some("rechnung@papeterie.example".to_string()),
            address: None,
            notes: Some("Office supplies".to_string()),
        })
        .await?;

    Ok((client.id, supplier.id))
}

async fn seed_documents(
    db: &DatabaseConnection,
    client: Uuid,
    supplier: Uuid,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let documents = DocumentRepository::new(db.clone());
    let settlement = SettlementRepository::new(db.clone());

    let document = |kind, counterparty_id, number: &str, gross: &str, issued: u64| {
        let issue_date = days_ago(today, issued);
        parse_amount(gross).map(|gross| CreateDocumentInput {
            kind,
            counterparty_id,
            number: number.to_string(),
            issue_date,
            due_date: days_ahead(issue_date, 30),
            tax_rate: BasisPoints::DEFAULT_TAX_RATE,
            gross,
            notes: None,
        })
    };

    // Overdue and partially paid
    let overdue = documents
        .create(document(DocumentKind::Invoice, client, "INV-DEMO-0001", "10'695.50", 75)?)
        .await?;
    settlement
        .record_payment(
            overdue.id,
            PaymentRequest {
                amount: Some(parse_amount("4'000.00")?),
                date: days_ago(today, 40),
                method: Some("bank transfer".to_string()),
                reference: Some("ESR 21 00000 00003 13947 14300 09017".to_string()),
            },
        )
        .await?;

    // Settled early with a 2 % discount
    let discounted = documents
        .create(document(DocumentKind::Invoice, client, "INV-DEMO-0002", "2'500.00", 20)?)
        .await?;
    settlement
        .settle_with_discount(
            discounted.id,
            DiscountTerms::Rate(parse_percent("2%")?),
            SettlementRequest {
                date: days_ago(today, 12),
                method: Some("bank transfer".to_string()),
                reference: None,
            },
        )
        .await?;

    // Not yet due
    documents
        .create(document(DocumentKind::Invoice, client, "INV-DEMO-0003", "CHF 980.-", 3)?)
        .await?;

    // Supplier bill paid in full
    let bill = documents
        .create(document(DocumentKind::Bill, supplier, "BILL-DEMO-0001", "1,234.00", 15)?)
        .await?;
    settlement
        .record_payment(
            bill.id,
            PaymentRequest {
                amount: None,
                date: days_ago(today, 5),
                method: Some("card".to_string()),
                reference: None,
            },
        )
        .await?;

    Ok(())
}

async fn seed_expenses(db: &DatabaseConnection, today: NaiveDate) -> anyhow::Result<()> {
    let repo = ExpenseRepository::new(db.clone());

    repo.create(CreateExpenseInput {
        spent_on: days_ago(today, 10),
        vendor: "SBB".to_string(),
        category: ExpenseCategory::Travel,
        tax_rate: BasisPoints::DEFAULT_TAX_RATE,
        gross: parse_amount("88.00")?,
        notes: Some("Zürich - Bern return".to_string()),
        receipt_key: None,
    })
    .await?;

    repo.create(CreateExpenseInput {
        spent_on: days_ago(today, 2),
        vendor: "Restaurant Krone".to_string(),
        category: ExpenseCategory::Meals,
        tax_rate: BasisPoints::new(260)?,
        gross: parse_amount("64,50")?,
        notes: None,
        receipt_key: None,
    })
    .await?;

    Ok(())
}

async fn seed_payroll(db: &DatabaseConnection, today: NaiveDate) -> anyhow::Result<()> {
    let repo = PayrollRepository::new(db.clone());

    let employee = repo
        .create_employee(CreateEmployeeInput {
            full_name: "Demo Employee".to_string(),
            email: Some("employee@fidu.example".to_string()),
        })
        .await?;

    repo.create_salary(
        employee.id,
        CreateSalaryInput {
            period: today,
            gross: parse_amount("6'500.00")?,
            deductions: parse_amount("890.35")?,
            paid_on: Some(today),
            notes: None,
        },
    )
    .await?;

    Ok(())
}
