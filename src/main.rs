use anyhow::Context;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use washpro::config::Config;
use washpro::modules::billing::{BillingRecord, PaymentStatus};
use washpro::modules::catalog::Service;
use washpro::modules::reports::{
    DocumentExporter, NullChartRenderer, ReportPeriod, ReportService, SpreadsheetExporter,
};
use washpro::modules::staff::{Role, User};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "washpro=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting WashPro Admin reporting demo");
    tracing::info!("Environment: {}", config.app.env);

    let staff = seed_staff();
    let services = seed_services();
    let records = seed_records(&staff, &services)?;

    let report_service = ReportService::new();
    let report = report_service.generate(&records, ReportPeriod::Weekly, &staff, &services);

    println!("{}", serde_json::to_string_pretty(&report)?);

    // No rendering surface here, so every chart section falls back to text
    let renderer = NullChartRenderer;
    let document_exporter = DocumentExporter::new(config.export.chart_capture_timeout());
    let document_path = document_exporter
        .export_to_dir(&report, &renderer, &config.export.output_dir)
        .await
        .context("Document export failed")?;
    tracing::info!("Report document: {}", document_path.display());

    let workbook_path = SpreadsheetExporter::new()
        .export_to_dir(&report, &staff, &config.export.output_dir)
        .context("Workbook export failed")?;
    tracing::info!("Report workbook: {}", workbook_path.display());

    Ok(())
}

/// Demo roster mirroring the seeded production accounts
fn seed_staff() -> Vec<User> {
    vec![
        User {
            id: "owner01".to_string(),
            username: "owner".to_string(),
            name: "Main Owner".to_string(),
            role: Role::Owner,
        },
        User {
            id: "staff01".to_string(),
            username: "staff1".to_string(),
            name: "John Doe".to_string(),
            role: Role::Staff,
        },
        User {
            id: "staff02".to_string(),
            username: "staff2".to_string(),
            name: "Jane Smith".to_string(),
            role: Role::Staff,
        },
    ]
}

/// Demo catalog mirroring the seeded production services
fn seed_services() -> Vec<Service> {
    let seed = [
        ("S001", "Basic Wash", 20, "Exterior wash and dry."),
        (
            "S002",
            "Premium Wash",
            40,
            "Basic wash + interior vacuum and underbody cleaning.",
        ),
        (
            "S003",
            "Detailing - Wax & Polish",
            75,
            "Full exterior wax and polish.",
        ),
        (
            "S004",
            "Detailing - Engine Clean",
            50,
            "Engine bay cleaning.",
        ),
        (
            "S005",
            "Ceramic Coating Prep",
            150,
            "Surface preparation for ceramic coating.",
        ),
        (
            "S006",
            "Tire Shine",
            10,
            "Application of tire shine product.",
        ),
        (
            "P001",
            "Gold Package",
            100,
            "Premium Wash + Wax & Polish + Tire Shine.",
        ),
    ];

    seed.into_iter()
        .map(|(id, name, price, description)| Service {
            id: id.to_string(),
            name: name.to_string(),
            price: Decimal::from(price),
            description: description.to_string(),
        })
        .collect()
}

/// A week of demo activity: paid washes for both staff members, one wash
/// attributed to a departed staff ID, plus a pending and a cancelled record
/// that reports must ignore.
fn seed_records(staff: &[User], services: &[Service]) -> anyhow::Result<Vec<BillingRecord>> {
    let now = Utc::now();
    let john = roster_id(staff, "staff1")?;
    let jane = roster_id(staff, "staff2")?;

    let basic = catalog_service(services, "Basic Wash")?;
    let premium = catalog_service(services, "Premium Wash")?;
    let wax = catalog_service(services, "Detailing - Wax & Polish")?;
    let tire = catalog_service(services, "Tire Shine")?;
    let gold = catalog_service(services, "Gold Package")?;

    let records = vec![
        BillingRecord::new(
            "Alice Green",
            "Toyota Corolla - B 1234 XYZ",
            vec![basic.clone()],
            john.clone(),
        )?
        .with_status(PaymentStatus::Paid)
        .with_timestamp(now - Duration::hours(2)),
        BillingRecord::new(
            "Bob Tan",
            "Honda Civic - B 88 AB",
            vec![premium.clone(), tire.clone()],
            jane.clone(),
        )?
        .with_status(PaymentStatus::Paid)
        .with_timestamp(now - Duration::days(1)),
        BillingRecord::new(
            "Carol Lim",
            "BMW X5 - D 5 CC",
            vec![gold],
            john.clone(),
        )?
        .with_status(PaymentStatus::Paid)
        .with_notes("Regular customer")
        .with_timestamp(now - Duration::days(3)),
        BillingRecord::new(
            "Dedi Wijaya",
            "Suzuki Ertiga - F 4455 GH",
            vec![wax],
            "ghost99xyz",
        )?
        .with_status(PaymentStatus::Paid)
        .with_timestamp(now - Duration::days(5)),
        BillingRecord::new(
            "Eka Putri",
            "Mazda 3 - B 777 EK",
            vec![basic, tire],
            jane,
        )?
        .with_timestamp(now - Duration::hours(6)),
        BillingRecord::new(
            "Frank Moore",
            "Ford Ranger - B 9 FM",
            vec![premium],
            john,
        )?
        .with_status(PaymentStatus::Cancelled)
        .with_timestamp(now - Duration::days(2)),
    ];

    Ok(records)
}

fn roster_id(staff: &[User], username: &str) -> anyhow::Result<String> {
    staff
        .iter()
        .find(|user| user.username == username)
        .map(|user| user.id.clone())
        .with_context(|| format!("Missing demo user {}", username))
}

fn catalog_service(services: &[Service], name: &str) -> anyhow::Result<Service> {
    services
        .iter()
        .find(|service| service.name == name)
        .cloned()
        .with_context(|| format!("Missing demo service {}", name))
}
