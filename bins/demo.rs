use chrono::{Duration, NaiveDate, Utc};
use dotenvy::dotenv;
use serde_json::json;
use service::MailingListStore;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG, CONFIG_PATH and DATABASE_URL apply
    dotenv().ok();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging);
    info!(service = "demo", event = "logger_init", "tracing subscriber initialized");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "demo", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cfg.database)) {
        Ok(()) => {
            info!(service = "demo", event = "finished", "demo scenario completed");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "demo", event = "run_failed", error = %e, "demo scenario failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(db_cfg: configs::DatabaseConfig) -> anyhow::Result<()> {
    let store = MailingListStore::open(&db_cfg).await?;

    let ukraine = store.add_country("Ukraine").await?;
    store.add_city("Kherson", "Ukraine").await?;
    let phones = store.add_section("Mobile phones").await?;

    let start = Utc::now().naive_utc();
    store
        .add_promotion("Mobile phones", "Ukraine", start, start + Duration::days(30), Some("Samsung Galaxy S21"))
        .await?;

    let dob = NaiveDate::from_ymd_opt(1978, 11, 13).ok_or_else(|| anyhow::anyhow!("invalid date of birth"))?;
    let customer = store
        .add_customer("Dmytro Kurman", dob, "M", "kurman@gmail.com", "Ukraine", "Kherson")
        .await?;
    store.link_customer_section(customer.id, "Mobile phones").await?;

    let report = json!({
        "customers": store.list_customers().await?,
        "emails": store.list_emails().await?,
        "countries": store.list_countries().await?,
        "cities": store.list_cities().await?,
        "sections": store.list_sections().await?,
        "promotions": store.list_promotions().await?,
        "customers_in_kherson": store.list_customers_by_city("Kherson").await?,
        "customers_in_ukraine": store.list_customers_by_country("Ukraine").await?,
        "promotions_in_ukraine": store.list_promotions_by_country("Ukraine").await?,
        "promotions_in_mobile_phones": store.list_promotions_by_section("Mobile phones").await?,
        "sections_of_customer": store.list_sections_by_customer(customer.id).await?,
        "promotions_for_customer": store.list_promotions_by_customer(customer.id).await?,
        "promotions_in_kherson": store.list_promotions_by_city("Kherson").await?,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    let renamed = store.update_customer_name(customer.id, "Dmytro O. Kurman").await?;
    println!("renamed customer {} to {}", renamed.id, renamed.full_name);

    store.delete_customer(customer.id).await?;
    println!("customers after delete: {}", store.list_customers().await?.len());

    // leave a file database ready for the next run
    store.delete_country(ukraine.id).await?;
    store.delete_section(phones.id).await?;

    store.close().await?;
    Ok(())
}
