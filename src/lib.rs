pub mod config;
pub mod error;
pub mod forecast;
pub mod ledger;
pub mod models;
pub mod palette;
pub mod reference;
pub mod regional;
pub mod report;
pub mod risk;
pub mod search;
pub mod stock_status;
pub mod views;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::Thresholds;
use crate::reference::ReferenceData;

/// Load the reference dataset (bundled, or `dataset` when given), apply the
/// configured thresholds and print the current shortage report as JSON.
pub fn run(dataset: Option<&Path>) -> error::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let data = match dataset {
        Some(path) => ReferenceData::from_path(path)?,
        None => ReferenceData::bundled()?,
    };
    let thresholds = Thresholds::load_or_default(&config::thresholds_path());

    let generated_at = chrono::Utc::now().naive_utc();
    let report = report::generate_shortage_report(&data.inventory, &thresholds, generated_at);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
