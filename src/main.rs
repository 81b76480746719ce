// s3insights: Reports on the activity, size and cost of AWS S3 buckets.
#![forbid(unsafe_code)]
use anyhow::{
    Context,
    Result,
};
use chrono::Local;
use common::ClientConfig;
use std::process::ExitCode;
use tracing::{
    debug,
    error,
    info,
};
use tracing_subscriber::EnvFilter;

mod cli;
mod cloudwatch;
mod collector;
mod common;
mod cost_explorer;
mod report;
mod s3;
mod table;

use collector::InsightCollector;
use common::BucketLister;
use report::ReportContext;
use table::InsightTable;

// Log to stderr at info unless RUST_LOG says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = cli::parse_args();

    match run(&config).await {
        Ok(())   => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);

            ExitCode::FAILURE
        },
    }
}

// Enumerate, collect and report. Errors returned here end the run without
// any reports.
async fn run(config: &ClientConfig) -> Result<()> {
    info!("Using AWS Profile: '{}'", config.profile);

    let sdk_config = config.sdk_config().await;
    debug!("run: SDK config {:?}", sdk_config);

    let s3_client         = s3::Client::new(&sdk_config);
    let cloudwatch_client = cloudwatch::Client::new(&sdk_config);
    let cost_client       = cost_explorer::Client::new(&sdk_config);

    let buckets = s3_client.buckets()
        .await
        .context("Failed to list buckets")?;

    if buckets.is_empty() {
        info!("No buckets were found. Reports not generated.");

        return Ok(());
    }

    info!("Found {} buckets", buckets.len());

    let collector = InsightCollector::new(
        &config.profile,
        &s3_client,
        &cloudwatch_client,
        &cost_client,
    );

    let outcomes = collector.collect(&buckets).await;
    let table    = InsightTable::from_outcomes(outcomes);

    info!(
        "Analysis complete: {} buckets enumerated, {} collected, {} skipped",
        buckets.len(),
        table.len(),
        table.skipped(),
    );

    let context = ReportContext {
        profile:      &config.profile,
        output_dir:   &config.output_dir,
        generated_at: Local::now(),
    };

    let paths = report::generate(&table, &context)?;

    for path in paths {
        info!("Report written: {}", path.display());
    }

    Ok(())
}
