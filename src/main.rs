use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use log::{debug, info};

use repo_languages::{
    ApiToken, CollectionTarget, CsvPersister, DEFAULT_PAGE_SIZE, DatasetExporter,
    GITHUB_API_ENDPOINT, GITHUB_API_VERSION, RestFetcher, SequentialCollector, StdResult,
};

/// Command line arguments for the repository languages exporter
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Accounts whose public repositories are collected
    #[arg(short, long, value_delimiter = ',', default_value = "amzn,netflix,spotify,apple")]
    accounts: Vec<String>,

    /// Directory where one CSV dataset per account is written
    #[arg(short, long, default_value = "data")]
    output_dir: PathBuf,

    /// Number of repositories requested per page
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u16,

    /// GitHub REST API endpoint
    #[arg(long, default_value = GITHUB_API_ENDPOINT)]
    api_base_url: String,

    /// GitHub REST API version
    #[arg(long, default_value = GITHUB_API_VERSION)]
    api_version: String,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Timeout of a single API request, in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    info!("Starting repository languages export");
    let args = Args::parse();
    let targets = prepare_targets(&args.accounts, &args.output_dir);
    debug!("Targets: {targets:?}");

    let exporter = build_exporter(&args)?;
    let reports = exporter.export(&targets).await;
    for report in &reports {
        info!(
            "Exported {} rows for {} to {} (failed pages: {})",
            report.total_rows,
            report.account,
            report.destination.display(),
            report.failed_pages.len()
        );
    }
    info!(
        "Export completed: {}/{} accounts exported",
        reports.len(),
        targets.len()
    );

    Ok(())
}

fn prepare_targets(accounts: &[String], output_dir: &std::path::Path) -> Vec<CollectionTarget> {
    accounts
        .iter()
        .map(|account| account.trim())
        .filter(|account| !account.is_empty())
        .map(|account| {
            CollectionTarget::new(
                account,
                &output_dir.join(format!("most_used_languages_{account}.csv")),
            )
        })
        .collect::<Vec<_>>()
}

fn build_exporter(args: &Args) -> StdResult<DatasetExporter> {
    let fetcher = Arc::new(RestFetcher::try_new(
        &args.api_base_url,
        &ApiToken::new(&args.github_token),
        &args.api_version,
        Duration::from_secs(args.request_timeout_secs),
    )?);
    let collector = Arc::new(SequentialCollector::new(fetcher));
    let persister = Arc::new(CsvPersister::new());

    Ok(DatasetExporter::new(collector, persister, args.page_size))
}
