use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use skillseed_client::http::build_client;
use skillseed_client::{BatchReport, BatchSubmitter, StatusTx};
use skillseed_core::Catalog;
use skillseed_core::config::Config;
use url::Url;

/// Seed a portfolio service with skill records.
#[derive(Debug, Parser)]
#[command(name = "skillseed", version, about)]
struct Cli {
    /// Config file (default: `SKILLSEED_CONFIG` or config/default.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `target.base_url`
    #[arg(long)]
    base_url: Option<String>,

    /// Seed from this TOML catalog instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the requests that would be sent and exit
    #[arg(long)]
    dry_run: bool,

    /// Exit with status 0 even if some records failed
    #[arg(long)]
    allow_failures: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_subscriber();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let (out_tx, out_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(forward_status_to_stdout(out_rx));
    let status = run(&config, cli.dry_run, out_tx).await;
    printer.await.context("status printer task failed")?;

    Ok(status?.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Success,
    RecordsFailed,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::RecordsFailed => ExitCode::FAILURE,
        }
    }
}

/// Seed the configured catalog, or only print it when `dry_run` is set.
///
/// Every stdout line goes through `out`, in order.
async fn run(config: &Config, dry_run: bool, out: StatusTx) -> anyhow::Result<RunStatus> {
    let catalog = config.catalog()?;
    let endpoint = config.endpoint()?;

    if dry_run {
        for line in dry_run_lines(&catalog, &endpoint)? {
            emit(&out, line);
        }
        return Ok(RunStatus::Success);
    }

    let client = build_client(config.connect_timeout(), config.request_timeout())
        .context("failed to build HTTP client")?;
    let submitter = BatchSubmitter::new(client, endpoint)?.with_status_tx(out.clone());

    emit(&out, "Starting to add skills...".to_owned());
    tracing::info!(
        endpoint = %submitter.endpoint(),
        records = catalog.len(),
        "seeding skills"
    );

    let report = submitter.submit_all(catalog.records()).await;
    emit(&out, format!("Finished adding skills! {}", report.summary()));

    if should_fail(&report, config.submit.fail_on_error) {
        for outcome in report.failures() {
            tracing::debug!(index = outcome.index, skill = %outcome.name, "failed record");
        }
        return Ok(RunStatus::RecordsFailed);
    }
    Ok(RunStatus::Success)
}

fn emit(out: &StatusTx, line: String) {
    if out.send(line).is_err() {
        tracing::debug!("stdout printer stopped, dropping line");
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config_path = resolve_config_path(cli);
    let mut config = Config::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    apply_cli_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

/// Priority: CLI --config > `SKILLSEED_CONFIG` env > config/default.toml
fn resolve_config_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.config {
        return path.clone();
    }
    if let Ok(path) = std::env::var("SKILLSEED_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.target.base_url.clone_from(base_url);
    }
    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.to_string_lossy().into_owned());
    }
    if cli.allow_failures {
        config.submit.fail_on_error = false;
    }
}

fn should_fail(report: &BatchReport, fail_on_error: bool) -> bool {
    fail_on_error && !report.is_success()
}

fn dry_run_lines(catalog: &Catalog, endpoint: &Url) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::with_capacity(catalog.len() + 1);
    for record in catalog.records() {
        let body = serde_json::to_string(record)?;
        lines.push(format!("POST {endpoint} {body}"));
    }
    lines.push(format!("dry run: {} skill(s), nothing sent", catalog.len()));
    Ok(lines)
}

async fn forward_status_to_stdout(mut rx: tokio::sync::mpsc::UnboundedReceiver<String>) {
    while let Some(line) = rx.recv().await {
        println!("{line}");
    }
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
