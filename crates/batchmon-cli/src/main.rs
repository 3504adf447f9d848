use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use batchmon_core::app::parse_name_list;
use batchmon_core::domain::{JobName, JobStatus};
use batchmon_core::impls::AwsBatchApi;
use batchmon_core::observability::RenderText;
use batchmon_core::{BatchMonitor, MonitorConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;

/// Job counts and failed-job reports for AWS Batch queues.
#[derive(Debug, Parser)]
#[command(name = "batchmon", version, about, long_about = None)]
struct Cli {
    /// TOML config file (region, endpoint_url, default_queue, credentials)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `region` from the config file
    #[arg(long, global = true, env = "BATCHMON_REGION")]
    region: Option<String>,

    /// Overrides `endpoint_url` from the config file
    #[arg(long, global = true, env = "BATCHMON_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count jobs in one status
    Count {
        #[command(flatten)]
        queue: QueueArg,

        /// SUBMITTED, PENDING, RUNNABLE, STARTING, RUNNING, SUCCEEDED or FAILED
        #[arg(short, long, value_parser = clap::value_parser!(JobStatus))]
        status: JobStatus,

        /// Also list job ids and names
        #[arg(long)]
        ids: bool,
    },

    /// Names of failed jobs that never succeeded under the same name
    Failed {
        #[command(flatten)]
        queue: QueueArg,

        /// File of succeeded job names kept outside the service (one per line)
        #[arg(long)]
        external_succeeded: Option<PathBuf>,

        /// File of failed job names kept outside the service (one per line)
        #[arg(long)]
        external_failed: Option<PathBuf>,
    },

    /// Counts for every status
    Summary {
        #[command(flatten)]
        queue: QueueArg,
    },
}

#[derive(Debug, Args)]
struct QueueArg {
    /// Job queue name or ARN; falls back to `default_queue`
    #[arg(short, long)]
    queue: Option<String>,
}

fn init_tracing(log_level: &str) {
    // stdout はレポート専用、ログは stderr へ
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File values first, then command line / environment overrides.
fn resolve_config(cli: &Cli) -> Result<MonitorConfig> {
    let mut config = MonitorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(region) = &cli.region {
        config.region = region.clone();
    }
    if let Some(endpoint) = &cli.endpoint_url {
        config.endpoint_url = Some(endpoint.clone());
    }
    config.validate()?;
    Ok(config)
}

fn read_names(path: Option<&Path>) -> Result<Vec<JobName>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading name list {}", path.display()))?;
    Ok(parse_name_list(&text))
}

fn emit<T: serde::Serialize + RenderText>(format: OutputFormat, report: &T) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    // (A) 設定を組み立てる（ファイル → CLI/環境変数で上書き）
    let config = resolve_config(&cli)?;

    // (B) AWS クライアントとモニターを用意
    let api = AwsBatchApi::from_config(&config)
        .await
        .context("failed to configure batch client")?;
    let monitor = BatchMonitor::new(api);

    // (C) サブコマンドを実行してレポートを出力
    match &cli.command {
        Command::Count { queue, status, ids } => {
            let queue = config.resolve_queue(queue.queue.as_deref())?;
            let report = monitor.count_jobs(queue, *status, *ids).await?;
            emit(cli.format, &report)?;
        }
        Command::Failed {
            queue,
            external_succeeded,
            external_failed,
        } => {
            let queue = config.resolve_queue(queue.queue.as_deref())?;
            let succeeded = read_names(external_succeeded.as_deref())?;
            let failed = read_names(external_failed.as_deref())?;
            info!(
                external_succeeded = succeeded.len(),
                external_failed = failed.len(),
                "loaded external name lists"
            );

            let names = monitor.failed_jobs_by_name(queue, succeeded, failed).await?;
            match cli.format {
                OutputFormat::Text => {
                    for name in &names {
                        println!("{name}");
                    }
                }
                OutputFormat::Json => {
                    let body = json!({ "queue": queue, "failed": names });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
            }
        }
        Command::Summary { queue } => {
            let queue = config.resolve_queue(queue.queue.as_deref())?;
            let report = monitor.status_summary(queue).await?;
            emit(cli.format, &report)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    run(cli).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_count_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "batchmon", "count", "-q", "etl", "-s", "FAILED", "--ids", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Count { queue, status, ids } => {
                assert_eq!(queue.queue.as_deref(), Some("etl"));
                assert_eq!(status, JobStatus::Failed);
                assert!(ids);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bad_status_is_a_usage_error() {
        let err = Cli::try_parse_from(["batchmon", "count", "-q", "etl", "-s", "failed"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("SUBMITTED, PENDING"));
    }

    #[test]
    fn count_requires_status() {
        assert!(Cli::try_parse_from(["batchmon", "count", "-q", "etl"]).is_err());
    }

    #[test]
    fn cli_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region = \"eu-west-1\"\ndefault_queue = \"etl\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "batchmon",
            "--config",
            path.as_str(),
            "--region",
            "us-east-2",
            "summary",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.region, "us-east-2");
        assert_eq!(config.resolve_queue(None).unwrap(), "etl");
    }

    #[test]
    fn missing_name_list_is_empty_and_bad_path_is_an_error() {
        assert!(read_names(None).unwrap().is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a\n# comment\nb").unwrap();
        let names = read_names(Some(file.path())).unwrap();
        assert_eq!(names, vec![JobName::new("a"), JobName::new("b")]);

        let missing = file.path().with_extension("nope");
        assert!(read_names(Some(missing.as_path())).is_err());
    }
}
