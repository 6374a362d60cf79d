use anyhow::Context;
use clap::Parser;
use container_env::config::{read_request, RequestOverrides, STDIN_PATH};
use container_env::reconciliation::{execute_reconciliation, ReconcileOptions};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Container Env - render container environment and properties files,
/// rewriting only what changed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON request document with the base directory and containers.
    /// Use "-" to read it from stdin.
    #[arg(short, long, env = "CONTAINER_ENV_REQUEST", default_value = STDIN_PATH)]
    request: PathBuf,

    /// Directory holding one subdirectory per container (overrides the request)
    #[arg(short, long, env = "CONTAINER_ENV_BASE_DIRECTORY")]
    base_directory: Option<PathBuf>,

    /// Owner of written files, as user name or uid
    #[arg(long)]
    owner: Option<String>,

    /// Group of written files, as group name or gid
    #[arg(long)]
    group: Option<String>,

    /// Mode of written files as an octal string, e.g. 0640
    #[arg(long)]
    mode: Option<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    check: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            let failure = json!({
                "changed": false,
                "failed": true,
                "msg": format!("{:#}", e),
            });
            println!("{:#}", failure);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<String> {
    let request = read_request(&args.request)
        .await
        .with_context(|| format!("Failed to read request from {}", args.request.display()))?
        .with_overrides(RequestOverrides {
            base_directory: args.base_directory,
            owner: args.owner,
            group: args.group,
            mode: args.mode,
            check_mode: args.check,
        });

    let base_directory = request.base_directory()?.to_path_buf();
    info!(
        base_directory = %base_directory.display(),
        containers = request.container.len(),
        check_mode = request.check_mode,
        "Reconciling container files"
    );

    let options = ReconcileOptions {
        attributes: request.attributes.clone(),
        check_mode: request.check_mode,
    };
    let result = execute_reconciliation(&base_directory, &request.container, &options)
        .await
        .context("Reconciliation failed")?;

    Ok(serde_json::to_string_pretty(&result)?)
}
