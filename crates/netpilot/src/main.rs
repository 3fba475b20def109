//! netpilot - run one network diagnosis and save the result.

use anyhow::{Context, Result};
use clap::Parser;
use netpilot::artifact::write_artifact;
use netpilot::output::{self, ConsoleObserver};
use netpilot::{NetpilotConfig, NoopObserver, Orchestrator, StageObserver, SystemProbeRunner};
use netpilot_shared::NetpilotError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netpilot")]
#[command(about = "Automated network troubleshooting: ping, plan, trace, validate, report", long_about = None)]
#[command(version)]
struct Cli {
    /// Network issue to troubleshoot
    #[arg(long)]
    issue: Option<String>,

    /// Target IP or hostname
    #[arg(long)]
    target: Option<String>,

    /// Config file (TOML); falls back to $NETPILOT_CONFIG, then built-in defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the diagnosis JSON (overrides config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Suppress stage progress and the final report
    #[arg(long, short)]
    quiet: bool,

    /// Print the full diagnosis as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        NetpilotConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    let output_dir = config.output.directory.clone();
    debug!("Effective config: {:?}", config);

    let observer: Arc<dyn StageObserver> = if cli.quiet || cli.json {
        Arc::new(NoopObserver)
    } else {
        Arc::new(ConsoleObserver)
    };

    let orchestrator =
        Orchestrator::new(config, Arc::new(SystemProbeRunner::new())).with_observer(observer);
    let ctx = orchestrator
        .run(cli.issue.as_deref(), cli.target.as_deref())
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ctx)?);
    } else if !cli.quiet {
        output::display_final_report(&ctx);
    }

    let path = write_artifact(&ctx, &output_dir).context("could not save diagnosis")?;
    if cli.json {
        output::display_saved_stderr(&path);
    } else {
        output::display_saved(&path);
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::display_error(&format!("{:#}", e));
            let code = e
                .downcast_ref::<NetpilotError>()
                .map(|ne| ne.exit_code())
                .unwrap_or(1);
            ExitCode::from(code.clamp(1, 255) as u8)
        }
    }
}
