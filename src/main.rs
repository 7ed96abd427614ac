mod config;
mod shell;

use account_machine::{session::Session, workflow::Workflow};
use anyhow::{Context, Result};
use clap::Parser;
use config::{CliConfig, Config};
use std::{fs::File, io};
use tracing::{info, warn};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CliConfig::parse();

    run(&config)?;

    info!("Session closed");

    Ok(())
}

fn run<C: Config>(config: &C) -> Result<()> {
    let mut session = Session::new(Workflow::new(config.max_steps()));

    let Some(path) = config.script_path() else {
        let stdin = io::stdin();
        return shell::run_interactive(&mut session, stdin.lock(), io::stdout().lock());
    };

    let script = File::open(path).context("Failed to open script file")?;
    let summary = shell::replay_script(&mut session, script);

    info!(
        "Processed {} commands, skipped {} rejected commands",
        summary.processed, summary.skipped
    );

    match session.account() {
        Some(account) => {
            shell::write_history(account, io::stdout().lock()).context("Failed to write history")?
        }
        None => warn!("Script never created an account, nothing to report"),
    }

    Ok(())
}
