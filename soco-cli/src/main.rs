use anyhow::{Context, Result};
use clap::Parser;
use soco::{SoapConfig, SonosSpeaker};
use tracing::debug;

mod cli;
mod logging;

use cli::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;

    logging::init_logging(&args.log_level.to_lowercase()).context("Failed to initialize logging")?;

    let mut config = SoapConfig::from_env();
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    debug!(host = %args.host, port = config.port, command = args.command.name(), "running command");

    let speaker = SonosSpeaker::with_config(args.host.as_str(), config);
    let output = run(&speaker, &args.command)
        .with_context(|| format!("'{}' failed on {}", args.command.name(), args.host))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.to_json())?);
    } else {
        println!("{}", output);
    }

    Ok(())
}
