//! Signal notifier entry point
//!
//! Reads message units as JSON files and writes an SMD file for each signal.

use anyhow::{bail, Context, Result};
use clap::Parser;
use notifier_config::{load_config, NotifierConfig};
use signal_notifier::SignalNotifierFactory;
use signal_types::MessageUnit;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, conflicts_with = "target_dir")]
    config: Option<PathBuf>,

    /// Directory to write SMD files to, instead of a configuration file
    #[arg(short, long)]
    target_dir: Option<PathBuf>,

    /// Include all receipt content instead of only the first element
    #[arg(long)]
    include_receipt_content: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Message unit JSON files to deliver
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "signal_notifier=info,warn".into());
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Starting signal notifier v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.target_dir {
        Some(dir) => NotifierConfig::new(dir, false),
        None => load_config(args.config.as_deref())?,
    };
    if args.include_receipt_content {
        config.include_receipt_content = true;
    }

    let factory = SignalNotifierFactory::from_config(config)?;
    let notifier = factory.create_deliverer();

    let mut failures = 0usize;
    for input in &args.inputs {
        let delivered = read_message_unit(input)
            .and_then(|unit| notifier.notify(&unit).map_err(anyhow::Error::from));
        match delivered {
            Ok(path) => info!("Delivered {:?} as {:?}", input, path),
            Err(e) => {
                error!("Failed to deliver {:?}: {:#}", input, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} deliveries failed", failures, args.inputs.len());
    }
    Ok(())
}

fn read_message_unit(path: &Path) -> Result<MessageUnit> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse message unit {:?}", path))
}
