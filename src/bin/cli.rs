//! cqlwire CLI
//!
//! Encode and decode single CQL values from the command line.

use clap::Parser;
use cqlwire::cli::{self, Commands};
use cqlwire::config::MAX_PROTOCOL_VERSION;
use cqlwire::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// cqlwire CLI
#[derive(Parser, Debug)]
#[command(name = "cqlwire-cli")]
#[command(about = "Encode and decode CQL values in native protocol format")]
#[command(version)]
struct Args {
    /// Native protocol version
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(1..=MAX_PROTOCOL_VERSION as i64))]
    protocol_version: u8,

    /// Report unresolvable types as errors
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let args = Args::parse();

    let config = Config::builder()
        .protocol_version(args.protocol_version)
        .strict_resolution(args.strict)
        .build();

    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cqlwire CLI v{}", cqlwire::VERSION);

    match cli::run(&config, args.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
