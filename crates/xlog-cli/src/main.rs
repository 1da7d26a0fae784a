//! xlog CLI
//!
//! Reads log lines from stdin and writes them through a sink.
//!
//! ## Usage
//!
//! ```bash
//! # Colorize level tokens on the terminal, hide DEBUG lines
//! my-service 2>&1 | xlog
//!
//! # Only WARN and above, appended to a file
//! my-service | xlog --min-level warn --output /var/log/my-service.log
//!
//! # Sink described by a JSON config
//! my-service | xlog --config sink.json
//! ```
//!
//! Each line's level is the first token found among WARN, ERROR, FATAL,
//! DEBUG and INFO. Lines with no token count as INFO.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use xlog_core::{LogLevel, Sink, SinkConfig, SinkTarget};

/// xlog - leveled log sink for piped output
#[derive(Parser)]
#[command(name = "xlog")]
#[command(version = "0.1.0")]
#[command(about = "Filter and colorize leveled log lines from stdin")]
struct Cli {
    /// Increase verbosity of xlog's own diagnostics (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sink name; "stdout" colorizes level tokens (default: named after the target)
    #[arg(short, long)]
    name: Option<String>,

    /// Drop lines below this level (debug, info, warn, error, fatal)
    #[arg(short = 'l', long, default_value = "info")]
    min_level: LogLevel,

    /// Append to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build the sink from a JSON config file
    #[arg(short, long, conflicts_with_all = ["name", "output", "min_level"])]
    config: Option<PathBuf>,
}

impl Cli {
    fn sink_config(&self) -> Result<SinkConfig> {
        if let Some(path) = &self.config {
            return SinkConfig::from_file(path)
                .with_context(|| format!("Failed to load sink config {}", path.display()));
        }

        let target = match &self.output {
            Some(path) => SinkTarget::File(path.clone()),
            None => SinkTarget::Stdout,
        };
        let mut config = SinkConfig::new(target);
        config.name = self.name.clone();
        config.min_level = self.min_level;
        Ok(config)
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Pipe every line of `input` into `sink`.
fn pump(mut input: impl BufRead, sink: &dyn Sink) -> Result<u64> {
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }

        // The sink adds its own newline
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        let level = LogLevel::detect(&line).unwrap_or(LogLevel::Info);
        sink.log(level, &line);
        count += 1;
    }

    Ok(count)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = cli.sink_config()?;
    let sink = config.build().context("Failed to build sink")?;

    let stdin = io::stdin();
    let count = pump(stdin.lock(), &*sink)?;

    tracing::info!(lines = count, sink = %config.sink_name(), "input drained");
    Ok(())
}
