// ABOUTME: CLI for auditing a channel export with the tubeaudit engine.
// ABOUTME: Reads the input document from a file or stdin and prints the analysis report as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tubeaudit_engine::{Auditor, FixedClock};

/// Audit a channel's videos and output the analysis report as JSON.
#[derive(Parser, Debug)]
#[command(name = "tubeaudit")]
#[command(about = "Score a channel's metadata, engagement and schedule and print JSON", long_about = None)]
struct Args {
    /// Input document path. Use "-" to read from stdin.
    input: String,

    /// Pin "now" (RFC 3339) for reproducible recency metrics.
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Write the report to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Maximum number of quick wins in the report.
    #[arg(long, default_value_t = 10)]
    quick_win_limit: usize,
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {err}"))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut builder = Auditor::builder().quick_win_limit(args.quick_win_limit);
    if let Some(now) = args.now {
        builder = builder.clock(FixedClock::new(now));
    }
    let auditor = builder.build();

    let bytes = load_bytes(&args.input)?;
    let report = auditor
        .analyze_bytes(&bytes)
        .with_context(|| format!("could not audit {}", args.input))?;

    let rendered = if args.compact {
        serde_json::to_string(&report)?
    } else {
        report.to_json_pretty()?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered + "\n")
                .with_context(|| format!("could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read(path)?)
}
