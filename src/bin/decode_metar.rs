//! Decode METAR reports from the command line.
//!
//! Reports are taken from the positional arguments, or read one per line
//! from stdin when none are given. Each decoded report is printed as JSON.

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::Parser;

use metar_info::{decode, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "decode_metar")]
#[command(about = "Decode METAR reports into human-readable JSON")]
struct Args {
    /// Reference date for the observation time, e.g. "2024/01/15 19:51"
    #[arg(short, long)]
    date: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Report text; each argument is one report
    reports: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let reports = if args.reports.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read reports from stdin")?
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        args.reports
    };

    let mut failures = 0;
    for raw in &reports {
        match decode(raw, args.date.as_deref()) {
            Ok(rendered) => {
                let json = serde_json::to_string_pretty(&rendered)
                    .context("Failed to serialize decoded report")?;
                println!("{}", json);
            }
            Err(e) => {
                eprintln!("{}: {}", raw.trim(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} reports failed to decode", failures, reports.len());
    }
    Ok(())
}
