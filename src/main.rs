//! Command-line interface for the log decoder.
//!
//! Decodes one log file and prints its records to stdout as JSON.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::{info, LevelFilter};
use logysis::LogReader;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Decode a sentinel-delimited log file into records",
    long_about = "Parses the ### schema header and the --- delimited record blocks of a log file \
                  and prints the decoded records as JSON."
)]
struct Args {
    /// Log file to decode
    #[arg(value_name = "LOGFILE")]
    logfile: String,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Wrong argument count is not treated as a failure.
            eprintln!("{}", e);
            return Ok(());
        }
    };

    let start_time = Instant::now();

    let reader = LogReader::from_file(&args.logfile)
        .with_context(|| format!("failed to read '{}'", args.logfile))?;
    let records = reader
        .read_all()
        .with_context(|| format!("failed to decode '{}'", args.logfile))?;

    println!("{}", serde_json::to_string_pretty(&records)?);

    info!(
        "✓ {} record(s) from {} in {:.2?}",
        records.len(),
        args.logfile,
        start_time.elapsed()
    );

    Ok(())
}
