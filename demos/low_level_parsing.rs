//! Example driving the loader, header parser and decoder separately.

use logysis::decoder::decode_record;
use logysis::header::parse_header;
use logysis::logfile::LogFile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = LogFile::from_file("run.log")?;
    let fields = parse_header(log.lines(), false)?;

    println!("Using low-level API for custom parsing...");
    println!();

    let mut decoded = 0;
    let mut failed = 0;

    // Unlike `LogReader::read_all`, keep going past records that fail
    for block in log.blocks()? {
        match decode_record(&block, &fields) {
            Ok(record) => {
                decoded += 1;
                println!(
                    "RECORD {} (line {}): {} field(s)",
                    block.index,
                    block.start + 1,
                    record.len()
                );
            }
            Err(e) => {
                failed += 1;
                println!("SKIPPED: {}", e);
            }
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!("Record Statistics:");
    println!("═══════════════════════════════════════");
    println!("  Lines: {}", log.lines().len());
    println!("  Sentinels: {}", log.sentinel_count());
    println!("  Decoded records: {}", decoded);
    println!("  Failed records: {}", failed);

    Ok(())
}
