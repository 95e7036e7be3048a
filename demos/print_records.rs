//! Example showing field metadata and a per-record summary.

use logysis::LogReader;

fn main() -> Result<(), logysis::Error> {
    let reader = LogReader::from_file("run.log")?;

    println!("═══════════════════════════════════════");
    println!("Log File Analysis");
    println!("═══════════════════════════════════════");
    println!();

    println!("📝 Fields:");
    for field in reader.fields() {
        println!("  {}. {} ({})", field.position + 1, field.name, field.field_type);
    }
    println!();

    let records = reader.read_all()?;

    println!("📈 First 5 Records:");
    for (i, record) in records.iter().take(5).enumerate() {
        let summary: Vec<String> = record
            .iter()
            .map(|(name, value)| match value.shape() {
                Some(shape) => format!("{}={}{:?}", name, value.type_name(), shape),
                None => format!("{}={}", name, value.type_name()),
            })
            .collect();
        println!("  {}: {}", i + 1, summary.join(", "));
    }
    if records.len() > 5 {
        println!("  ... and {} more", records.len() - 5);
    }

    Ok(())
}
