//! Partition table command implementations

use espmerge_core::partition::PartitionTable;
use std::path::Path;

/// Parse a partition CSV and print it
pub fn cmd_show(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = PartitionTable::from_csv_file(file);
    print_table(&table);
    Ok(())
}

/// Print partition table information
fn print_table(table: &PartitionTable) {
    println!("Partition Table");
    println!("===============");
    println!();
    println!(
        "{:<16} {:<8} {:<10} {:>10} {:>10}",
        "Name", "Type", "SubType", "Offset", "Size"
    );
    println!("{:-<58}", "");

    for record in &table.records {
        println!(
            "{:<16} {:<8} {:<10} {:>10} {:>10}",
            record.name,
            record.ptype,
            record.subtype,
            format_field(record.offset),
            format_field(record.size),
        );
    }

    println!();
    println!("Test partition size: {}", format_field(table.test_size));
    println!("ota_0 offset:        {}", format_field(table.ota0_offset));
}

fn format_field(value: Option<u32>) -> String {
    match value {
        Some(v) => format!("{:#x}", v),
        None => "-".to_string(),
    }
}
