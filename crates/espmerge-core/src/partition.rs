//! Partition table CSV parsing
//!
//! Parses ESP-IDF style partition description files:
//!
//! ```csv
//! # Name,   Type, SubType, Offset,   Size,     Flags
//! nvs,      data, nvs,     0x9000,   0x5000,
//! factory,  app,  test,    0x10000,  0x100000,
//! ota_0,    app,  ota_0,   0x110000, 0x100000,
//! ```
//!
//! Parsing is deliberately permissive: comment lines, blank lines, rows with
//! too few fields and unparsable numbers are skipped without failing the
//! table. A missing file yields an empty table, which turns every downstream
//! layout check into a no-op.

use std::fs;
use std::path::Path;

/// One row of a partition description file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionRecord {
    /// Partition name
    pub name: String,
    /// Partition type (`app`, `data`, ...)
    pub ptype: String,
    /// Partition subtype, lowercased (`factory`, `test`, `ota_0`, ...)
    pub subtype: String,
    /// Flash offset; unset when the field did not parse
    pub offset: Option<u32>,
    /// Size in bytes; unset when the field did not parse
    pub size: Option<u32>,
}

/// Parsed partition table with derived layout facts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionTable {
    /// Well-formed rows, in file order
    pub records: Vec<PartitionRecord>,
    /// Size of the first partition with subtype `test`
    pub test_size: Option<u32>,
    /// Offset of the first partition with subtype `ota_0`
    pub ota0_offset: Option<u32>,
}

impl PartitionTable {
    /// Parse a partition CSV file.
    ///
    /// A file that cannot be read yields an empty table.
    pub fn from_csv_file(path: impl AsRef<Path>) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_csv_str(&content),
            Err(_) => PartitionTable::default(),
        }
    }

    /// Parse partition CSV content.
    ///
    /// The derived facts are accumulated in a single left-to-right pass;
    /// only the first `test` and first `ota_0` row count.
    pub fn from_csv_str(content: &str) -> Self {
        let mut table = PartitionTable::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 5 {
                continue;
            }

            let record = PartitionRecord {
                name: fields[0].to_string(),
                ptype: fields[1].to_string(),
                subtype: fields[2].to_ascii_lowercase(),
                offset: parse_number(fields[3]),
                size: parse_number(fields[4]),
            };

            if record.subtype == "test" && table.test_size.is_none() {
                table.test_size = record.size;
            }
            if record.subtype == "ota_0" && table.ota0_offset.is_none() {
                table.ota0_offset = record.offset;
            }
            table.records.push(record);
        }

        table
    }

    /// Number of parsed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a decimal or `0x`-hex integer field
fn parse_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "\
# Name,   Type, SubType, Offset,   Size,     Flags
nvs,      data, nvs,     0x9000,   0x5000,
factory,  app,  test,    0x10000,  0x100000,
ota_0,    app,  ota_0,   0x110000, 0x100000,
";

    #[test]
    fn parses_records_and_derived_facts() {
        let table = PartitionTable::from_csv_str(BASIC);
        assert_eq!(table.len(), 3);
        assert_eq!(table.test_size, Some(0x100000));
        assert_eq!(table.ota0_offset, Some(0x110000));
        assert_eq!(table.records[0].name, "nvs");
        assert_eq!(table.records[0].offset, Some(0x9000));
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(
            PartitionTable::from_csv_str(BASIC),
            PartitionTable::from_csv_str(BASIC)
        );
    }

    #[test]
    fn first_test_row_wins() {
        let csv = "\
a, app, test,  0x10000, 0x100000,
b, app, test,  0x20000, 0x200000,
";
        let table = PartitionTable::from_csv_str(csv);
        assert_eq!(table.test_size, Some(0x100000));
    }

    #[test]
    fn first_ota0_row_wins() {
        let csv = "\
a, app, ota_0, 0x110000, 0x100000,
b, app, ota_0, 0x210000, 0x100000,
";
        let table = PartitionTable::from_csv_str(csv);
        assert_eq!(table.ota0_offset, Some(0x110000));
    }

    #[test]
    fn skips_blank_comment_and_short_rows() {
        let csv = "\
# a comment

short, row
nvs, data, nvs, 0x9000, 0x5000,
";
        let table = PartitionTable::from_csv_str(csv);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].name, "nvs");
    }

    #[test]
    fn malformed_number_leaves_only_that_field_unset() {
        let csv = "factory, app, test, 0x10000, garbage,\n";
        let table = PartitionTable::from_csv_str(csv);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].offset, Some(0x10000));
        assert_eq!(table.records[0].size, None);
        assert_eq!(table.test_size, None);
    }

    #[test]
    fn accepts_decimal_and_hex() {
        let csv = "factory, app, test, 65536, 0x100000,\n";
        let table = PartitionTable::from_csv_str(csv);
        assert_eq!(table.records[0].offset, Some(65536));
        assert_eq!(table.test_size, Some(0x100000));
    }

    #[test]
    fn subtype_matching_is_case_insensitive() {
        let csv = "factory, app, TEST, 0x10000, 0x100000,\n";
        let table = PartitionTable::from_csv_str(csv);
        assert_eq!(table.test_size, Some(0x100000));
    }

    #[test]
    fn missing_file_yields_empty_table() {
        let table = PartitionTable::from_csv_file("/nonexistent/partitions.csv");
        assert!(table.is_empty());
        assert_eq!(table.test_size, None);
        assert_eq!(table.ota0_offset, None);
    }
}
