//! Parser for the fixed-width `icd10cm_order` file.

use crate::domain::model::CodeRecord;

// Order file layout (byte offsets, a fixed contract of the source format):
//   Columns   0-4: Sequence number
//   Columns  6-12: Code (non-decimal)
//   Column     14: HIPAA covered? (0/1)
//   Columns 16-75: Short description
//   Columns   77+: Long description
const CODE_COLUMNS: std::ops::Range<usize> = 6..13;
const COVERED_FLAG_COLUMN: usize = 14;
const COVERED_MARKER: u8 = b'1';
const LONG_DESC_COLUMN: usize = 77;

/// Reads covered code/description pairs out of the order file text.
///
/// Lines whose coverage flag is not set (or that are too short to carry one)
/// are skipped without error. Descriptions keep their trailing newline. The
/// result is sorted ascending by code.
pub fn parse_order_file(text: &str) -> Vec<CodeRecord> {
    let mut records: Vec<CodeRecord> = text
        .split_inclusive('\n')
        .filter(|line| line.as_bytes().get(COVERED_FLAG_COLUMN) == Some(&COVERED_MARKER))
        .map(|line| CodeRecord {
            code: line.get(CODE_COLUMNS).map(str::trim).unwrap_or("").to_string(),
            long_description: line.get(LONG_DESC_COLUMN..).unwrap_or("").to_string(),
        })
        .collect();

    records.sort_by(|a, b| {
        a.code
            .cmp(&b.code)
            .then_with(|| a.long_description.cmp(&b.long_description))
    });
    records
}
