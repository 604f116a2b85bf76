use chrono::{DateTime, Datelike, Local};

/// One HIPAA-covered diagnosis code with its long description, as read from
/// the fixed-width order file. The description keeps its trailing newline so
/// the renderer can emit it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub code: String,
    pub long_description: String,
}

/// Result of menu-link discovery: the absolute URL of the current year's code
/// page and the year label taken from the link text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResult {
    pub url: String,
    pub year: String,
}

/// One rendered global export file, ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub contents: String,
}

/// Ordinal day (days since 0001-01-01) of the internal julian epoch. The real
/// epoch is business-specific; this placeholder matches the published value.
pub const DAY_COUNTER_EPOCH: i64 = 726_345;

/// Clock values shared by all three export files in one render. "Now" is
/// sampled once and carried here so the files stay internally consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub timestamp: String,
    pub day_counter: i64,
    pub year: String,
}

impl RenderContext {
    pub fn new(now: DateTime<Local>, year: &str) -> Self {
        Self {
            timestamp: now.format("%-d %b %Y   %-I:%M %p").to_string(),
            day_counter: i64::from(now.date_naive().num_days_from_ce()) - DAY_COUNTER_EPOCH,
            year: year.to_string(),
        }
    }
}
