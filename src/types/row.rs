use crate::error::{Result, SkyviewError};
use csv::StringRecord;

/// Column index of the monotonic session counter (`Session Time`)
pub const COUNTER_FIELD: usize = 0;
/// Column index of the `YYYY-MM-DD[ HH:MM:SS]` timestamp
pub const TIMESTAMP_FIELD: usize = 3;

/// One line of a SkyView user log: its original bytes and the parsed fields
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    raw: Vec<u8>,
    record: StringRecord,
    line: u64,
}

impl Row {
    pub fn new(raw: Vec<u8>, record: StringRecord, line: u64) -> Self {
        Self { raw, record, line }
    }

    /// Build a row from field values, mostly useful for tests and demos.
    /// The raw line is the fields joined by commas, unquoted, with `\n`.
    pub fn from_fields<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let record: StringRecord = fields.into_iter().collect();
        let mut raw = record.iter().collect::<Vec<_>>().join(",").into_bytes();
        raw.push(b'\n');
        Self {
            raw,
            record,
            line: 0,
        }
    }

    /// Source line number (1-based, header is line 1), 0 when built in memory
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn record(&self) -> &StringRecord {
        &self.record
    }

    /// The line exactly as read, terminator included
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }

    /// Timestamp field, empty when the column is blank or missing
    pub fn timestamp(&self) -> &str {
        self.record.get(TIMESTAMP_FIELD).unwrap_or("")
    }

    pub fn has_timestamp(&self) -> bool {
        !self.timestamp().is_empty()
    }

    /// Parse the session counter field
    pub fn counter(&self) -> Result<f64> {
        let raw = self.record.get(COUNTER_FIELD).unwrap_or("");
        raw.trim()
            .parse::<f64>()
            .map_err(|_| SkyviewError::InvalidCounter {
                line: self.line,
                value: raw.to_string(),
            })
    }
}
