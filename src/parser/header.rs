use crate::error::{Result, SkyviewError};
use csv::StringRecord;

/// Name the first header column must carry for a file to be a SkyView user log
pub const SESSION_TIME_HEADER: &str = "Session Time";

/// Check that the header row starts with the `Session Time` column
pub fn validate_header(headers: &StringRecord) -> Result<()> {
    let first = headers
        .get(0)
        .map(|name| name.trim_start_matches('\u{feff}').trim())
        .unwrap_or("");

    if first == SESSION_TIME_HEADER {
        Ok(())
    } else {
        Err(SkyviewError::InvalidHeader(format!(
            "input file is missing '{}' as first header item (found '{}')",
            SESSION_TIME_HEADER, first
        )))
    }
}
