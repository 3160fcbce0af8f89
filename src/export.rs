//! Output for the `filter` and `showdates` commands
//!
//! `filter` copies the header line followed by the selected lines, byte for
//! byte as they were read.
//! `showdates` renders one line per detected session block.

use crate::error::Result;
use crate::types::{format_duration, Row, SessionBlock};
use std::io::Write;
use tracing::debug;

#[cfg(feature = "json")]
use serde::Serialize;

pub const NO_DATES_MESSAGE: &str = "No dates found.";
pub const REPORT_COLUMNS: &str =
    "Number. [StartSession--EndSession] [StartDateTime--EndDateTime] Duration";

/// Write the header line and every selected row unchanged to `sink`,
/// returning the row count
pub fn write_filtered<W, I>(header_line: &[u8], rows: I, mut sink: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Result<Row>>,
{
    sink.write_all(header_line)?;

    let mut written = 0;
    for row in rows {
        sink.write_all(row?.raw())?;
        written += 1;
    }
    sink.flush()?;

    debug!(rows = written, "filtered rows written");
    Ok(written)
}

/// Format one report line, `index` is 1-based
pub fn format_block_line(index: usize, block: &SessionBlock) -> Result<String> {
    let duration = block.duration()?;
    Ok(format!(
        "{:2}. [{:8.2}--{:8.2}] [{}--{}] {}",
        index,
        block.start_counter,
        block.end_counter,
        block.start_timestamp,
        block.end_timestamp,
        format_duration(duration)
    ))
}

/// Render the full `showdates` report
pub fn render_report(blocks: &[SessionBlock]) -> Result<String> {
    if blocks.is_empty() {
        return Ok(format!("{NO_DATES_MESSAGE}\n"));
    }

    let mut report = format!("Found {} dates:\n{}\n", blocks.len(), REPORT_COLUMNS);
    for (i, block) in blocks.iter().enumerate() {
        report.push_str(&format_block_line(i + 1, block)?);
        report.push('\n');
    }
    Ok(report)
}

pub fn write_report<W: Write>(blocks: &[SessionBlock], mut out: W) -> Result<()> {
    out.write_all(render_report(blocks)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(feature = "json")]
#[derive(Debug, Serialize)]
struct BlockReport<'a> {
    number: usize,
    #[serde(flatten)]
    block: &'a SessionBlock,
    duration_seconds: i64,
}

/// Render the blocks as a pretty-printed JSON array
#[cfg(feature = "json")]
pub fn render_report_json(blocks: &[SessionBlock]) -> Result<String> {
    let entries = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            Ok(BlockReport {
                number: i + 1,
                block,
                duration_seconds: block.duration()?.num_seconds(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(serde_json::to_string_pretty(&entries)?)
}
