//! Session Report Example
//!
//! Lists the recording sessions of a SkyView user log, optionally limited to
//! a date range, and writes the selected rows next to the input file.
//!
//! Usage: session_report <user_log.csv> [start] [end]

use skyview_log::{detect, render_report, select, write_filtered, Bound, SkyviewLog};
use std::fs::File;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let input_file = std::env::args().nth(1).unwrap_or_else(|| {
        println!("Usage: session_report <user_log.csv> [start] [end]");
        println!("Example: session_report user_log.csv 2017-01-29 2017-02-01");
        std::process::exit(1);
    });
    let start = std::env::args().nth(2).and_then(Bound::new);
    let end = std::env::args().nth(3).and_then(Bound::new);
    let input = Path::new(&input_file);

    // Sessions within the range
    let log = SkyviewLog::open(input)?;
    let blocks = detect(select(log.rows(), start.clone(), end.clone()))?;
    print!("{}", render_report(&blocks)?);

    // Second pass for the filtered copy, the row stream is single-use
    let (header, rows) = SkyviewLog::open(input)?.into_parts();
    let output_path = input.with_extension("filtered.csv");
    let written = write_filtered(&header, select(rows, start, end), File::create(&output_path)?)?;
    println!("\nWrote {} rows to {}", written, output_path.display());

    Ok(())
}
