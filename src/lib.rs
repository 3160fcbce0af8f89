//! SkyView Log Library
//!
//! A Rust library for working with Dynon SkyView user log exports (CSV files
//! whose first column is `Session Time`). It finds the distinct recording
//! sessions in a log, extracts a date-bounded subset of rows, and uploads
//! files to savvyanalysis.com.
//!
//! # Features
//!
//! - **`cli`** (default): Build the `skyview` command-line binary
//! - **`upload`** (default): HTTP client for the savvyanalysis.com service
//! - **`json`**: JSON rendering of the session report
//! - **`serde`**: Enable serialization/deserialization of [`SessionBlock`]
//!
//! # Quick Start
//!
//! List the recording sessions in a log:
//! ```rust,no_run
//! use skyview_log::{detect, select, Bound, SkyviewLog};
//! use std::path::Path;
//!
//! let log = SkyviewLog::open(Path::new("user_log.csv")).unwrap();
//! let rows = select(log.rows(), Bound::new("2017-01-29"), Bound::new("2017-02-01"));
//! for block in detect(rows).unwrap() {
//!     println!("{} -> {}", block.start_timestamp, block.end_timestamp);
//! }
//! ```
//!
//! Cut a date range out of a log:
//! ```rust,no_run
//! use skyview_log::{select, write_filtered, Bound, SkyviewLog};
//! use std::path::Path;
//!
//! let (header, rows) = SkyviewLog::open(Path::new("user_log.csv")).unwrap().into_parts();
//! let selected = select(rows, Bound::new("2017-01-28 20:04:34"), None);
//! write_filtered(&header, selected, std::io::stdout()).unwrap();
//! ```
//!
//! # Public API
//!
//! ## Reading
//! - [`SkyviewLog`] - Header-validated reader with a lazy [`Row`] stream
//! - [`validate_header`] - Check the `Session Time` header column
//!
//! ## Selection and detection
//! - [`select`] / [`RangeSelector`] - Date-prefix range selection
//! - [`detect`] / [`SessionBlockDetector`] - Session block detection
//!
//! ## Output
//! - [`write_filtered`] - Header line plus selected rows, copied unchanged
//! - [`render_report`] - `showdates` report text
//!
//! ## Upload
//! - [`AnalysisService`] - Login/upload capability
//! - [`SavvyClient`] - savvyanalysis.com implementation
//! - [`upload_file`] - Login then upload workflow

// Module declarations
pub mod blocks;
pub mod config;
pub mod error;
pub mod export;
pub mod parser;
pub mod selector;
pub mod types;
#[cfg(feature = "upload")]
pub mod upload;

// Re-export everything from modules for convenience
pub use blocks::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use parser::*;
pub use selector::*;
pub use types::*;
#[cfg(feature = "upload")]
pub use upload::*;
