use crate::error::Result;
use crate::parser::header::validate_header;
use crate::types::Row;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// A SkyView user log with a validated header row
pub struct SkyviewLog<R: Read> {
    header: Row,
    rows: Rows<R>,
}

impl SkyviewLog<File> {
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening log");
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> SkyviewLog<R> {
    /// Read and validate the header row. Data rows are left unread.
    pub fn from_reader(source: R) -> Result<Self> {
        let mut rows = Rows::new(source);
        let header = match rows.read_row()? {
            Some(header) => header,
            None => Row::new(Vec::new(), StringRecord::new(), 1),
        };
        validate_header(header.record())?;
        debug!(columns = header.record().len(), "header validated");

        Ok(Self { header, rows })
    }

    pub fn headers(&self) -> &StringRecord {
        self.header.record()
    }

    /// Header line exactly as read, terminator included
    pub fn header_line(&self) -> &[u8] {
        self.header.raw()
    }

    /// Consume the log into its single-pass row stream
    pub fn rows(self) -> Rows<R> {
        self.rows
    }

    /// Split into the raw header line and the row stream
    pub fn into_parts(self) -> (Vec<u8>, Rows<R>) {
        let Self { header, rows } = self;
        (header.into_raw(), rows)
    }
}

/// Lazy iterator over the data rows of a log.
///
/// Every physical line is one row, blank lines included, and keeps its
/// original bytes so it can be written back unchanged.
pub struct Rows<R: Read> {
    source: BufReader<R>,
    parser: ReaderBuilder,
    line: u64,
}

impl<R: Read> Rows<R> {
    fn new(source: R) -> Self {
        let mut parser = ReaderBuilder::new();
        parser.has_headers(false).flexible(true);
        Self {
            source: BufReader::new(source),
            parser,
            line: 0,
        }
    }

    fn read_row(&mut self) -> Result<Option<Row>> {
        let mut raw = Vec::new();
        if self.source.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        // A blank line yields no record and stays an empty row
        let mut record = StringRecord::new();
        self.parser
            .from_reader(raw.as_slice())
            .read_record(&mut record)?;
        Ok(Some(Row::new(raw, record, self.line)))
    }
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}
