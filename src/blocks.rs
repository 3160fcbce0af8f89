//! Recording session detection
//!
//! The `Session Time` counter only grows while the unit keeps recording. A
//! decrease between two timestamped rows means a new session started, so the
//! open block is closed and a fresh one opened on the row that went backwards.

use crate::error::Result;
use crate::types::{Row, SessionBlock};
use tracing::debug;

/// Accumulator state of the detector
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorState {
    /// No timestamped row seen yet
    Empty,
    /// Block currently being extended
    Open(SessionBlock),
}

/// Groups rows into session blocks one row at a time
#[derive(Debug)]
pub struct SessionBlockDetector {
    state: DetectorState,
    blocks: Vec<SessionBlock>,
}

impl Default for SessionBlockDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBlockDetector {
    pub fn new() -> Self {
        Self {
            state: DetectorState::Empty,
            blocks: Vec::new(),
        }
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    /// Blocks closed so far, not counting the open one
    pub fn closed_blocks(&self) -> &[SessionBlock] {
        &self.blocks
    }

    /// Feed one row. Rows without a timestamp leave the state untouched.
    pub fn push(&mut self, row: &Row) -> Result<()> {
        if !row.has_timestamp() {
            return Ok(());
        }
        let timestamp = row.timestamp();
        let counter = row.counter()?;

        match &mut self.state {
            DetectorState::Open(block) if counter < block.end_counter => {
                debug!(
                    line = row.line(),
                    counter,
                    timestamp,
                    "session counter went backwards, new block"
                );
                let closed = std::mem::replace(block, SessionBlock::open(timestamp, counter));
                self.blocks.push(closed);
            }
            DetectorState::Open(block) => block.extend(timestamp, counter),
            DetectorState::Empty => {
                debug!(line = row.line(), counter, timestamp, "first block opened");
                self.state = DetectorState::Open(SessionBlock::open(timestamp, counter));
            }
        }

        Ok(())
    }

    /// Close the open block, if any, and return every block in close order
    pub fn finish(mut self) -> Vec<SessionBlock> {
        if let DetectorState::Open(block) = self.state {
            self.blocks.push(block);
        }
        self.blocks
    }
}

/// Detect session blocks across a whole row stream
pub fn detect<I>(rows: I) -> Result<Vec<SessionBlock>>
where
    I: IntoIterator<Item = Result<Row>>,
{
    let mut detector = SessionBlockDetector::new();
    for row in rows {
        detector.push(&row?)?;
    }
    let blocks = detector.finish();
    debug!(blocks = blocks.len(), "session detection complete");
    Ok(blocks)
}
