//! Date-range selection over a SkyView row stream
//!
//! Bounds are matched as literal string prefixes of the timestamp column, so a
//! date-only bound such as `2017-01-28` matches every row recorded that day.
//! The start bound is inclusive from the first matching row; the end bound is
//! exclusive, the first matching row terminates the selection.

use crate::error::Result;
use crate::types::Row;
use tracing::debug;

/// A date or date-time prefix delimiting the range of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound(String);

impl Bound {
    /// Returns `None` for an empty prefix, which would otherwise match every row
    pub fn new(prefix: impl Into<String>) -> Option<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            None
        } else {
            Some(Self(prefix))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, timestamp: &str) -> bool {
        timestamp.starts_with(&self.0)
    }
}

/// Position of the selector within the row stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// Discarding rows until one matches the start bound
    LookingForStart,
    /// Emitting rows until one matches the end bound
    LookingForEnd,
    /// Emitting every remaining row
    Process,
    /// End bound reached, nothing more is emitted
    Done,
}

impl SelectorState {
    pub fn initial(start: Option<&Bound>, end: Option<&Bound>) -> Self {
        match (start, end) {
            (Some(_), _) => SelectorState::LookingForStart,
            (None, Some(_)) => SelectorState::LookingForEnd,
            (None, None) => SelectorState::Process,
        }
    }
}

/// Lazy iterator adapter yielding the rows between two bounds
///
/// Read errors from the source are forwarded untouched and do not move the
/// state machine.
pub struct RangeSelector<I> {
    source: I,
    start: Option<Bound>,
    end: Option<Bound>,
    state: SelectorState,
    discarded: usize,
}

impl<I> RangeSelector<I>
where
    I: Iterator<Item = Result<Row>>,
{
    pub fn new(source: I, start: Option<Bound>, end: Option<Bound>) -> Self {
        let state = SelectorState::initial(start.as_ref(), end.as_ref());
        Self {
            source,
            start,
            end,
            state,
            discarded: 0,
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Number of rows dropped while looking for the start bound
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    fn after_start(&self) -> SelectorState {
        if self.end.is_some() {
            SelectorState::LookingForEnd
        } else {
            SelectorState::Process
        }
    }
}

impl<I> Iterator for RangeSelector<I>
where
    I: Iterator<Item = Result<Row>>,
{
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == SelectorState::Done {
                return None;
            }

            let row = match self.source.next()? {
                Ok(row) => row,
                Err(err) => return Some(Err(err)),
            };

            match self.state {
                SelectorState::Process => return Some(Ok(row)),
                SelectorState::LookingForStart => {
                    let hit = self
                        .start
                        .as_ref()
                        .is_some_and(|bound| bound.matches(row.timestamp()));
                    if hit {
                        self.state = self.after_start();
                        debug!(
                            line = row.line(),
                            timestamp = row.timestamp(),
                            discarded = self.discarded,
                            "start bound matched"
                        );
                        return Some(Ok(row));
                    }
                    self.discarded += 1;
                }
                SelectorState::LookingForEnd => {
                    let hit = self
                        .end
                        .as_ref()
                        .is_some_and(|bound| bound.matches(row.timestamp()));
                    if hit {
                        self.state = SelectorState::Done;
                        debug!(
                            line = row.line(),
                            timestamp = row.timestamp(),
                            "end bound matched"
                        );
                        return None;
                    }
                    return Some(Ok(row));
                }
                SelectorState::Done => return None,
            }
        }
    }
}

/// Select the rows of `rows` that fall between `start` and `end`
pub fn select<I>(rows: I, start: Option<Bound>, end: Option<Bound>) -> RangeSelector<I::IntoIter>
where
    I: IntoIterator<Item = Result<Row>>,
{
    RangeSelector::new(rows.into_iter(), start, end)
}
