use std::fmt;

/// Failure classes surfaced by the extraction pipeline.
///
/// Transport failures stay as `anyhow` errors coming out of the request
/// client; everything that happens after a body has been fetched is
/// classified here so callers can log and skip with page identity.
#[derive(Debug)]
pub enum ScrapeError {
    /// The body parsed, but none of the nodes the page is expected to
    /// carry were found.
    EmptyDocument { page: String },
    /// An expected node or attribute was absent.
    QueryMismatch { page: String, what: String },
    /// A price cell had no currency marker to truncate at.
    MissingCurrencyMarker { page: String, text: String },
    /// Field vectors extracted from one page disagree on session count.
    LengthMismatch { page: String, lengths: [usize; 5] },
    /// A table arrived at the aggregator with the wrong column set.
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::EmptyDocument { page } => {
                write!(f, "page {page:?} has no recognisable course content")
            }
            ScrapeError::QueryMismatch { page, what } => {
                write!(f, "page {page:?}: expected {what} not found")
            }
            ScrapeError::MissingCurrencyMarker { page, text } => {
                write!(f, "page {page:?}: price text {text:?} has no currency marker")
            }
            ScrapeError::LengthMismatch { page, lengths } => {
                write!(
                    f,
                    "page {page:?}: field vectors disagree on session count \
                     (level/day/time/period/prices = {lengths:?})"
                )
            }
            ScrapeError::ColumnMismatch { expected, found } => {
                write!(
                    f,
                    "cannot concatenate tables: expected columns {expected:?}, found {found:?}"
                )
            }
        }
    }
}

impl std::error::Error for ScrapeError {}
