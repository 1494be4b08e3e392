//! Page windows and result sets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A row document: a flat JSON object of column name to value.
pub type Document = Map<String, Value>;

/// Errors building a page window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageWindowError {
    #[error("page number must be at least 1")]
    ZeroPageNumber,
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Which page of a result set to return.
///
/// `page_number` is 1-based. Both values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageWindow")]
pub struct PageWindow {
    page_number: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct RawPageWindow {
    page_number: usize,
    page_size: usize,
}

impl TryFrom<RawPageWindow> for PageWindow {
    type Error = PageWindowError;

    fn try_from(raw: RawPageWindow) -> Result<Self, Self::Error> {
        PageWindow::new(raw.page_number, raw.page_size)
    }
}

impl PageWindow {
    pub fn new(page_number: usize, page_size: usize) -> Result<Self, PageWindowError> {
        if page_number == 0 {
            return Err(PageWindowError::ZeroPageNumber);
        }
        if page_size == 0 {
            return Err(PageWindowError::ZeroPageSize);
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// The first page of the given size.
    pub fn first(page_size: usize) -> Result<Self, PageWindowError> {
        Self::new(1, page_size)
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of cursor continuations needed to reach this page.
    pub fn continuations(&self) -> usize {
        self.page_number - 1
    }
}

/// One page of matched documents plus the total match count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    /// Total number of documents matching the query, across all pages.
    pub total_matched: u64,
    /// Documents on the requested page, in engine order.
    pub records: Vec<Document>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
