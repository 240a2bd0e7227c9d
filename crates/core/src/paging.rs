//! Pagination defaults, page requests and the page envelope.
//!
//! Callers speak 1-based page numbers; stores work with a 0-based page
//! index and an offset. [`PageRequest::build`] is the single place where
//! raw query parameters are normalized.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page number used when the caller omits one or sends a value <= 0.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller omits one or sends a value <= 0.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Page request
// ---------------------------------------------------------------------------

/// A normalized request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index.
    pub index: i64,
    /// Number of items per page, always in `1..=MAX_PAGE_SIZE`.
    pub size: i64,
}

impl PageRequest {
    /// Normalize user-supplied paging parameters.
    ///
    /// - `page_number` is 1-based; absent or <= 0 falls back to page 1.
    /// - `page_size` absent or <= 0 falls back to [`DEFAULT_PAGE_SIZE`],
    ///   values above [`MAX_PAGE_SIZE`] are clamped.
    pub fn build(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let number = match page_number {
            Some(n) if n > 0 => n,
            _ => DEFAULT_PAGE_NUMBER,
        };
        let size = match page_size {
            Some(s) if s > 0 => s.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        Self {
            index: number - 1,
            size,
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.index.saturating_mul(self.size)
    }

    /// 1-based page number, as reported back to callers.
    pub fn number(&self) -> i64 {
        self.index + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::build(None, None)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One slice of a larger result set plus enough metadata to navigate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// 1-based page number.
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_elements = total_elements.max(0);
        Self {
            content,
            total_elements,
            total_pages: total_pages(total_elements, request.size),
            page_number: request.number(),
            page_size: request.size,
        }
    }

    /// Slice an already-sorted, fully materialized result set.
    pub fn from_sorted(items: Vec<T>, request: &PageRequest) -> Self {
        let total = items.len() as i64;
        let content = items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Self::new(content, request, total)
    }

    /// Transform every item while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }

    pub fn is_last(&self) -> bool {
        self.page_number >= self.total_pages
    }
}

fn total_pages(total_elements: i64, size: i64) -> i64 {
    if size <= 0 {
        return 0;
    }
    (total_elements + size - 1) / size
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
