//! Page request and pagination metadata primitives.
//!
//! Listing endpoints accept an optional `page`/`limit` pair, translate it into
//! a [`PageRequest`] and report the outcome as [`Pagination`] metadata next to
//! the returned items. Page numbers are one-based.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page number used when the caller does not provide one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not provide one.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised when constructing a page request strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page numbers start at one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// Limit must lie within `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}, got {limit}")]
    LimitOutOfRange {
        /// Limit supplied by the caller.
        limit: u32,
        /// Largest accepted limit.
        max: u32,
    },
}

/// A validated one-based page selection.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 10).expect("valid page");
/// assert_eq!(request.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate a page selection.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when `page` is zero or `limit` falls outside
    /// `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PaginationError::LimitOutOfRange {
                limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Build a page selection from optional query parameters.
    ///
    /// Missing values fall back to the defaults, a zero page becomes the first
    /// page and the limit is clamped into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1).saturating_mul(self.limit as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata reported alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total: u64,
    total_pages: u64,
}

impl Pagination {
    /// Describe `request` against a collection holding `total` items.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Pagination};
    ///
    /// let meta = Pagination::new(PageRequest::default(), 41);
    /// assert_eq!(meta.total_pages(), 3);
    /// ```
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total.div_ceil(request.limit as u64),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size used for the query.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages needed to cover `total` items.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }
}

/// A page of items with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap items loaded for `request` from a collection of `total` items.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(request, total),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Pagination metadata for this page.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Convert every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Split the page into its items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Pagination) {
        (self.items, self.pagination)
    }
}
