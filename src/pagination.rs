//! Pagination metadata and query-parameter bounds.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MIN_PAGE_SIZE: usize = 1;
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination metadata returned alongside a page of items.
///
/// Pages are 0-based. `max_page` is `total / page_size` (integer division);
/// when the total is an exact multiple of the page size, the reported last
/// page index points at an empty-but-valid page. Requesting it returns an
/// empty item list with unchanged metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub max_page: usize,
}

/// Compute the last page index for a total item count.
pub fn max_page(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total / page_size
}

/// Raw pagination query parameters; bounds are checked in [`PageQuery::resolve`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_size: Option<usize>,
    pub page_number: Option<usize>,
}

impl PageQuery {
    /// Apply defaults and bounds: pageSize in [1, 100] (default 10),
    /// pageNumber >= 0 (default 0).
    pub fn resolve(self) -> Result<(usize, usize), AppError> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::Validation("pageSize out of bounds".to_string()));
        }

        let page_number = self.page_number.unwrap_or(0);

        Ok((page_size, page_number))
    }
}
