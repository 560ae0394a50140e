use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page metadata returned by list endpoints (pages are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// `{data, pagination?}` envelope used by every collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Query parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: usize,
    #[serde(rename = "limit")]
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn page(page: usize) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    /// Blank search text clears the filter
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        self
    }
}
