//! Pagination parameters and the paginated list envelope.

use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Raw `?page=&limit=` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Normalized pagination: 1-based page, limit clamped to [1, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u64,
    limit: u64,
}

impl PageParams {
    pub fn new(page: u64, limit: u64) -> Self {
        let page = page.max(1);
        let limit = if limit == 0 || limit > MAX_LIMIT {
            DEFAULT_LIMIT
        } else {
            limit
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<PageQuery> for PageParams {
    fn from(query: PageQuery) -> Self {
        Self::new(query.page.unwrap_or(1), query.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(params: PageParams, total: u64) -> Self {
        Self {
            page: params.page(),
            limit: params.limit(),
            total,
            total_pages: total.div_ceil(params.limit()),
        }
    }
}

/// Envelope for every paginated list response.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: PageParams, total: u64) -> Self {
        Self {
            data,
            pagination: PageMeta::new(params, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageMeta, PageParams, PageQuery};

    #[test]
    fn defaults_apply() {
        let params: PageParams = PageQuery::default().into();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        let params = PageParams::new(0, 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn oversized_limit_falls_back_to_default() {
        let params = PageParams::new(2, 1000);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 10);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let params = PageParams::new(3, 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn meta_rounds_total_pages_up() {
        let params = PageParams::new(1, 10);
        let meta = PageMeta::new(params, 101);
        assert_eq!(meta.total_pages, 11);

        let meta = PageMeta::new(params, 100);
        assert_eq!(meta.total_pages, 10);

        let meta = PageMeta::new(params, 0);
        assert_eq!(meta.total_pages, 0);
    }
}
