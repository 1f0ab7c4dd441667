//! Skip/limit pagination helpers

/// Page size used when the client sends none (or an invalid one).
pub const DEFAULT_PAGE_SIZE: u64 = 100;
/// Largest page size a client may ask for.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Largest skip a query can bind; SQLite offsets are signed 64-bit.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Records to skip before `page`, clamped to [`MAX_OFFSET`].
pub fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size).min(MAX_OFFSET)
}

/// A normalised page request: `page >= 1`, `1 <= page_size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Parse raw query-string values. Anything missing, non-numeric or out
    /// of range falls back to the defaults instead of failing the request.
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let page_size = page_size
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| (1..=max_page_size).contains(p))
            .unwrap_or(default_page_size);
        Self { page, page_size }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        page_offset(self.page, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn empty(page: u64, limit: u64) -> Self {
        Self::new(Vec::new(), 0, page, limit)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        let req = PageRequest::parse(None, None, 100, 100);
        assert_eq!(req, PageRequest { page: 1, page_size: 100 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn invalid_values_fall_back() {
        let req = PageRequest::parse(Some("abc"), Some("-3"), 100, 100);
        assert_eq!(req, PageRequest { page: 1, page_size: 100 });

        let req = PageRequest::parse(Some("0"), Some("101"), 100, 100);
        assert_eq!(req, PageRequest { page: 1, page_size: 100 });

        let req = PageRequest::parse(Some("2"), Some("0"), 20, 100);
        assert_eq!(req, PageRequest { page: 2, page_size: 20 });
    }

    #[test]
    fn offset_skips_previous_pages() {
        let req = PageRequest::parse(Some("3"), Some("10"), 100, 100);
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn huge_pages_clamp_the_offset() {
        let req = PageRequest::parse(Some("1000000000000000000"), Some("100"), 100, 100);
        assert_eq!(req.page, 1_000_000_000_000_000_000);
        assert_eq!(req.offset(), MAX_OFFSET);
        assert_eq!(page_offset(u64::MAX, 100), MAX_OFFSET);
        assert_eq!(page_offset(0, 100), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let result = PaginatedResult::new(vec![1, 2], 21, 1, 10);
        assert_eq!(result.total_pages, 3);
        assert_eq!(PaginatedResult::<u8>::empty(1, 10).total_pages, 0);
    }
}
