use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
}

impl PaginationParams {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Clamp raw client input: pages below 1 become 1, limits outside
    /// `1..=MAX_LIMIT` fall back to `DEFAULT_LIMIT`.
    pub fn normalized(page: i64, limit: i64) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page as u64 };
        let limit = if (1..=MAX_LIMIT as i64).contains(&limit) {
            limit as u64
        } else {
            DEFAULT_LIMIT
        };

        Self { page, limit }
    }

    /// Number of rows to skip, capped at `i64::MAX` (PostgreSQL binds OFFSET as bigint)
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// A page of results plus the metadata needed to request the next one
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, pagination: PaginationParams, total: u64) -> Self {
        let total_pages = if pagination.limit == 0 {
            0
        } else {
            total.div_ceil(pagination.limit)
        };

        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_page_and_limit() {
        assert_eq!(PaginationParams::normalized(0, 10), PaginationParams::new(1, 10));
        assert_eq!(PaginationParams::normalized(-3, 10), PaginationParams::new(1, 10));
        assert_eq!(PaginationParams::normalized(2, 0), PaginationParams::new(2, 10));
        assert_eq!(PaginationParams::normalized(2, 101), PaginationParams::new(2, 10));
        assert_eq!(PaginationParams::normalized(2, 100), PaginationParams::new(2, 100));
        assert_eq!(PaginationParams::normalized(7, 1), PaginationParams::new(7, 1));
    }

    #[test]
    fn test_offset() {
        assert_eq!(PaginationParams::new(1, 10).offset(), 0);
        assert_eq!(PaginationParams::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_offset_of_far_page_fits_bigint() {
        let far = PaginationParams::normalized(i64::MAX, 100);
        assert_eq!(far.page, i64::MAX as u64);
        assert!(i64::try_from(far.offset()).is_ok());
        assert_eq!(far.offset(), i64::MAX as u64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let result = PaginatedResult::new(vec![1, 2], PaginationParams::new(1, 2), 5);
        assert_eq!(result.total_pages, 3);

        let exact = PaginatedResult::new(vec![1, 2], PaginationParams::new(1, 2), 4);
        assert_eq!(exact.total_pages, 2);
    }

    #[test]
    fn test_total_pages_zero_when_empty() {
        let result = PaginatedResult::<u8>::new(vec![], PaginationParams::default(), 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.total, 0);
    }
}
