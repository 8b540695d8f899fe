/// Offset/limit window of a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// One page of results plus the total number of matching rows.
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, window: PageWindow) -> Self {
        let total_pages = if window.limit == 0 {
            0
        } else {
            total.div_ceil(window.limit)
        };
        Self {
            items,
            total,
            offset: window.offset,
            limit: window.limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let window = PageWindow { offset: 0, limit: 10 };
        assert_eq!(PaginatedResult::<()>::new(vec![], 21, window).total_pages, 3);
        assert_eq!(PaginatedResult::<()>::new(vec![], 20, window).total_pages, 2);
        assert_eq!(PaginatedResult::<()>::new(vec![], 0, window).total_pages, 0);
    }
}
