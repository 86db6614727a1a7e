//! Offset/limit pagination used by the list endpoints.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub limit: u32,
}

impl Pagination {
    /// Treat page 0 as page 1 and clamp limit to at least one item,
    /// returning `(start, limit)` as usize offsets.
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let limit = self.limit.max(1) as usize;
        ((page - 1) as usize * limit, limit)
    }

    /// Slice `items` to the requested window.
    pub fn slice<T: Clone>(self, items: &[T]) -> Vec<T> {
        let (start, limit) = self.normalize();
        items.iter().skip(start).take(limit).cloned().collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}
