//! Offset pagination shared by list queries

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// A clamped `(page, limit)` pair; pages are 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Clamp raw pagination input.
///
/// `page = max(1, page ?? 1)`, `limit = min(max(1, limit ?? 10), 100)`.
pub fn validate_pagination(page: Option<i64>, limit: Option<i64>) -> Pagination {
    let page = page.unwrap_or(i64::from(DEFAULT_PAGE)).max(1);
    let limit = limit
        .unwrap_or(i64::from(DEFAULT_LIMIT))
        .clamp(1, i64::from(MAX_LIMIT));

    Pagination {
        page: u32::try_from(page).unwrap_or(u32::MAX),
        limit: u32::try_from(limit).unwrap_or(MAX_LIMIT),
    }
}

/// One window of an ordered result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `[(page - 1) * limit, page * limit)` out of the full result set.
    ///
    /// Inputs are taken as given. A page past the end yields no items but keeps
    /// the totals; a zero limit yields no items and zero pages.
    pub fn from_items(all: Vec<T>, page: u32, limit: u32) -> Self {
        let total = all.len();
        let window = limit as usize;

        let total_pages = if window == 0 {
            0
        } else {
            total.div_ceil(window)
        };

        let start = (page.saturating_sub(1) as usize).saturating_mul(window);
        let items = all.into_iter().skip(start).take(window).collect();

        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
