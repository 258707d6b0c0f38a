//! Page and result-size bounds.

/// Members fetched per scan round trip.
pub const DEFAULT_SCAN_PAGE_SIZE: usize = 256;

/// Default and maximum number of todos a listing returns.
pub const DEFAULT_LIST_LIMIT: usize = 500;

/// Size bounds shared by listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub scan_page_size: usize,
    pub list_limit: usize,
}

impl Limits {
    /// Resolves a caller-supplied limit.
    ///
    /// `None` means the default; anything larger than the cap is
    /// truncated to it, and `0` asks for nothing. Never an error.
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        match requested {
            None => self.list_limit,
            Some(n) => n.min(self.list_limit),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}
