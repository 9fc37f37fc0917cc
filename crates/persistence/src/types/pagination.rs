//! Offset pagination for searches.

/// Default number of documents per search page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Which slice of the matching documents a search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of matching documents to skip.
    pub from: u64,
    /// Maximum number of documents to return.
    pub size: u64,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(from: u64, size: u64) -> Self {
        Self { from, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = PageRequest::default();
        assert_eq!(page.from, 0);
        assert_eq!(page.size, 10);
    }
}
