//! Page-number pagination with clamping.

use serde::Serialize;

/// Default number of posts per feed page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A requested page. `number` is 1-based and may be out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: i64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(number: i64, size: u64) -> Self {
        Self {
            number,
            size: size.max(1),
        }
    }

    /// Parse a raw `?page=` value. Missing or non-numeric input means page 1.
    pub fn parse(raw: Option<&str>, size: u64) -> Self {
        let number = raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1);
        Self::new(number, size)
    }

    /// Number of pages needed for `total` items. Never less than one.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size).max(1)
    }

    /// The requested page clamped into `1..=num_pages(total)`.
    pub fn clamp(&self, total: u64) -> u64 {
        let last = self.num_pages(total);
        if self.number < 1 {
            1
        } else {
            (self.number as u64).min(last)
        }
    }

    /// Offset of the first item on the clamped page.
    pub fn offset(&self, total: u64) -> u64 {
        (self.clamp(total) - 1) * self.size
    }

    /// Slice an already-ordered collection into the clamped page.
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as u64;
        let number = self.clamp(total);
        let items = items
            .into_iter()
            .skip(self.offset(total) as usize)
            .take(self.size as usize)
            .collect();
        Page::new(items, number, self.size, total)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub page_size: u64,
    pub num_pages: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: u64, page_size: u64, total_items: u64) -> Self {
        let num_pages = total_items.div_ceil(page_size.max(1)).max(1);
        Self {
            items,
            number,
            page_size,
            num_pages,
            total_items,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            page_size: self.page_size,
            num_pages: self.num_pages,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_first_page() {
        assert_eq!(PageRequest::parse(None, 10).number, 1);
        assert_eq!(PageRequest::parse(Some("abc"), 10).number, 1);
        assert_eq!(PageRequest::parse(Some(" 3 "), 10).number, 3);
    }

    #[test]
    fn test_clamp_to_valid_range() {
        let total = 25;
        assert_eq!(PageRequest::new(0, 10).clamp(total), 1);
        assert_eq!(PageRequest::new(-4, 10).clamp(total), 1);
        assert_eq!(PageRequest::new(2, 10).clamp(total), 2);
        assert_eq!(PageRequest::new(99, 10).clamp(total), 3);
    }

    #[test]
    fn test_empty_collection_has_one_empty_page() {
        let page: Page<u32> = PageRequest::new(5, 10).slice(Vec::new());
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_slice_last_page() {
        let page = PageRequest::new(7, 10).slice((1..=25).collect::<Vec<_>>());
        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_zero_size_is_coerced() {
        let request = PageRequest::new(1, 0);
        assert_eq!(request.size, 1);
    }
}
