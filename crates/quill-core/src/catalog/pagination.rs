//! Page-number pagination.
//!
//! A missing or non-numeric page falls back to the first page. A numeric page
//! that is out of range (zero, negative, past the end, or too large to
//! represent) falls back to the last page. An empty listing still has one page.

use std::num::IntErrorKind;

/// Query parameter carrying the requested page.
pub const PAGE_REQUEST_VAR: &str = "page";

enum PageRequest {
    Number(u64),
    NotAnInteger,
    OutOfRange,
}

fn parse_page(raw: Option<&str>) -> PageRequest {
    let Some(raw) = raw else {
        return PageRequest::NotAnInteger;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => PageRequest::Number(n as u64),
        Ok(_) => PageRequest::OutOfRange,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => PageRequest::OutOfRange,
            _ => PageRequest::NotAnInteger,
        },
    }
}

/// Splits listings into pages of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: u64,
}

impl Paginator {
    /// A page size of zero is treated as one.
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn num_pages(&self, count: u64) -> u64 {
        if count == 0 {
            1
        } else {
            count.div_ceil(self.page_size)
        }
    }

    /// The page number actually served for a raw request value.
    pub fn resolve(&self, count: u64, requested: Option<&str>) -> u64 {
        let last = self.num_pages(count);
        match parse_page(requested) {
            PageRequest::Number(n) if n <= last => n,
            PageRequest::Number(_) | PageRequest::OutOfRange => last,
            PageRequest::NotAnInteger => 1,
        }
    }

    pub fn locate(&self, count: u64, requested: Option<&str>) -> PageWindow {
        PageWindow {
            number: self.resolve(count, requested),
            num_pages: self.num_pages(count),
            count,
            page_size: self.page_size,
        }
    }
}

/// Position of one page within a listing of `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub page_size: u64,
}

impl PageWindow {
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.page_size
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 for an empty listing.
    pub fn start_index(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> u64 {
        if self.number == self.num_pages {
            self.count
        } else {
            self.number * self.page_size
        }
    }
}

/// One page of items plus its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self { items, window }
    }

    pub fn number(&self) -> u64 {
        self.window.number
    }

    pub fn num_pages(&self) -> u64 {
        self.window.num_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            window: self.window,
        }
    }
}

/// Slice an already filtered and ordered sequence into the requested page.
pub fn paginate<T>(items: Vec<T>, page_size: u64, requested: Option<&str>) -> Page<T> {
    let window = Paginator::new(page_size).locate(items.len() as u64, requested);
    let items = items
        .into_iter()
        .skip(window.offset() as usize)
        .take(window.limit() as usize)
        .collect();
    Page::new(items, window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> Vec<u32> {
        vec![1, 2, 3, 4, 5]
    }

    #[test]
    fn test_in_range_page() {
        let page = paginate(five(), 2, Some("2"));
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.number(), 2);
        assert_eq!(page.num_pages(), 3);
    }

    #[test]
    fn test_last_page_may_be_short() {
        let page = paginate(five(), 2, Some("3"));
        assert_eq!(page.items, vec![5]);
        assert_eq!(page.number(), 3);
        assert_eq!(page.num_pages(), 3);
        assert!(!page.window.has_next());
        assert_eq!(page.window.previous_page_number(), Some(2));
    }

    #[test]
    fn test_missing_or_non_integer_serves_first_page() {
        for raw in [None, Some(""), Some("abc"), Some("2.5"), Some("1e3")] {
            let page = paginate(five(), 2, raw);
            assert_eq!(page.number(), 1, "raw = {raw:?}");
            assert_eq!(page.items, vec![1, 2]);
        }
    }

    #[test]
    fn test_out_of_range_serves_last_page() {
        for raw in ["0", "-1", "4", "9999", "99999999999999999999999"] {
            let page = paginate(five(), 2, Some(raw));
            assert_eq!(page.number(), 3, "raw = {raw}");
            assert_eq!(page.items, vec![5]);
        }
    }

    #[test]
    fn test_whitespace_around_number_is_accepted() {
        let page = paginate(five(), 2, Some(" 2 "));
        assert_eq!(page.number(), 2);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let page = paginate(Vec::<u32>::new(), 10, Some("5"));
        assert!(page.items.is_empty());
        assert_eq!(page.number(), 1);
        assert_eq!(page.num_pages(), 1);
        assert_eq!(page.window.start_index(), 0);
        assert_eq!(page.window.end_index(), 0);
    }

    #[test]
    fn test_window_indices() {
        let window = Paginator::new(10).locate(25, Some("2"));
        assert_eq!(window.offset(), 10);
        assert_eq!(window.start_index(), 11);
        assert_eq!(window.end_index(), 20);
        assert_eq!(window.next_page_number(), Some(3));

        let last = Paginator::new(10).locate(25, Some("3"));
        assert_eq!(last.end_index(), 25);
        assert_eq!(last.next_page_number(), None);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let paginator = Paginator::new(0);
        assert_eq!(paginator.page_size(), 1);
        assert_eq!(paginator.num_pages(3), 3);
    }
}
