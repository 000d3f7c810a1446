use serde::Deserialize;

use crate::domain::validation::{ValidationError, in_range};

/// Page selector sent as `page[number]` and `page[size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    number: u32,
    size: u32,
}

impl PageParams {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 250;
    pub const DEFAULT_SIZE: u32 = 20;

    /// Create a validated page selector. Page numbers start at 1.
    pub fn new(number: u32, size: u32) -> Result<Self, ValidationError> {
        let number = in_range("page[number]", number, 1, u32::MAX)?;
        let size = in_range("page[size]", size, Self::MIN_SIZE, Self::MAX_SIZE)?;
        Ok(Self { number, size })
    }

    /// First page with the given size.
    pub fn first(size: u32) -> Result<Self, ValidationError> {
        Self::new(1, size)
    }

    pub fn number(self) -> u32 {
        self.number
    }

    pub fn size(self) -> u32 {
        self.size
    }

    /// The page following this one, keeping the page size.
    pub fn next(self) -> Self {
        Self {
            number: self.number.saturating_add(1),
            size: self.size,
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            number: 1,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Pagination metadata returned next to list `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    /// Whether the server reports more pages after this one.
    pub fn has_next_page(&self) -> bool {
        self.next_page_params().is_some()
    }

    /// Selector for the next page, or `None` when this page is the last one.
    ///
    /// An empty page is always treated as the last one, even if `meta` claims otherwise.
    pub fn next_page_params(&self) -> Option<PageParams> {
        let meta = self.meta?;
        if self.data.is_empty() || meta.page_number == 0 || meta.page_number >= meta.total_pages
        {
            return None;
        }
        let size = if meta.page_size == 0 {
            PageParams::DEFAULT_SIZE
        } else {
            meta.page_size.min(PageParams::MAX_SIZE)
        };
        Some(PageParams {
            number: meta.page_number,
            size,
        }
        .next())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(page_number: u32, total_pages: u32) -> Option<PageMeta> {
        Some(PageMeta {
            page_number,
            page_size: 2,
            total_pages,
            total_results: u64::from(total_pages) * 2,
        })
    }

    #[test]
    fn page_params_validate_ranges() {
        assert!(PageParams::new(1, 250).is_ok());
        assert!(PageParams::new(0, 20).is_err());
        assert!(matches!(
            PageParams::new(1, 251),
            Err(ValidationError::OutOfRange {
                field: "page[size]",
                ..
            })
        ));
        assert_eq!(PageParams::default().size(), PageParams::DEFAULT_SIZE);
    }

    #[test]
    fn next_page_follows_meta() {
        let page = Page {
            data: vec![1, 2],
            meta: meta(1, 3),
        };
        assert_eq!(page.next_page_params(), Some(PageParams::new(2, 2).unwrap()));

        let last = Page {
            data: vec![5],
            meta: meta(3, 3),
        };
        assert!(!last.has_next_page());
    }

    #[test]
    fn empty_or_meta_less_pages_are_last() {
        let empty: Page<i32> = Page {
            data: vec![],
            meta: meta(1, 3),
        };
        assert_eq!(empty.next_page_params(), None);

        let no_meta = Page {
            data: vec![1],
            meta: None,
        };
        assert_eq!(no_meta.next_page_params(), None);
    }
}
