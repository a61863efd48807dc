//! Client-side pagination
//!
//! Pages are 1-indexed. The page never leaves `[1, max(total_pages, 1)]`;
//! an empty collection has zero pages and sits on page 1 with an empty
//! slice.

use std::fmt;
use std::ops::Range;

use crate::error::{DeskError, DeskResult};

/// Selectable page sizes
pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];

/// One entry of the compact page-number list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page numbers to show for `current` out of `total` pages.
///
/// Up to five pages are all listed. Beyond that the first and last page
/// are always shown: near the start pages 1-4, near the end the last
/// four, otherwise the current page with one neighbour on each side.
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total <= 5 {
        return (1..=total).map(Page).collect();
    }
    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)]
    } else if current >= total - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}

/// Current page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> DeskResult<Self> {
        check_page_size(page_size)?;
        Ok(Self { page: 1, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total_items / page_size)`
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Change the page size and go back to page 1
    pub fn set_page_size(&mut self, page_size: usize) -> DeskResult<()> {
        check_page_size(page_size)?;
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Move to `page`, clamped into the valid range. Returns the new page.
    pub fn set_page(&mut self, page: usize, total_items: usize) -> usize {
        let last = self.total_pages(total_items).max(1);
        self.page = page.clamp(1, last);
        self.page
    }

    /// Advance one page; `false` when already on the last page
    pub fn next(&mut self, total_items: usize) -> bool {
        if self.page >= self.total_pages(total_items) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page; `false` when already on page 1
    pub fn previous(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Re-clamp after the collection changed size
    pub fn clamp(&mut self, total_items: usize) {
        self.set_page(self.page, total_items);
    }

    /// Index range of the visible slice
    pub fn range(&self, total_items: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(total_items);
        let end = (start + self.page_size).min(total_items);
        start..end
    }

    pub fn window(&self, total_items: usize) -> Vec<PageItem> {
        page_window(self.page, self.total_pages(total_items))
    }
}

fn check_page_size(page_size: usize) -> DeskResult<()> {
    if PAGE_SIZES.contains(&page_size) {
        Ok(())
    } else {
        Err(DeskError::InvalidPageSize(page_size))
    }
}
