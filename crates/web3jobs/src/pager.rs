//! Page slicing and page-number labels for the result list.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use serde::Serialize;

/// Default number of postings per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// One entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageLabel {
    Page(usize),
    /// Stands in for a run of skipped pages.
    Gap,
}

/// The visible slice of a result set plus its navigation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// One-based page number that was requested.
    pub page: usize,
    pub page_size: NonZeroUsize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// One-based inclusive bounds of the visible items ("showing X-Y of N").
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.page - 1) * self.page_size.get() + 1;
        Some((start, start + self.items.len() - 1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn labels(&self) -> Vec<PageLabel> {
        page_labels(self.page, self.total_pages)
    }
}

/// Number of pages needed for `len` items. Never less than 1.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Cuts page `page` (one-based) out of `results`.
///
/// Pages past the end, and page 0, come back empty rather than failing.
pub fn paginate<T>(results: &[T], page_size: NonZeroUsize, page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size);
    let items = if page == 0 || start >= results.len() {
        &results[..0]
    } else {
        let end = start.saturating_add(size).min(results.len());
        &results[start..end]
    };

    Page {
        items,
        page,
        page_size,
        total_items: results.len(),
        total_pages: total_pages(results.len(), page_size),
    }
}

/// Page-number strip for navigation controls.
///
/// Always shows the first and last page and every page within one of the
/// current page. Each hole between shown pages collapses into a single
/// [`PageLabel::Gap`]. `current` is clamped into `1..=total_pages`.
pub fn page_labels(current: usize, total_pages: usize) -> Vec<PageLabel> {
    let total = total_pages.max(1);
    let current = current.clamp(1, total);

    let shown: BTreeSet<usize> = [1, current.saturating_sub(1), current, current + 1, total]
        .into_iter()
        .filter(|page| (1..=total).contains(page))
        .collect();

    let mut labels = Vec::with_capacity(shown.len() * 2);
    let mut previous = None;
    for page in shown {
        if let Some(prev) = previous {
            if page > prev + 1 {
                labels.push(PageLabel::Gap);
            }
        }
        labels.push(PageLabel::Page(page));
        previous = Some(page);
    }
    labels
}
