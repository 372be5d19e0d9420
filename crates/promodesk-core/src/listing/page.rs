use serde::Serialize;

pub const MAX_PAGE_SIZE: usize = 100;

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// True when the filtered collection is empty (the empty-state panel).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

#[must_use]
pub fn normalize_page_size(page_size: usize) -> usize {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Number of pages for `len` items; an empty collection still has one page.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(normalize_page_size(page_size)).max(1)
}

#[must_use]
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// Slice `[(page-1)*size, page*size)` out of `items` after clamping `page`.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = normalize_page_size(page_size);
    let page = clamp_page(page, items.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        page_size,
        total_items: items.len(),
        total_pages: total_pages(items.len(), page_size),
    }
}
