// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_pages: usize,
}

/// Number of pages for `count` rows. At least one, even when empty.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Slices the 1-based `page`. Pages past the end come back empty.
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_pages = total_pages(rows.len(), page_size);
    if page == 0 || page_size == 0 {
        return Page {
            rows: Vec::new(),
            total_pages,
        };
    }
    let start = (page - 1).saturating_mul(page_size);
    let rows = rows.iter().skip(start).take(page_size).cloned().collect();
    Page { rows, total_pages }
}

/// 1-based, inclusive row range shown on `page`, or `None` when it is empty.
pub fn page_range(count: usize, page: usize, page_size: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= count {
        return None;
    }
    Some((start + 1, (start + page_size).min(count)))
}

/// Returns `target` when it names an existing page, `None` otherwise.
pub fn checked_page(target: usize, total_pages: usize) -> Option<usize> {
    (1..=total_pages).contains(&target).then_some(target)
}
