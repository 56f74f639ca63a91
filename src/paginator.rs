//! Page arithmetic over an already ordered post sequence.
//!
//! Everything here is a pure function over integers and slices. Validating
//! user-supplied page numbers happens in [`crate::routes`] before these are
//! called; out-of-range pages (including page 0) simply come back empty.
//! [`crate::config::SiteConfig::validate`] rejects a zero page size, which
//! is treated as 1 for the page count if it slips through.

use crate::models::{PaginatedPosts, Post};

/// `max(1, ceil(len / page_size))`.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice out 1-based `page` of `ordered`.
///
/// Page 0 has no posts; `current_page` echoes the request either way.
pub fn paginate<'a, I>(ordered: I, page: usize, page_size: usize) -> PaginatedPosts<'a>
where
    I: IntoIterator<Item = &'a Post>,
    I::IntoIter: ExactSizeIterator,
{
    let posts = ordered.into_iter();
    let total_page = total_pages(posts.len(), page_size);
    let posts = match page.checked_sub(1) {
        Some(offset) => posts
            .skip(offset.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    PaginatedPosts {
        posts,
        current_page: page,
        total_page,
    }
}

/// Page numbers that get their own `/page/{n}/` route at build time.
///
/// Page 1 is the root route. When the corpus fits on one page a single
/// placeholder page 2 is still emitted, so routing stays stable as content
/// grows.
pub fn static_page_numbers(total_page: usize) -> Vec<usize> {
    if total_page < 2 {
        vec![2]
    } else {
        (2..=total_page).collect()
    }
}
