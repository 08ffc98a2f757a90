//! # Pagination
//!
//! Deterministic, stateless windowing over an already-ordered listing.
//! Pages are 1-indexed with a fixed size; an exhausted window is treated
//! as "no data" by the listing routes.

use std::collections::HashMap;

/// Fixed page size for listing routes
pub const PAGINATION_PER_PAGE: usize = 2;

/// Read the `page` query parameter. Absent or non-integer values fall
/// back to page 1.
pub fn parse_page(params: &HashMap<String, String>) -> i64 {
    params
        .get("page")
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(1)
}

/// Slice out the window `[(page-1)*size, page*size)`. Pages below 1 or
/// past the end yield an empty window.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = (page as usize - 1).saturating_mul(PAGINATION_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGINATION_PER_PAGE).min(items.len());
    &items[start..end]
}
