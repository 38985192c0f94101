//! 1-based display page <-> 0-based page index

use storefront_api::PageIndex;

/// Convert a raw `page` query value into a page index.
///
/// Absent, non-numeric, zero and negative values all map to index 0; this never fails.
pub fn to_page_index(raw: Option<&str>) -> PageIndex {
    let Some(n) = raw.and_then(|s| s.trim().parse::<i64>().ok()) else {
        return 0;
    };
    if n < 1 {
        return 0;
    }
    PageIndex::try_from(n - 1).unwrap_or(PageIndex::MAX)
}

/// The 1-based page number shown in links for `index`.
pub fn to_display_page(index: PageIndex) -> u64 {
    u64::from(index) + 1
}
