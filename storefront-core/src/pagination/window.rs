//! Sliding-window page controls

use std::fmt;

use serde::Serialize;
use storefront_api::PageIndex;

use super::codec::to_display_page;

/// Up to this many pages every page gets its own control.
pub const FULL_WINDOW_PAGES: u32 = 7;

/// One control in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "page")]
pub enum PageControl {
    Number(PageIndex),
    Ellipsis,
}

/// Compute the ordered page controls for `current` out of `total_pages`.
///
/// First and last pages are always present once `total_pages` exceeds
/// [`FULL_WINDOW_PAGES`], with the immediate neighbours of `current` in between and an
/// ellipsis wherever pages are skipped.
pub fn page_controls(current: PageIndex, total_pages: u32) -> Vec<PageControl> {
    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= FULL_WINDOW_PAGES {
        return (0..total_pages).map(PageControl::Number).collect();
    }

    let last = total_pages - 1;
    let mut controls = vec![PageControl::Number(0)];

    if current > 3 {
        controls.push(PageControl::Ellipsis);
    }

    let start = current.saturating_sub(1).max(1);
    let end = current.saturating_add(1).min(total_pages - 2);
    for i in start..=end {
        if !controls.contains(&PageControl::Number(i)) {
            controls.push(PageControl::Number(i));
        }
    }

    if current < total_pages - 4 {
        controls.push(PageControl::Ellipsis);
    }

    controls.push(PageControl::Number(last));
    controls
}

/// Previous/next button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavTarget {
    pub page: PageIndex,
    pub enabled: bool,
}

/// Entry of a [`PaginationBar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PaginationItem {
    Page {
        index: PageIndex,
        label: String,
        active: bool,
    },
    Ellipsis,
}

/// Page controls plus previous/next targets, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationBar {
    pub previous: Option<NavTarget>,
    pub next: Option<NavTarget>,
    pub items: Vec<PaginationItem>,
}

impl PaginationBar {
    pub fn new(current: PageIndex, total_pages: u32) -> Self {
        let controls = page_controls(current, total_pages);
        if controls.is_empty() {
            return Self::default();
        }

        let items = controls
            .into_iter()
            .map(|control| match control {
                PageControl::Number(index) => PaginationItem::Page {
                    index,
                    label: to_display_page(index).to_string(),
                    active: index == current,
                },
                PageControl::Ellipsis => PaginationItem::Ellipsis,
            })
            .collect();

        Self {
            previous: Some(NavTarget {
                page: current.saturating_sub(1),
                enabled: current > 0,
            }),
            next: Some(NavTarget {
                page: current.saturating_add(1),
                enabled: current.saturating_add(1) < total_pages,
            }),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page targets a click can navigate to, in display order.
    pub fn targets(&self) -> Vec<PageIndex> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PaginationItem::Page { index, .. } => Some(*index),
                PaginationItem::Ellipsis => None,
            })
            .collect()
    }
}

impl fmt::Display for PaginationBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::with_capacity(self.items.len() + 2);
        if let Some(prev) = self.previous {
            parts.push(if prev.enabled {
                "← Previous".to_string()
            } else {
                "(← Previous)".to_string()
            });
        }
        for item in &self.items {
            parts.push(match item {
                PaginationItem::Page { label, active, .. } if *active => format!("[{label}]"),
                PaginationItem::Page { label, .. } => label.clone(),
                PaginationItem::Ellipsis => "...".to_string(),
            });
        }
        if let Some(next) = self.next {
            parts.push(if next.enabled {
                "Next →".to_string()
            } else {
                "(Next →)".to_string()
            });
        }
        write!(f, "{}", parts.join(" "))
    }
}
