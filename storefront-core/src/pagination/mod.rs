//! Page numbering and page controls

mod codec;
mod window;

pub use codec::{to_display_page, to_page_index};
pub use window::{
    FULL_WINDOW_PAGES, NavTarget, PageControl, PaginationBar, PaginationItem, page_controls,
};
