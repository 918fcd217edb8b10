pub mod browser;
pub mod filters;
pub mod paging;

pub use browser::{CatalogBrowser, PageTicket, PageTracker, ViewState, featured_pick, fetch_window};
pub use filters::{
    FilterSpec, Membership, SortDirection, SortKey, SortSpec, StatusFilter, derive_view,
};
pub use paging::{PageRequest, SourceChunking, SourceWindow, map_display_page_to_source};
