pub mod debounce;
pub mod pipeline;
pub mod stats;

pub use debounce::Debouncer;
pub use pipeline::{
    compare_items, filter_and_sort, visible_window, CatalogPipeline, FilterState, Window,
    DEFAULT_PAGE_SIZE,
};
pub use stats::{daily_pick, daily_pick_index, popular, related, CatalogStats};
