pub mod commit;
pub mod drag;
pub mod reorder;
pub mod scroll_sync;
pub mod seed;
pub mod store;
pub mod window;
