//! Per-page search controller and its debounce state machine.

pub mod query_debouncer;
pub use query_debouncer::{DebounceState, QueryDebouncer};

pub mod search_controller;
pub use search_controller::SearchController;
