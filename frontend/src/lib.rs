//! Search state layer of the portal pages: the controller each search
//! surface owns, and the URL query-string contract it keeps in sync.

pub mod controller;
pub mod data_definitions;

pub use controller::SearchController;
pub use data_definitions::controller_settings::ControllerSettings;
pub use data_definitions::url_state::{MemoryUrlState, RawParams, UrlStateAdapter};
