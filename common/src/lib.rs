//! Common library exports shared between the search engine and the controller.

extern crate serde;


pub mod search_query;
pub mod search_result;
pub mod directory;
pub mod events;
pub mod course_catalog;
