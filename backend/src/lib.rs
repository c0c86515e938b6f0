//! Search engine for the Digital Workspace portal: per-entity search
//! configurations, the filter engine itself, and catalog loading.

pub mod search;
pub mod catalogs;
pub mod db_utils;
