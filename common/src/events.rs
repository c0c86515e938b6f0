//! Shared events marketplace models.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalEvent {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    /// ISO-8601 date as delivered by the events table.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
