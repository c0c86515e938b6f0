//! Built-in search configurations for the portal's searchable collections.

mod directory;
pub use directory::{associates_config, directory_units_config};

mod events;
pub use events::events_config;

mod course_catalog;
pub use course_catalog::courses_config;


/// The searchable collections the portal ships configurations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Units,
    Associates,
    Events,
    Courses,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 4] = [Self::Units, Self::Associates, Self::Events, Self::Courses];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::Associates => "associates",
            Self::Events => "events",
            Self::Courses => "courses",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown catalog {s:?}, expected one of units, associates, events, courses"))
    }
}
