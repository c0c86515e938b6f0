use std::io::Write;

use portal_backend::catalogs::directory_units_config;
use portal_backend::db_utils::json_catalog::load_catalog;
use portal_common::directory::DirectoryUnit;
use portal_frontend::{ControllerSettings, MemoryUrlState, SearchController};


const DEMO_UNITS: &str = include_str!("../../demos/units.json");

#[tokio::test]
async fn demo_catalog_mounts_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DEMO_UNITS.as_bytes()).unwrap();

    let records = load_catalog::<DirectoryUnit>(file.path()).await.unwrap();
    assert_eq!(records.len(), 5);

    let mut controller = SearchController::mount(
        records,
        directory_units_config(),
        ControllerSettings::default(),
        MemoryUrlState::new("?streams=Data"),
    );
    let names = controller.filtered_results().iter().map(|u| u.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Platform Sector", "Research Lab"]);

    controller.toggle_facet("locations", "Abu Dhabi");
    assert_eq!(controller.result_count(), 2);
    assert_eq!(controller.url_state().query(), "locations=Abu%20Dhabi&streams=Data");
}

#[tokio::test]
async fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = load_catalog::<DirectoryUnit>(&path).await.unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}
