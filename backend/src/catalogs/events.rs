use portal_common::events::PortalEvent;

use crate::search::{FieldValue, SearchConfig};


/// Events marketplace.
pub fn events_config() -> SearchConfig<PortalEvent> {
    SearchConfig::<PortalEvent>::new()
        .text_field(|event| FieldValue::from(&event.title))
        .text_field(|event| FieldValue::from(&event.description))
        .text_field(|event| FieldValue::from(&event.organizer))
        .text_field(|event| FieldValue::from(&event.tags))
        .text_field(|event| FieldValue::from(&event.location))
        .facet("categories", |event| FieldValue::from(&event.category))
        .facet("locations", |event| FieldValue::from(&event.location))
        .facet("tags", |event| FieldValue::from(&event.tags))
}


#[cfg(test)]
mod tests {
    use portal_common::search_query::ActiveSelection;

    use super::*;
    use crate::search::filter_records;

    #[test]
    fn events_by_category_and_location_text() {
        let events: Vec<PortalEvent> = serde_json::from_str(
            r#"[
                {"id": "e1", "title": "AI Hackathon", "category": "Hackathon", "location": "Dubai", "tags": ["AI"]},
                {"id": "e2", "title": "Quarterly Town Hall", "category": "Town Hall", "location": "Abu Dhabi"},
                {"id": "e3", "title": "Prompting 101", "category": "Workshop", "location": "Dubai", "tags": ["AI", "Training"]}
            ]"#,
        )
        .unwrap();
        let config = events_config();
        let in_dubai = filter_records(&events, &config, &ActiveSelection::from_query("dubai"));
        assert_eq!(in_dubai.len(), 2);

        let selection = ActiveSelection::from_query("dubai").with_facet("categories", ["Workshop", "Town Hall"]);
        let result = filter_records(&events, &config, &selection);
        assert_eq!(result.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["e3"]);
    }
}
