use portal_common::directory::{Associate, DirectoryUnit};

use crate::search::{FieldValue, SearchConfig};


/// Staff directory: work units searchable by name, sector, streams and lead.
pub fn directory_units_config() -> SearchConfig<DirectoryUnit> {
    SearchConfig::<DirectoryUnit>::new()
        .text_field(|unit| FieldValue::from(&unit.name))
        .text_field(|unit| FieldValue::from(&unit.sector))
        .text_field(|unit| FieldValue::from(&unit.description))
        .text_field(|unit| FieldValue::from(&unit.streams))
        .text_field(|unit| FieldValue::from(&unit.lead))
        .facet("sectors", |unit| FieldValue::from(&unit.sector))
        .facet("streams", |unit| FieldValue::from(&unit.streams))
        .facet("locations", |unit| FieldValue::from(&unit.location))
}

pub fn associates_config() -> SearchConfig<Associate> {
    SearchConfig::<Associate>::new()
        .text_field(|associate| FieldValue::from(&associate.name))
        .text_field(|associate| FieldValue::from(&associate.role))
        .text_field(|associate| FieldValue::from(&associate.unit))
        .text_field(|associate| FieldValue::from(&associate.skills))
        .text_field(|associate| FieldValue::from(&associate.location))
        .facet("units", |associate| FieldValue::from(&associate.unit))
        .facet("locations", |associate| FieldValue::from(&associate.location))
        .facet("skills", |associate| FieldValue::from(&associate.skills))
}


#[cfg(test)]
mod tests {
    use portal_common::search_query::ActiveSelection;

    use super::*;
    use crate::search::{FacetIndex, filter_records};

    fn units() -> Vec<DirectoryUnit> {
        serde_json::from_str(
            r#"[
                {"id": "u1", "name": "Governance Sector", "sector": "Governance", "streams": ["Policy", "Risk"], "location": "Dubai"},
                {"id": "u2", "name": "Platform Sector", "sector": "Platform", "streams": ["Cloud"], "lead": "Huda Saeed"},
                {"id": "u3", "name": "Service Desk", "sector": "Operations", "location": "Dubai", "description": "First line support"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn units_search_across_lead_and_description() {
        let units = units();
        let config = directory_units_config();
        let by_lead = filter_records(&units, &config, &ActiveSelection::from_query("huda"));
        assert_eq!(by_lead.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["u2"]);
        let by_description = filter_records(&units, &config, &ActiveSelection::from_query("SUPPORT"));
        assert_eq!(by_description.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["u3"]);
    }

    #[test]
    fn units_facets() {
        let units = units();
        let config = directory_units_config();
        let index = FacetIndex::build(&units, config.facets());
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["locations", "sectors", "streams"]);
        assert_eq!(index.count("locations", "Dubai"), 2);
        assert_eq!(index.count("streams", "Risk"), 1);

        let selection = ActiveSelection::default().with_facet("streams", ["Cloud", "Risk"]).with_facet("locations", ["Dubai"]);
        let result = filter_records(&units, &config, &selection);
        assert_eq!(result.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["u1"]);
    }

    #[test]
    fn associates_facet_on_skills() {
        let associates: Vec<Associate> = serde_json::from_str(
            r#"[
                {"id": "a1", "name": "Omar", "unit": "Platform Sector", "skills": ["Rust", "Kubernetes"]},
                {"id": "a2", "name": "Layla", "role": "Analyst", "skills": ["Power BI"]}
            ]"#,
        )
        .unwrap();
        let config = associates_config();
        let selection = ActiveSelection::default().with_facet("skills", ["Rust"]);
        let result = filter_records(&associates, &config, &selection);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Omar");
        assert_eq!(filter_records(&associates, &config, &ActiveSelection::from_query("analyst")).len(), 1);
    }
}
