use portal_common::course_catalog::Course;

use crate::search::{FieldValue, SearchConfig};


pub fn courses_config() -> SearchConfig<Course> {
    SearchConfig::<Course>::new()
        .text_field(|course| FieldValue::from(&course.title))
        .text_field(|course| FieldValue::from(&course.provider))
        .text_field(|course| FieldValue::from(&course.summary))
        .text_field(|course| FieldValue::from(&course.topics))
        .facet("providers", |course| FieldValue::from(&course.provider))
        .facet("levels", |course| FieldValue::from(&course.level))
        .facet("formats", |course| FieldValue::from(&course.format))
        .facet("topics", |course| FieldValue::from(&course.topics))
}
