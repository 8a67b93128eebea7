use serde::Deserialize;
use validator::Validate;

use crate::storage::types::{ClassLevel, ContentType};

#[derive(Debug, Deserialize, Validate)]
pub struct ContentCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
    #[serde(alias = "classLevel")]
    pub class_level: ClassLevel,
    #[serde(alias = "createdBy")]
    #[validate(length(min = 1, message = "created_by must not be empty"))]
    pub created_by: String,
}
