//! Portfolio project model and DTOs.

use folio_core::types::{DbId, Timestamp};
use folio_core::validation::{
    validate_github_url, validate_image_url, validate_project_url, validate_tags,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Empty link strings are accepted and stored as `NULL`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "validate_project_url"))]
    pub project_url: Option<String>,
    #[validate(custom(function = "validate_github_url"))]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "validate_project_url"))]
    pub project_url: Option<String>,
    #[validate(custom(function = "validate_github_url"))]
    pub github_url: Option<String>,
}

/// Map an empty link to `None`.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
