//! Learning timeline entries shown on the about page.

use folio_core::types::{DbId, Timestamp};
use folio_core::validation::validate_tags;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `learning_experiences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningExperience {
    pub id: DbId,
    pub year: i32,
    pub title: String,
    pub skills: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLearningExperience {
    #[validate(range(min = 1900, message = "Year must be greater than 1900"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(
        length(min = 1, message = "At least one skill is required"),
        custom(function = "validate_tags")
    )]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLearningExperience {
    #[validate(range(min = 1900, message = "Year must be greater than 1900"))]
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(
        length(min = 1, message = "At least one skill is required"),
        custom(function = "validate_tags")
    )]
    pub skills: Option<Vec<String>>,
}
