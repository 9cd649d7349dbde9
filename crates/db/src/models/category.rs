//! Note category model and DTOs.
//!
//! Categories are keyed by a caller-chosen slug rather than a generated id.

use folio_core::types::Timestamp;
use folio_core::validation::validate_category_id;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `note_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteCategory {
    #[validate(
        length(min = 1, max = 100, message = "ID is required"),
        custom(function = "validate_category_id")
    )]
    pub id: String,
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 100, message = "Icon must be at most 100 characters"))]
    pub icon: Option<String>,
}

/// The id is fixed once created.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteCategory {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 100, message = "Icon must be at most 100 characters"))]
    pub icon: Option<String>,
}
