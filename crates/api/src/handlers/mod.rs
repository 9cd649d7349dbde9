//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `folio_db` and map
//! errors via [`AppError`].

pub mod auth;
pub mod categories;
pub mod learning;
pub mod notes;
pub mod posts;
pub mod projects;
pub mod search;
pub mod upload;

use folio_core::types::DbId;

use crate::error::AppError;

/// Parse a numeric id path segment, answering 400 with `message` otherwise.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<DbId, AppError> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::BadRequest(message.to_string()))
}
