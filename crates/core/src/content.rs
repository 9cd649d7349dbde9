//! Content rules that do not depend on storage: search scope parsing, tag
//! aggregation, and upload constraints.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Which collections a search query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Posts,
    Notes,
}

impl SearchScope {
    pub fn includes_posts(self) -> bool {
        matches!(self, Self::All | Self::Posts)
    }

    pub fn includes_notes(self) -> bool {
        matches!(self, Self::All | Self::Notes)
    }
}

impl FromStr for SearchScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "posts" => Ok(Self::Posts),
            "notes" => Ok(Self::Notes),
            other => Err(CoreError::Validation(format!(
                "Invalid search type '{other}', expected one of: all, posts, notes"
            ))),
        }
    }
}

/// Trimmed search text, or a validation error when nothing is left.
pub fn normalize_query(raw: Option<&str>) -> Result<String, CoreError> {
    match raw.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q.to_string()),
        _ => Err(CoreError::Validation("Query is required".into())),
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside `LIKE`.
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Sorted, de-duplicated union of tag lists.
pub fn collect_unique_tags<I, T>(tag_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = String>,
{
    tag_lists
        .into_iter()
        .flatten()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Check the declared content type and size of an uploaded image.
pub fn check_image_upload(content_type: Option<&str>, size: usize) -> Result<(), CoreError> {
    match content_type {
        Some(ct) if ALLOWED_IMAGE_TYPES.contains(&ct) => {}
        _ => {
            return Err(CoreError::Validation(
                "Invalid file type. Only JPEG, PNG, WebP and GIF images are allowed".into(),
            ))
        }
    }
    if size == 0 {
        return Err(CoreError::Validation("No file provided".into()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(
            "File too large. Maximum size is 5MB".into(),
        ));
    }
    Ok(())
}

/// Asset identifier: `project_{id}_{millis}` for project images, `temp_{millis}` otherwise.
pub fn upload_public_id(project_id: Option<DbId>, timestamp_ms: i64) -> String {
    match project_id {
        Some(id) => format!("project_{id}_{timestamp_ms}"),
        None => format!("temp_{timestamp_ms}"),
    }
}
