//! Field rules shared by request DTOs, written as `validator` custom functions.
//!
//! Each function sets `ValidationError::message` so the API can report the
//! first violation verbatim.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// Lowercase letters, digits and hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9-]+$";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("valid regex"));

pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 255;

fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Admin password bounds.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let chars = password.chars().count();
    if chars < PASSWORD_MIN_CHARS {
        return Err(violation(
            "password_too_short",
            "Password must be at least 8 characters long",
        ));
    }
    if chars > PASSWORD_MAX_CHARS {
        return Err(violation(
            "password_too_long",
            "Password must be less than 255 characters",
        ));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        Err(violation(
            "slug",
            "Slug must be lowercase alphanumeric with hyphens",
        ))
    }
}

/// Category ids follow the slug alphabet.
pub fn validate_category_id(id: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(id) {
        Ok(())
    } else {
        Err(violation(
            "category_id",
            "ID must be lowercase alphanumeric with hyphens",
        ))
    }
}

/// Absolute http(s) URL. An empty string means "no link" and passes.
fn check_optional_url(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(violation("url", message)),
    }
}

pub fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    check_optional_url(value, "Invalid image URL")
}

pub fn validate_project_url(value: &str) -> Result<(), ValidationError> {
    check_optional_url(value, "Invalid project URL")
}

pub fn validate_github_url(value: &str) -> Result<(), ValidationError> {
    check_optional_url(value, "Invalid GitHub URL")
}

/// Every tag must contain something other than whitespace.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return Err(violation("tags", "Tags must not be empty"));
    }
    Ok(())
}

/// Message of the first violation, taking fields in name order.
///
/// Falls back to a generic message naming the field when the rule carried no
/// message of its own.
pub fn first_violation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}"),
            })
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}
