#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing, unknown, or expired session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Wrong admin password.
    #[error("Invalid credentials")]
    InvalidCredential,

    /// A required server-side secret or setting is absent. The detail is for
    /// operators only and must never reach the client.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
