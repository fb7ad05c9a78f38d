/// Errors that can occur during profile store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Username already exists. Please login instead.")]
    DuplicateUsername(String),

    #[error("Email already registered. Please login instead.")]
    DuplicateEmail(String),

    #[error("farmer not found: {0}")]
    NotFound(String),

    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl ProfileError {
    pub(crate) fn invalid(field: &str, message: &str) -> Self {
        ProfileError::Invalid {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
