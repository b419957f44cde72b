use thiserror::Error;

/// Result type for aisle operations
pub type Result<T> = std::result::Result<T, AisleError>;

/// Errors that can occur while managing the lexicon or sorting a list
///
/// Lookups that find nothing are not errors: an unknown item is a normal
/// branch of resolution, and renaming or deleting something absent is a no-op.
#[derive(Error, Debug)]
pub enum AisleError {
    /// Rejected input (empty name, duplicate item or section)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backup bundle is malformed
    #[error("Import format error: {0}")]
    ImportFormat(String),

    /// Underlying key-value store failed
    #[error("Store error: {0}")]
    Store(String),

    /// The interaction port could not obtain a decision
    #[error("Interaction error: {0}")]
    Interaction(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AisleError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn import_format(msg: impl Into<String>) -> Self {
        Self::ImportFormat(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn interaction(msg: impl Into<String>) -> Self {
        Self::Interaction(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AisleError = io_err.into();
        assert!(matches!(err, AisleError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AisleError::validation("section 'dairy' already exists");
        assert_eq!(
            err.to_string(),
            "Validation error: section 'dairy' already exists"
        );
        assert!(err.is_validation());

        let err = AisleError::import_format("missing `items`");
        assert_eq!(err.to_string(), "Import format error: missing `items`");
        assert!(!err.is_validation());
    }
}
