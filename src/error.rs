use thiserror::Error;

/// Unified error type for image-tagger operations
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Malformed image reference: {0}")]
    MalformedReference(String),

    #[error("Tag list unavailable for '{repository}' after {attempts} attempt(s): {reason}")]
    TagListUnavailable {
        repository: String,
        attempts: u32,
        reason: String,
    },

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in image-tagger
pub type Result<T> = std::result::Result<T, TaggerError>;

impl TaggerError {
    /// Create a malformed reference error for the given image
    pub fn malformed(image: impl Into<String>) -> Self {
        TaggerError::MalformedReference(image.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TaggerError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        TaggerError::Remote(msg.into())
    }

    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        TaggerError::Pattern(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        TaggerError::Command(msg.into())
    }

    /// Whether a retry of the same request may succeed.
    ///
    /// Transport failures and unexpected remote responses are transient; a
    /// missing repository or a local misconfiguration is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, TaggerError::Http(_) | TaggerError::Remote(_))
    }
}
