use thiserror::Error;

/// Unified error type for the differentiation crate.
#[derive(Debug, Error)]
pub enum DiffError {
    /// Precondition violation: empty input, bad counts, degenerate interval,
    /// mismatched grid sizes or steps too close to tell apart.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Wrapper around I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failures.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Any other context dependent failure.
    #[error("{0}")]
    Other(String),
}

impl DiffError {
    pub fn invalid<T: Into<String>>(msg: T) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn other<T: Into<String>>(msg: T) -> Self {
        Self::Other(msg.into())
    }

    /// True for precondition violations, as opposed to I/O or parse failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

pub type Result<T, E = DiffError> = std::result::Result<T, E>;
