//! Error types for ToxLens

/// Result type alias using ToxLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ToxLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The classifier's class set is not exactly {0, 1}, so there is no
    /// well-defined positive class to orient probabilities or coefficients
    /// toward. Fatal to every prediction and explanation using that model.
    #[error("degenerate model: class set {0:?} is not the binary set {{0, 1}}")]
    DegenerateModel(Vec<i64>),

    /// The classifier exposes no per-feature coefficients, so
    /// coefficient-based explanation is unavailable.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// A model or vectorizer artifact on disk is missing or corrupt.
    /// Fatal at startup; names the file that failed.
    #[error("failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new degenerate-model error from the offending class set
    pub fn degenerate_model(classes: impl Into<Vec<i64>>) -> Self {
        Self::DegenerateModel(classes.into())
    }

    /// Create a new unsupported-model error
    pub fn unsupported_model(msg: impl Into<String>) -> Self {
        Self::UnsupportedModel(msg.into())
    }

    /// Create a new artifact-load error naming the failing path
    pub fn artifact_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable kind, used by API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DegenerateModel(_) => "degenerate_model",
            Self::UnsupportedModel(_) => "unsupported_model",
            Self::ArtifactLoad { .. } => "artifact_load",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}
