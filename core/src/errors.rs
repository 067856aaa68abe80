//! Error types for the corpus pipeline, the model builder and the decoder.
//!
//! Two families live here:
//! - [`DisambError`] is surfaced to callers: structural lattice problems,
//!   estimator failures and I/O.
//! - [`ParseIssue`] explains why a corpus line produced no token. The corpus
//!   builder swallows these and keeps scanning.

/// Result type with [`DisambError`] as the default error.
pub type Result<T, E = DisambError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum DisambError {
    /// The lattice, or one of its positions, has no candidate tags.
    #[error("lattice position {position} has no candidate tags")]
    EmptyLattice { position: usize },

    /// The first or the last lattice position lacks the sentence boundary tag.
    #[error("lattice position {position} does not hold the sentence boundary tag")]
    MissingBoundary { position: usize },

    /// The external n-gram estimator failed or produced nothing usable.
    #[error("n-gram estimator failed: {0}")]
    EstimatorFailure(String),

    /// Only bigram models are supported.
    #[error("unsupported n-gram order {0}, only bigrams are supported")]
    UnsupportedOrder(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl DisambError {
    pub(crate) fn estimator<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::EstimatorFailure(msg.into())
    }
}

/// Why a corpus line yielded no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseIssue {
    /// The line matches neither the word pattern nor the root/IG pattern.
    #[error("line matches no word or root/IG pattern")]
    ParseMismatch,

    /// A root/IG line without a quoted root, or with an empty root or IG.
    #[error("root/IG line has no usable quoted root or IG")]
    MalformedIgFragment,
}
