use thiserror::Error;

/// Top-level error type for loading pocket-detection inputs.
///
/// Detection itself is total; only the loading layer can fail.
#[derive(Debug, Error)]
pub enum PocketError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("malformed edge key {key:?}: expected \"<face>-<face>\"")]
    MalformedEdgeKey { key: String },

    #[error("ambiguous edge key {key:?}: {candidates} possible splits")]
    AmbiguousEdgeKey { key: String, candidates: usize },

    #[error("invalid entity info for {entity}: {reason}")]
    InvalidEntityInfo { entity: String, reason: String },
}

/// Convenience type alias for results using [`PocketError`].
pub type Result<T> = std::result::Result<T, PocketError>;
