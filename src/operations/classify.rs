use crate::topology::{EdgeMetadata, CONCAVE};

/// Classification of the edge between two faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// The recorded codes include the concave code.
    Concave,
    /// Codes are recorded for the pair, none of them concave.
    NonConcave,
    /// Nothing is recorded for the pair under either orientation.
    Unknown,
}

impl EdgeClass {
    /// Collapses the classification to "pocket-connected or not".
    ///
    /// `Unknown` counts as not concave.
    #[must_use]
    pub fn is_concave(self) -> bool {
        matches!(self, Self::Concave)
    }
}

/// Classifies edges between faces using recorded edge metadata.
///
/// Lookup is symmetric: `(a, b)` and `(b, a)` always agree.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyEdge<'a> {
    metadata: &'a EdgeMetadata,
    concave_code: u8,
}

impl<'a> ClassifyEdge<'a> {
    /// Creates a classifier that treats [`CONCAVE`] as the concave code.
    #[must_use]
    pub fn new(metadata: &'a EdgeMetadata) -> Self {
        Self {
            metadata,
            concave_code: CONCAVE,
        }
    }

    /// Overrides the code that marks a concave edge.
    #[must_use]
    pub fn with_concave_code(mut self, code: u8) -> Self {
        self.concave_code = code;
        self
    }

    /// Classifies the edge between `a` and `b`.
    #[must_use]
    pub fn execute(&self, a: &str, b: &str) -> EdgeClass {
        match self.metadata.codes(a, b) {
            None => EdgeClass::Unknown,
            Some(codes) if codes.contains(&self.concave_code) => EdgeClass::Concave,
            Some(_) => EdgeClass::NonConcave,
        }
    }
}

/// Returns `true` if the edge between `a` and `b` is recorded as concave.
///
/// A pair with no recorded metadata is not concave.
#[must_use]
pub fn is_concave(a: &str, b: &str, metadata: &EdgeMetadata) -> bool {
    ClassifyEdge::new(metadata).execute(a, b).is_concave()
}
