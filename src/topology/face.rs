use std::borrow::Borrow;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

slotmap::new_key_type! {
    /// Unique identifier for a face in the adjacency graph arena.
    pub struct FaceKey;
}

/// Opaque, externally assigned identifier of a B-rep face (`entityId`).
///
/// Integer ids are stored in their decimal form, so `7` and `"7"` name the
/// same face.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FaceId(String);

impl FaceId {
    /// Creates a face identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FaceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for FaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for FaceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for FaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FaceIdVisitor;

        impl Visitor<'_> for FaceIdVisitor {
            type Value = FaceId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a face id string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(FaceId::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(FaceId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(FaceId::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(FaceId(v.to_string()))
            }
        }

        deserializer.deserialize_any(FaceIdVisitor)
    }
}

impl Borrow<str> for FaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Data associated with a face in the adjacency graph.
#[derive(Debug, Clone)]
pub struct FaceNode {
    /// The external identifier of this face.
    pub id: FaceId,
    /// Neighbors as listed by this face, in input order.
    pub listed: Vec<FaceKey>,
    /// Faces that list this face, in the order they were added.
    pub linked: Vec<FaceKey>,
    /// `false` while the face has only been seen as someone's neighbor.
    pub declared: bool,
}

impl FaceNode {
    pub(crate) fn new(id: FaceId, declared: bool) -> Self {
        Self {
            id,
            listed: Vec::new(),
            linked: Vec::new(),
            declared,
        }
    }

    /// Iterates over every face adjacent to this one, listed first.
    pub fn adjacent(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.listed.iter().chain(&self.linked).copied()
    }
}
