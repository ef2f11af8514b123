//! Per-face geometric attributes, joined against pockets for reporting.
//!
//! These values are pre-extracted from the B-rep by an upstream tool; this
//! crate only reads them.

use std::collections::HashMap;

use crate::math::{Point3, Vector3};
use crate::topology::FaceId;

/// Geometric attributes of one face.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    /// A representative point at the center of the face.
    pub center_point: Point3,
    /// The face normal at `center_point`.
    pub center_normal: Vector3,
    /// Surface area of the face.
    pub area: f64,
    /// Radius for cylindrical, conical, or spherical faces.
    pub radius: Option<f64>,
}

/// Entity info for a set of faces, keyed by face id.
#[derive(Debug, Clone, Default)]
pub struct EntityInfoTable {
    entries: HashMap<FaceId, EntityInfo>,
}

impl EntityInfoTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the info for a face, returning the previous value.
    pub fn insert(&mut self, id: impl Into<FaceId>, info: EntityInfo) -> Option<EntityInfo> {
        self.entries.insert(id.into(), info)
    }

    /// Returns the info for a face, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EntityInfo> {
        self.entries.get(id)
    }

    /// Number of faces with entity info.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&FaceId, &EntityInfo)> + '_ {
        self.entries.iter()
    }
}

impl<F: Into<FaceId>> FromIterator<(F, EntityInfo)> for EntityInfoTable {
    fn from_iter<I: IntoIterator<Item = (F, EntityInfo)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (id, info) in iter {
            table.insert(id, info);
        }
        table
    }
}
