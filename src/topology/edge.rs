use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::face::FaceId;

/// Edge type code marking two faces that meet at a concave (reflex) angle.
pub const CONCAVE: u8 = 2;

/// Order-independent key of the edge between two faces.
///
/// The pair is stored canonicalized (`lo <= hi`), so `(a, b)` and `(b, a)`
/// produce equal keys and no separator is involved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: FaceId,
    hi: FaceId,
}

impl EdgeKey {
    /// Creates the canonical key for the edge between `a` and `b`.
    #[must_use]
    pub fn new(a: FaceId, b: FaceId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Returns the two faces in canonical order.
    #[must_use]
    pub fn faces(&self) -> (&FaceId, &FaceId) {
        (&self.lo, &self.hi)
    }

    /// Returns `true` if both ends are the same face.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.lo == self.hi
    }
}

fn canonical<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Edge type codes recorded per face pair.
///
/// Codes recorded under both orientations of a pair are merged.
#[derive(Debug, Clone, Default)]
pub struct EdgeMetadata {
    // lo -> hi -> codes
    records: HashMap<FaceId, HashMap<FaceId, Vec<u8>>>,
    len: usize,
}

impl EdgeMetadata {
    /// Creates empty edge metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `codes` for the edge between `a` and `b`.
    ///
    /// Codes already recorded for the pair (under either orientation) are kept.
    pub fn insert(
        &mut self,
        a: impl Into<FaceId>,
        b: impl Into<FaceId>,
        codes: impl IntoIterator<Item = u8>,
    ) {
        let EdgeKey { lo, hi } = EdgeKey::new(a.into(), b.into());
        let row = self.records.entry(lo).or_default();
        let slot = match row.entry(hi) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.len += 1;
                entry.insert(Vec::new())
            }
        };
        for code in codes {
            if !slot.contains(&code) {
                slot.push(code);
            }
        }
    }

    /// Returns the codes recorded for the edge between `a` and `b`, if any.
    #[must_use]
    pub fn codes(&self, a: &str, b: &str) -> Option<&[u8]> {
        let (lo, hi) = canonical(a, b);
        self.records.get(lo)?.get(hi).map(Vec::as_slice)
    }

    /// Returns `true` if any codes are recorded for the edge between `a` and `b`.
    #[must_use]
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.codes(a, b).is_some()
    }

    /// Number of recorded face pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no pairs are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over recorded pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&FaceId, &FaceId, &[u8])> + '_ {
        self.records.iter().flat_map(|(lo, row)| {
            row.iter().map(move |(hi, codes)| (lo, hi, codes.as_slice()))
        })
    }
}

impl<A, B, C> FromIterator<(A, B, C)> for EdgeMetadata
where
    A: Into<FaceId>,
    B: Into<FaceId>,
    C: IntoIterator<Item = u8>,
{
    fn from_iter<I: IntoIterator<Item = (A, B, C)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (a, b, codes) in iter {
            metadata.insert(a, b, codes);
        }
        metadata
    }
}
