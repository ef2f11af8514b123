//! JSON loaders for the per-part data files.
//!
//! A part is described by three files:
//!
//! - `adjacency_graph.json`: `{"<face>": ["<face>", ...], ...}`
//! - `adjacency_graph_edge_metadata.json`: `{"<face>-<face>": [<code>, ...], ...}`
//! - `entity_geometry_info.json`: `[{"entityId": ..., "centerPoint": [x, y, z], ...}, ...]`

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::entity_info::{EntityInfo, EntityInfoTable};
use crate::error::{PocketError, Result};
use crate::math::{Point3, Vector3};
use crate::topology::{AdjacencyGraph, EdgeMetadata, FaceId};

/// File name of the adjacency graph inside a part directory.
pub const ADJACENCY_FILE: &str = "adjacency_graph.json";
/// File name of the edge metadata inside a part directory.
pub const EDGE_METADATA_FILE: &str = "adjacency_graph_edge_metadata.json";
/// File name of the entity info inside a part directory.
pub const ENTITY_INFO_FILE: &str = "entity_geometry_info.json";

const KEY_SEPARATOR: char = '-';

impl<'de> Deserialize<'de> for AdjacencyGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct GraphVisitor;

        impl<'de> Visitor<'de> for GraphVisitor {
            type Value = AdjacencyGraph;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from face id to a list of neighbor face ids")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut graph = AdjacencyGraph::new();
                while let Some((id, neighbors)) = map.next_entry::<FaceId, Vec<FaceId>>()? {
                    graph.add_face(id, neighbors);
                }
                Ok(graph)
            }
        }

        deserializer.deserialize_map(GraphVisitor)
    }
}

/// Reads an adjacency graph, keeping faces in document order.
///
/// # Errors
///
/// Returns an error if the input is not a JSON object of string lists.
pub fn read_adjacency_graph<R: Read>(reader: R) -> Result<AdjacencyGraph> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads edge metadata keyed by `"<face>-<face>"` strings.
///
/// Face ids may themselves contain hyphens, so each key is split at the
/// hyphen whose halves both name faces of `graph`. A key with no such split
/// and exactly one hyphen is taken at that hyphen.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON of the expected shape, or
/// if a key cannot be split unambiguously.
pub fn read_edge_metadata<R: Read>(reader: R, graph: &AdjacencyGraph) -> Result<EdgeMetadata> {
    let raw: BTreeMap<String, Vec<u8>> = serde_json::from_reader(reader)?;
    let mut metadata = EdgeMetadata::new();
    for (key, codes) in raw {
        let (a, b) = split_edge_key(&key, graph)?;
        metadata.insert(a, b, codes);
    }
    Ok(metadata)
}

/// Splits a serialized edge key into its two face ids.
///
/// # Errors
///
/// Returns [`PocketError::MalformedEdgeKey`] when the key has no usable
/// hyphen, and [`PocketError::AmbiguousEdgeKey`] when more than one split
/// is possible.
pub fn split_edge_key<'k>(key: &'k str, graph: &AdjacencyGraph) -> Result<(&'k str, &'k str)> {
    let splits: Vec<(&str, &str)> = key
        .match_indices(KEY_SEPARATOR)
        .map(|(at, sep)| (&key[..at], &key[at + sep.len()..]))
        .filter(|(a, b)| !a.is_empty() && !b.is_empty())
        .collect();

    let known: Vec<(&str, &str)> = splits
        .iter()
        .copied()
        .filter(|(a, b)| graph.contains(a) && graph.contains(b))
        .collect();

    match (known.as_slice(), splits.as_slice()) {
        ([only], _) | ([], [only]) => Ok(*only),
        ([], []) => Err(PocketError::MalformedEdgeKey { key: key.to_owned() }),
        ([], many) | (many, _) => Err(PocketError::AmbiguousEdgeKey {
            key: key.to_owned(),
            candidates: many.len(),
        }),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityRecord {
    entity_id: FaceId,
    center_point: [f64; 3],
    center_normal: [f64; 3],
    #[serde(default)]
    area: f64,
    #[serde(default)]
    radius: Option<f64>,
}

impl EntityRecord {
    fn into_entry(self) -> Result<(FaceId, EntityInfo)> {
        let reason = if self.area < 0.0 {
            Some("negative area")
        } else if self.radius.is_some_and(|r| r < 0.0) {
            Some("negative radius")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(PocketError::InvalidEntityInfo {
                entity: self.entity_id.to_string(),
                reason: reason.to_owned(),
            });
        }

        let info = EntityInfo {
            center_point: Point3::from(self.center_point),
            center_normal: Vector3::from(self.center_normal),
            area: self.area,
            radius: self.radius,
        };
        Ok((self.entity_id, info))
    }
}

/// Reads per-face entity info from a JSON array of records.
///
/// A missing `area` reads as zero. Unknown fields are ignored.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON of the expected shape,
/// or if a record has a negative area or radius.
pub fn read_entity_info<R: Read>(reader: R) -> Result<EntityInfoTable> {
    let records: Vec<EntityRecord> = serde_json::from_reader(reader)?;
    records
        .into_iter()
        .map(EntityRecord::into_entry)
        .collect()
}

/// The data files of one part.
#[derive(Debug, Clone, Default)]
pub struct PartData {
    /// Face adjacency, in document order.
    pub graph: AdjacencyGraph,
    /// Edge type codes per face pair.
    pub metadata: EdgeMetadata,
    /// Per-face attributes; empty when the part has no entity info file.
    pub entity_info: EntityInfoTable,
}

impl PartData {
    /// Loads a part from a directory holding [`ADJACENCY_FILE`],
    /// [`EDGE_METADATA_FILE`], and optionally [`ENTITY_INFO_FILE`].
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or any file fails to parse.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let graph = read_adjacency_graph(open(&dir.join(ADJACENCY_FILE))?)?;
        let metadata = read_edge_metadata(open(&dir.join(EDGE_METADATA_FILE))?, &graph)?;

        let info_path = dir.join(ENTITY_INFO_FILE);
        let entity_info = if info_path.exists() {
            read_entity_info(open(&info_path)?)?
        } else {
            EntityInfoTable::new()
        };

        debug!(
            dir = %dir.display(),
            faces = graph.len(),
            edges = metadata.len(),
            entities = entity_info.len(),
            "part data loaded"
        );
        Ok(Self {
            graph,
            metadata,
            entity_info,
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::CONCAVE;

    fn graph(json: &str) -> AdjacencyGraph {
        read_adjacency_graph(json.as_bytes()).unwrap()
    }

    #[test]
    fn adjacency_keeps_document_order() {
        let g = graph(r#"{"C": ["A"], "A": ["C", "B"], "B": []}"#);
        let order: Vec<&str> = g.declared_faces().map(FaceId::as_str).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn adjacency_accepts_integer_ids() {
        let g = graph(r#"{"1": [2], "2": [1, "3"]}"#);
        let order: Vec<&str> = g.faces().map(|(_, node)| node.id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
        assert_eq!(g.neighbors("1").map(FaceId::as_str).collect::<Vec<_>>(), vec!["2"]);

        let m = read_edge_metadata(r#"{"1-2": [2]}"#.as_bytes(), &g).unwrap();
        assert_eq!(m.codes("2", "1").unwrap(), &[CONCAVE]);
    }

    #[test]
    fn entity_info_accepts_integer_ids() {
        let json = r#"[{"entityId": 7, "centerPoint": [0, 0, 0], "centerNormal": [0, 0, 1]}]"#;
        let table = read_entity_info(json.as_bytes()).unwrap();
        assert!(table.get("7").is_some());
    }

    #[test]
    fn adjacency_rejects_non_object() {
        let err = read_adjacency_graph("[1, 2]".as_bytes()).unwrap_err();
        assert!(matches!(err, PocketError::Json(_)));
    }

    #[test]
    fn edge_metadata_reads_plain_keys() {
        let g = graph(r#"{"A": ["B"], "B": ["A"]}"#);
        let m = read_edge_metadata(r#"{"B-A": [2, 0]}"#.as_bytes(), &g).unwrap();
        assert_eq!(m.codes("A", "B").unwrap(), &[CONCAVE, 0]);
    }

    #[test]
    fn edge_key_resolved_against_known_faces() {
        let g = graph(r#"{"A-B": ["C"], "C": ["A-B"]}"#);
        assert_eq!(split_edge_key("A-B-C", &g).unwrap(), ("A-B", "C"));
        assert_eq!(split_edge_key("C-A-B", &g).unwrap(), ("C", "A-B"));
    }

    #[test]
    fn edge_key_with_unknown_faces_uses_single_hyphen() {
        let g = AdjacencyGraph::new();
        assert_eq!(split_edge_key("12-34", &g).unwrap(), ("12", "34"));
    }

    #[test]
    fn edge_key_without_separator_is_malformed() {
        let g = AdjacencyGraph::new();
        for key in ["AB", "-A", "A-", "-"] {
            let err = split_edge_key(key, &g).unwrap_err();
            assert!(matches!(err, PocketError::MalformedEdgeKey { .. }), "{key}");
        }
    }

    #[test]
    fn edge_key_with_two_known_splits_is_ambiguous() {
        let g = graph(r#"{"A": [], "B-C": [], "A-B": [], "C": []}"#);
        let err = split_edge_key("A-B-C", &g).unwrap_err();
        assert!(matches!(err, PocketError::AmbiguousEdgeKey { candidates: 2, .. }));
    }

    #[test]
    fn edge_key_with_unknown_faces_and_many_hyphens_is_ambiguous() {
        let g = AdjacencyGraph::new();
        let err = split_edge_key("x-y-z", &g).unwrap_err();
        assert!(matches!(err, PocketError::AmbiguousEdgeKey { candidates: 2, .. }));
    }

    #[test]
    fn entity_info_reads_records() {
        let json = r#"[
            {"entityId": "A", "centerPoint": [1, 2, 3], "centerNormal": [0, 0, 1], "area": 4.5, "edgeCurveChains": []},
            {"entityId": "B", "centerPoint": [0, 0, 0], "centerNormal": [1, 0, 0], "radius": 2.0}
        ]"#;
        let table = read_entity_info(json.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let a = table.get("A").unwrap();
        assert_eq!(a.center_point, Point3::new(1.0, 2.0, 3.0));
        assert!((a.area - 4.5).abs() < f64::EPSILON);
        let b = table.get("B").unwrap();
        assert_eq!(b.radius, Some(2.0));
        assert!(b.area.abs() < f64::EPSILON);
    }

    #[test]
    fn entity_info_rejects_negative_area() {
        let json = r#"[{"entityId": "A", "centerPoint": [0, 0, 0], "centerNormal": [0, 0, 1], "area": -1}]"#;
        let err = read_entity_info(json.as_bytes()).unwrap_err();
        assert!(matches!(err, PocketError::InvalidEntityInfo { ref entity, .. } if entity == "A"));
    }

    #[test]
    fn missing_part_directory_is_io_error() {
        let err = PartData::load("/nonexistent/part/dir").unwrap_err();
        assert!(matches!(err, PocketError::Io(_)));
    }
}
