use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;
use slotmap::SecondaryMap;
use tracing::{debug, trace};

use super::classify::{ClassifyEdge, EdgeClass};
use crate::topology::{AdjacencyGraph, EdgeMetadata, FaceId, FaceKey, CONCAVE};

/// Parameters controlling pocket detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionParams {
    /// Edge type code that marks a concave edge.
    pub concave_code: u8,
    /// Minimum number of faces for a cluster to count as a pocket.
    /// Values below 2 are treated as 2.
    pub min_pocket_size: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            concave_code: CONCAVE,
            min_pocket_size: 2,
        }
    }
}

/// A maximal set of faces connected through concave edges.
///
/// Faces are stored in traversal order. Two pockets are equal when they
/// contain the same faces, regardless of order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Pocket {
    faces: Vec<FaceId>,
}

impl Pocket {
    /// The member faces in traversal order.
    #[must_use]
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Number of member faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always `false` for pockets produced by detection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns `true` if `id` is a member of this pocket.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.faces.iter().any(|face| face.as_str() == id)
    }

    /// The member faces as an ordered set.
    #[must_use]
    pub fn members(&self) -> BTreeSet<&FaceId> {
        self.faces.iter().collect()
    }

    /// Consumes the pocket, returning its faces in traversal order.
    #[must_use]
    pub fn into_faces(self) -> Vec<FaceId> {
        self.faces
    }
}

impl PartialEq for Pocket {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.members() == other.members()
    }
}

impl Eq for Pocket {}

/// Partitions the faces of an adjacency graph into pockets.
///
/// Runs a breadth-first traversal from every unvisited face in graph order,
/// crossing only concave edges. Adjacency is followed in both directions,
/// so a pair listed by just one of its faces still connects them. Clusters
/// smaller than the minimum pocket size are discarded.
///
/// Faces listed as neighbors but never declared join the pocket of any face
/// they share a concave edge with. Self-loops are ignored.
pub struct DetectPockets<'a> {
    graph: &'a AdjacencyGraph,
    metadata: &'a EdgeMetadata,
    params: DetectionParams,
}

impl<'a> DetectPockets<'a> {
    /// Creates a new `DetectPockets` operation with default parameters.
    #[must_use]
    pub fn new(graph: &'a AdjacencyGraph, metadata: &'a EdgeMetadata) -> Self {
        Self {
            graph,
            metadata,
            params: DetectionParams::default(),
        }
    }

    /// Sets custom detection parameters.
    #[must_use]
    pub fn with_params(mut self, params: DetectionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the detection, returning pockets in discovery order.
    #[must_use]
    pub fn execute(&self) -> Vec<Pocket> {
        let classify =
            ClassifyEdge::new(self.metadata).with_concave_code(self.params.concave_code);
        let min_size = self.params.min_pocket_size.max(2);

        let mut visited: SecondaryMap<FaceKey, ()> =
            SecondaryMap::with_capacity(self.graph.len());
        let mut queue = VecDeque::new();
        let mut pockets = Vec::new();
        let mut unclassified = BTreeSet::new();

        for (root, _) in self.graph.faces() {
            if visited.insert(root, ()).is_some() {
                continue;
            }
            queue.push_back(root);
            let mut cluster = Vec::new();

            while let Some(key) = queue.pop_front() {
                let Some(node) = self.graph.node(key) else {
                    continue;
                };
                cluster.push(node.id.clone());

                for neighbor in node.adjacent() {
                    if visited.contains_key(neighbor) {
                        continue;
                    }
                    let Some(other) = self.graph.face_id(neighbor) else {
                        continue;
                    };
                    match classify.execute(node.id.as_str(), other.as_str()) {
                        EdgeClass::Concave => {
                            visited.insert(neighbor, ());
                            queue.push_back(neighbor);
                        }
                        EdgeClass::Unknown => {
                            unclassified.insert((key.min(neighbor), key.max(neighbor)));
                        }
                        EdgeClass::NonConcave => {}
                    }
                }
            }

            if cluster.len() >= min_size {
                trace!(index = pockets.len(), faces = cluster.len(), "pocket found");
                pockets.push(Pocket { faces: cluster });
            }
        }

        debug!(
            faces = self.graph.len(),
            edges = self.metadata.len(),
            pockets = pockets.len(),
            unclassified = unclassified.len(),
            "pocket detection complete"
        );
        pockets
    }
}

/// Detects pockets with default parameters.
#[must_use]
pub fn detect_pockets(graph: &AdjacencyGraph, metadata: &EdgeMetadata) -> Vec<Pocket> {
    DetectPockets::new(graph, metadata).execute()
}
