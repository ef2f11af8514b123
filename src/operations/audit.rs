use std::collections::BTreeSet;

use tracing::warn;

use super::classify::{ClassifyEdge, EdgeClass};
use crate::topology::{AdjacencyGraph, EdgeKey, EdgeMetadata, FaceId};

/// Inconsistencies between an adjacency graph and its edge metadata.
///
/// None of these stop pocket detection; they point at upstream data bugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDiagnostics {
    /// Faces listed as neighbors but never declared, in graph order.
    pub dangling: Vec<FaceId>,
    /// Faces that list themselves, in graph order.
    pub self_loops: Vec<FaceId>,
    /// Pairs listed by one face but not the other, as `(lister, listed)`.
    pub asymmetric: Vec<(FaceId, FaceId)>,
    /// Adjacent pairs with no edge metadata, sorted.
    pub unclassified: Vec<EdgeKey>,
    /// Metadata pairs whose faces are not adjacent in the graph, sorted.
    pub orphan_edges: Vec<EdgeKey>,
}

impl GraphDiagnostics {
    /// Returns `true` if no inconsistency was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
            && self.self_loops.is_empty()
            && self.asymmetric.is_empty()
            && self.unclassified.is_empty()
            && self.orphan_edges.is_empty()
    }
}

/// Checks an adjacency graph against its edge metadata.
pub struct AuditGraph<'a> {
    graph: &'a AdjacencyGraph,
    metadata: &'a EdgeMetadata,
}

impl<'a> AuditGraph<'a> {
    /// Creates a new `AuditGraph` query.
    #[must_use]
    pub fn new(graph: &'a AdjacencyGraph, metadata: &'a EdgeMetadata) -> Self {
        Self { graph, metadata }
    }

    /// Executes the audit.
    #[must_use]
    pub fn execute(&self) -> GraphDiagnostics {
        let classify = ClassifyEdge::new(self.metadata);
        let mut report = GraphDiagnostics::default();
        let mut adjacent = BTreeSet::new();
        let mut unclassified = BTreeSet::new();
        let mut one_sided = BTreeSet::new();

        for (key, node) in self.graph.faces() {
            if !node.declared {
                report.dangling.push(node.id.clone());
            }

            let mut looped = false;
            for &other in &node.listed {
                let Some(other_node) = self.graph.node(other) else {
                    continue;
                };
                if other_node.declared
                    && !other_node.listed.contains(&key)
                    && one_sided.insert((key, other))
                {
                    report
                        .asymmetric
                        .push((node.id.clone(), other_node.id.clone()));
                }

                let edge = EdgeKey::new(node.id.clone(), other_node.id.clone());
                looped |= edge.is_loop();
                let class = classify.execute(node.id.as_str(), other_node.id.as_str());
                if class == EdgeClass::Unknown {
                    unclassified.insert(edge.clone());
                }
                adjacent.insert(edge);
            }
            if looped {
                report.self_loops.push(node.id.clone());
            }
        }

        let mut orphans: Vec<EdgeKey> = self
            .metadata
            .iter()
            .map(|(a, b, _)| EdgeKey::new(a.clone(), b.clone()))
            .filter(|edge| !adjacent.contains(edge))
            .collect();
        orphans.sort();

        report.unclassified = unclassified.into_iter().collect();
        report.orphan_edges = orphans;

        if !report.is_clean() {
            warn!(
                dangling = report.dangling.len(),
                self_loops = report.self_loops.len(),
                asymmetric = report.asymmetric.len(),
                unclassified = report.unclassified.len(),
                orphan_edges = report.orphan_edges.len(),
                "adjacency graph and edge metadata disagree"
            );
        }
        report
    }
}
