pub mod edge;
pub mod face;

pub use edge::{EdgeKey, EdgeMetadata, CONCAVE};
pub use face::{FaceId, FaceKey, FaceNode};

use slotmap::SlotMap;
use std::collections::HashMap;

/// Face adjacency graph of a B-rep solid.
///
/// Faces live in an arena and reference each other via typed keys
/// (generational indices). Iteration follows first-mention order: a face
/// is placed when it is first declared or first listed as a neighbor,
/// whichever comes first.
///
/// Neighbors that are listed but never declared are kept as *dangling*
/// faces with no neighbor list of their own.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyGraph {
    faces: SlotMap<FaceKey, FaceNode>,
    index: HashMap<FaceId, FaceKey>,
}

impl AdjacencyGraph {
    /// Creates a new, empty adjacency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a face and appends `neighbors` to its neighbor list.
    ///
    /// Declaring the same face twice extends its list. Returns the face key.
    pub fn add_face<I, N>(&mut self, id: impl Into<FaceId>, neighbors: I) -> FaceKey
    where
        I: IntoIterator<Item = N>,
        N: Into<FaceId>,
    {
        let key = self.intern(id.into());
        self.faces[key].declared = true;

        for neighbor in neighbors {
            let other = self.intern(neighbor.into());
            self.faces[key].listed.push(other);
            self.faces[other].linked.push(key);
        }
        key
    }

    fn intern(&mut self, id: FaceId) -> FaceKey {
        if let Some(&key) = self.index.get(&id) {
            return key;
        }
        let key = self.faces.insert(FaceNode::new(id.clone(), false));
        self.index.insert(id, key);
        key
    }

    /// Number of faces, dangling ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the graph has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns `true` if the face is declared or listed as a neighbor.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up the arena key of a face.
    #[must_use]
    pub fn key(&self, id: &str) -> Option<FaceKey> {
        self.index.get(id).copied()
    }

    /// Returns the node for `key`, if it belongs to this graph.
    #[must_use]
    pub fn node(&self, key: FaceKey) -> Option<&FaceNode> {
        self.faces.get(key)
    }

    /// Returns the external identifier for `key`, if it belongs to this graph.
    #[must_use]
    pub fn face_id(&self, key: FaceKey) -> Option<&FaceId> {
        self.faces.get(key).map(|node| &node.id)
    }

    /// Returns the neighbors a face lists for itself, in input order.
    ///
    /// Unknown and dangling faces have no listed neighbors.
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &FaceId> + '_ {
        self.key(id)
            .and_then(|key| self.faces.get(key))
            .map(|node| node.listed.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&key| &self.faces[key].id)
    }

    /// Iterates over all faces in first-mention order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &FaceNode)> + '_ {
        self.faces.iter()
    }

    /// Iterates over declared faces in first-mention order.
    pub fn declared_faces(&self) -> impl Iterator<Item = &FaceId> + '_ {
        self.faces
            .values()
            .filter(|node| node.declared)
            .map(|node| &node.id)
    }
}

impl<F, I, N> FromIterator<(F, I)> for AdjacencyGraph
where
    F: Into<FaceId>,
    I: IntoIterator<Item = N>,
    N: Into<FaceId>,
{
    fn from_iter<T: IntoIterator<Item = (F, I)>>(iter: T) -> Self {
        let mut graph = Self::new();
        for (id, neighbors) in iter {
            graph.add_face(id, neighbors);
        }
        graph
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids<'a>(iter: impl Iterator<Item = &'a FaceId>) -> Vec<&'a str> {
        iter.map(FaceId::as_str).collect()
    }

    #[test]
    fn faces_follow_first_mention_order() {
        let graph: AdjacencyGraph = [("B", vec!["X", "A"]), ("A", vec!["B"])]
            .into_iter()
            .collect();

        let order: Vec<&str> = graph.faces().map(|(_, node)| node.id.as_str()).collect();
        assert_eq!(order, vec!["B", "X", "A"]);
        assert_eq!(ids(graph.declared_faces()), vec!["B", "A"]);
    }

    #[test]
    fn dangling_neighbor_is_interned_without_neighbors() {
        let graph: AdjacencyGraph = [("A", vec!["Z"])].into_iter().collect();
        let z = graph.node(graph.key("Z").unwrap()).unwrap();

        assert!(!z.declared);
        assert!(z.listed.is_empty());
        assert_eq!(z.linked, vec![graph.key("A").unwrap()]);
        assert_eq!(graph.neighbors("Z").count(), 0);
    }

    #[test]
    fn declaring_a_dangling_face_promotes_it() {
        let mut graph = AdjacencyGraph::new();
        graph.add_face("A", ["B"]);
        let b = graph.add_face("B", ["A"]);

        assert_eq!(graph.len(), 2);
        assert!(graph.node(b).unwrap().declared);
        assert_eq!(ids(graph.neighbors("B")), vec!["A"]);
    }

    #[test]
    fn unknown_face_has_no_neighbors() {
        let graph = AdjacencyGraph::new();
        assert!(graph.is_empty());
        assert!(!graph.contains("A"));
        assert_eq!(graph.neighbors("A").count(), 0);
    }

    #[test]
    fn self_loop_is_recorded_both_ways() {
        let graph: AdjacencyGraph = [("A", vec!["A"])].into_iter().collect();
        let a = graph.key("A").unwrap();
        let node = graph.node(a).unwrap();
        assert_eq!(node.listed, vec![a]);
        assert_eq!(node.linked, vec![a]);
    }
}
