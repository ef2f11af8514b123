use crate::entity_info::EntityInfoTable;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::FaceId;

use super::detect::Pocket;

/// Aggregate attributes of one pocket, joined from entity info.
#[derive(Debug, Clone, PartialEq)]
pub struct PocketSummary {
    /// Position of the pocket in the detection output.
    pub index: usize,
    /// Number of member faces.
    pub face_count: usize,
    /// Member faces with no entity info.
    pub missing: Vec<FaceId>,
    /// Sum of member face areas.
    pub total_area: f64,
    /// Area-weighted mean of member center points.
    pub centroid: Option<Point3>,
    /// Area-weighted mean of member normals, normalized.
    pub mean_normal: Option<Vector3>,
    /// Extent of member center points along `mean_normal`.
    pub depth: Option<f64>,
}

/// Summarizes pockets using per-face entity info.
///
/// Faces without entity info are listed in [`PocketSummary::missing`] and
/// contribute nothing to the aggregates.
pub struct SummarizePockets<'a> {
    pockets: &'a [Pocket],
    info: &'a EntityInfoTable,
}

impl<'a> SummarizePockets<'a> {
    /// Creates a new `SummarizePockets` query.
    #[must_use]
    pub fn new(pockets: &'a [Pocket], info: &'a EntityInfoTable) -> Self {
        Self { pockets, info }
    }

    /// Executes the query, returning one summary per pocket in input order.
    #[must_use]
    pub fn execute(&self) -> Vec<PocketSummary> {
        self.pockets
            .iter()
            .enumerate()
            .map(|(index, pocket)| self.summarize(index, pocket))
            .collect()
    }

    fn summarize(&self, index: usize, pocket: &Pocket) -> PocketSummary {
        let mut missing = Vec::new();
        let mut total_area = 0.0;
        let mut weighted_center = Vector3::zeros();
        let mut weighted_normal = Vector3::zeros();
        let mut centers = Vec::with_capacity(pocket.len());

        for id in pocket.faces() {
            let Some(info) = self.info.get(id.as_str()) else {
                missing.push(id.clone());
                continue;
            };
            total_area += info.area;
            weighted_center += info.center_point.coords * info.area;
            weighted_normal += info.center_normal * info.area;
            centers.push(info.center_point);
        }

        let centroid = (total_area > TOLERANCE).then(|| Point3::from(weighted_center / total_area));
        let mean_normal = weighted_normal.try_normalize(TOLERANCE);
        let depth = mean_normal.and_then(|normal| extent_along(&centers, &normal));

        PocketSummary {
            index,
            face_count: pocket.len(),
            missing,
            total_area,
            centroid,
            mean_normal,
            depth,
        }
    }
}

fn extent_along(points: &[Point3], direction: &Vector3) -> Option<f64> {
    let mut projections = points.iter().map(|p| p.coords.dot(direction));
    let first = projections.next()?;
    let (min, max) = projections.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some(max - min)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entity_info::EntityInfo;
    use crate::operations::detect::detect_pockets;
    use crate::topology::{AdjacencyGraph, EdgeMetadata};
    use approx::assert_relative_eq;

    fn info(center: [f64; 3], normal: [f64; 3], area: f64) -> EntityInfo {
        EntityInfo {
            center_point: Point3::new(center[0], center[1], center[2]),
            center_normal: Vector3::new(normal[0], normal[1], normal[2]),
            area,
            radius: None,
        }
    }

    fn step_pocket() -> Vec<Pocket> {
        let graph: AdjacencyGraph = [("floor", vec!["wall"]), ("wall", vec!["floor", "rim"])]
            .into_iter()
            .collect();
        let metadata: EdgeMetadata = [("floor", "wall", vec![2]), ("wall", "rim", vec![2])]
            .into_iter()
            .collect();
        detect_pockets(&graph, &metadata)
    }

    #[test]
    fn aggregates_area_and_centroid() {
        let pockets = step_pocket();
        let table: EntityInfoTable = [
            ("floor", info([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], 3.0)),
            ("wall", info([4.0, 0.0, 2.0], [0.0, 0.0, 1.0], 1.0)),
            ("rim", info([0.0, 4.0, 6.0], [0.0, 0.0, 1.0], 0.0)),
        ]
        .into_iter()
        .collect();

        let summaries = SummarizePockets::new(&pockets, &table).execute();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];

        assert_eq!(summary.index, 0);
        assert_eq!(summary.face_count, 3);
        assert!(summary.missing.is_empty());
        assert_relative_eq!(summary.total_area, 4.0);

        let centroid = summary.centroid.unwrap();
        assert_relative_eq!(centroid.x, 1.0);
        assert_relative_eq!(centroid.z, 0.5);

        let normal = summary.mean_normal.unwrap();
        assert_relative_eq!(normal.z, 1.0);
        assert_relative_eq!(summary.depth.unwrap(), 6.0);
    }

    #[test]
    fn missing_faces_are_reported() {
        let pockets = step_pocket();
        let table: EntityInfoTable = [("wall", info([1.0, 2.0, 3.0], [1.0, 0.0, 0.0], 2.0))]
            .into_iter()
            .collect();

        let summary = &SummarizePockets::new(&pockets, &table).execute()[0];
        let missing: Vec<&str> = summary.missing.iter().map(FaceId::as_str).collect();
        assert_eq!(missing.len(), 2);
        assert!(missing.contains(&"floor"));
        assert!(missing.contains(&"rim"));
        assert_relative_eq!(summary.depth.unwrap(), 0.0);
    }

    #[test]
    fn empty_table_yields_no_aggregates() {
        let pockets = step_pocket();
        let summary = &SummarizePockets::new(&pockets, &EntityInfoTable::new()).execute()[0];
        assert_eq!(summary.missing.len(), 3);
        assert!(summary.centroid.is_none());
        assert!(summary.mean_normal.is_none());
        assert!(summary.depth.is_none());
    }

    #[test]
    fn opposing_normals_cancel() {
        let pockets = step_pocket();
        let table: EntityInfoTable = [
            ("floor", info([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], 1.0)),
            ("wall", info([0.0, 0.0, 1.0], [0.0, 0.0, -1.0], 1.0)),
        ]
        .into_iter()
        .collect();

        let summary = &SummarizePockets::new(&pockets, &table).execute()[0];
        assert!(summary.mean_normal.is_none());
        assert!(summary.depth.is_none());
        assert!(summary.centroid.is_some());
    }
}
