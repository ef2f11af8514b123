mod audit;
mod classify;
mod detect;
mod summarize;

pub use audit::{AuditGraph, GraphDiagnostics};
pub use classify::{is_concave, ClassifyEdge, EdgeClass};
pub use detect::{detect_pockets, DetectPockets, DetectionParams, Pocket};
pub use summarize::{PocketSummary, SummarizePockets};
