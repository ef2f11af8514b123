pub mod entity_info;
pub mod error;
pub mod io;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{PocketError, Result};
pub use operations::{detect_pockets, is_concave, DetectPockets, Pocket};
pub use topology::{AdjacencyGraph, EdgeMetadata, FaceId};
