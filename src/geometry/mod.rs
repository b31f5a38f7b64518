//! Generic geometry algorithms for trajectory evaluation.
//!
//! Includes:
//! - Umeyama least-squares Sim(m) alignment between corresponding point sets.
//! - Arc length and accumulated distances along a point sequence.
//!
//! Alignment takes `m × n` matrices (one point per column), the path-length
//! helpers take `n × m` matrices (one point per row).

use thiserror::Error;

mod path;
mod transform;
mod umeyama;

pub use path::{accumulated_distances, arc_len};
pub use transform::SimilarityTransform;
pub use umeyama::{alignment_rmse, umeyama_alignment, ZERO_COLUMN_TOLERANCE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("data matrices must have the same shape, got {x:?} and {y:?}")]
    ShapeMismatch {
        x: (usize, usize),
        y: (usize, usize),
    },
    #[error(
        "degenerate covariance rank {rank} (need at least {required}), \
         Umeyama alignment is not possible"
    )]
    DegenerateCovariance { rank: usize, required: usize },
    #[error("svd of the covariance matrix did not produce {0}")]
    DecompositionFailed(&'static str),
    #[error("point dimension {got} does not match transform dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}
