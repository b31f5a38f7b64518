//! Similarity alignment and path-length metrics for trajectory evaluation.
//!
//! Point sets are dense `f64` matrices from `ndarray`. The alignment works on
//! `m × n` matrices (one point per column), the path-length helpers on `n × m`
//! matrices (one point per row).

pub mod config;
pub mod geometry;
pub mod logging;
pub mod synthetic;

pub use config::{AlignmentConfig, Config};
pub use geometry::{
    accumulated_distances, alignment_rmse, arc_len, umeyama_alignment, GeometryError,
    SimilarityTransform,
};

pub type Result<T> = anyhow::Result<T>;
