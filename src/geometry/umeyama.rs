//! Least-squares Sim(m) alignment of two registered point sets.
//!
//! Umeyama, Shinji: Least-squares estimation of transformation parameters
//! between two point patterns. IEEE PAMI, 1991.

use super::{GeometryError, SimilarityTransform};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Ix2};
use tracing::{debug, debug_span, trace, warn};

/// Reference columns whose largest absolute coordinate is below this value
/// are left out of the means and the covariance.
pub const ZERO_COLUMN_TOLERANCE: f64 = 1e-6;

/// Estimate the similarity transform `c * R * x + t` that best maps `x` onto `y`.
///
/// Both inputs are `m × n` matrices (`m` = dimension, `n` = number of points),
/// column `i` of `x` corresponding to column `i` of `y`. With `with_scale` off
/// the returned scale is exactly `1.0`.
///
/// Fails when the shapes differ, or when the cross-covariance has fewer than
/// `m - 1` singular values above machine epsilon.
pub fn umeyama_alignment<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
    with_scale: bool,
) -> Result<SimilarityTransform, GeometryError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if x.dim() != y.dim() {
        return Err(GeometryError::ShapeMismatch {
            x: x.dim(),
            y: y.dim(),
        });
    }

    let (m, n) = x.dim();
    let _span = debug_span!("umeyama_alignment", dim = m, points = n, with_scale).entered();

    let zero_cols = zero_column_mask(y.view());
    let num_zero_cols = zero_cols.iter().filter(|&&masked| masked).count();
    let valid = n - num_zero_cols;
    trace!(num_zero_cols, valid, "masked near-zero reference columns");

    if m == 0 || valid == 0 {
        warn!("no usable reference columns, covariance is undefined");
        return Err(GeometryError::DegenerateCovariance {
            rank: 0,
            required: m.saturating_sub(1),
        });
    }

    // eq. 34 and 35
    let mean_x = masked_mean(x.view(), &zero_cols, valid);
    let mean_y = masked_mean(y.view(), &zero_cols, valid);

    // eq. 36, over every column and the full point count
    let sigma_x = x
        .axis_iter(Axis(1))
        .map(|col| (&col - &mean_x).mapv(|v| v * v).sum())
        .sum::<f64>()
        / n as f64;

    // eq. 38
    let mut outer_sum = DMatrix::<f64>::zeros(m, m);
    for ((xi, yi), &masked) in x
        .axis_iter(Axis(1))
        .zip(y.axis_iter(Axis(1)))
        .zip(zero_cols.iter())
    {
        if masked {
            continue;
        }
        let dx = &xi - &mean_x;
        let dy = &yi - &mean_y;
        for r in 0..m {
            for c in 0..m {
                outer_sum[(r, c)] += dy[r] * dx[c];
            }
        }
    }
    let cov_xy = outer_sum / valid as f64;

    // singular values come back sorted in descending order
    let svd = cov_xy.svd(true, true);
    let d = svd.singular_values;
    let u = svd.u.ok_or(GeometryError::DecompositionFailed("U"))?;
    let v_t = svd.v_t.ok_or(GeometryError::DecompositionFailed("V^T"))?;

    let rank = d.iter().filter(|&&value| value > f64::EPSILON).count();
    if rank + 1 < m {
        warn!(rank, dim = m, "degenerate covariance rank");
        return Err(GeometryError::DegenerateCovariance {
            rank,
            required: m - 1,
        });
    }

    // eq. 43, keep a right-handed coordinate system (Kabsch)
    let mut s = DMatrix::<f64>::identity(m, m);
    if u.determinant() * v_t.determinant() < 0.0 {
        s[(m - 1, m - 1)] = -1.0;
    }

    // eq. 40
    let r = &u * &s * &v_t;
    let rotation = Array2::from_shape_fn((m, m), |(i, j)| r[(i, j)]);

    // eq. 42 and 41
    let scale = if with_scale {
        (DMatrix::from_diagonal(&d) * &s).trace() / sigma_x
    } else {
        1.0
    };
    let translation = &mean_y - &(rotation.dot(&mean_x) * scale);
    debug!(scale, rank, "alignment estimated");

    Ok(SimilarityTransform::new(rotation, translation, scale))
}

/// Root mean square distance between `transform` applied to `x` and `y`.
pub fn alignment_rmse<S1, S2>(
    transform: &SimilarityTransform,
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
) -> Result<f64, GeometryError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if x.dim() != y.dim() {
        return Err(GeometryError::ShapeMismatch {
            x: x.dim(),
            y: y.dim(),
        });
    }
    let n = x.ncols();
    if n == 0 {
        return Ok(0.0);
    }

    let aligned = transform.apply(x)?;
    let squared_error = (&aligned - y).mapv(|v| v * v).sum();
    Ok((squared_error / n as f64).sqrt())
}

fn zero_column_mask(y: ArrayView2<f64>) -> Vec<bool> {
    y.axis_iter(Axis(1))
        .map(|col| col.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())) < ZERO_COLUMN_TOLERANCE)
        .collect()
}

fn masked_mean(points: ArrayView2<f64>, zero_cols: &[bool], count: usize) -> Array1<f64> {
    let mut sum = Array1::<f64>::zeros(points.nrows());
    for (col, &masked) in points.axis_iter(Axis(1)).zip(zero_cols) {
        if !masked {
            sum += &col;
        }
    }
    sum / count as f64
}
