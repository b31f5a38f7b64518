//! Seeded synthetic point sets for tests and benchmarks
//!
//! Generates Gaussian point clouds, uniformly distributed proper rotations and
//! registered point-set pairs related by a known similarity transform.

use crate::geometry::SimilarityTransform;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `dim × count` matrix of points drawn from `N(0, spread²)`.
pub fn random_points<R: Rng + ?Sized>(rng: &mut R, dim: usize, count: usize, spread: f64) -> Array2<f64> {
    Array2::from_shape_simple_fn((dim, count), || gaussian(rng) * spread)
}

/// Random proper rotation in `dim` dimensions (orthogonal, determinant +1).
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R, dim: usize) -> Array2<f64> {
    let sample = DMatrix::<f64>::from_fn(dim, dim, |_, _| gaussian(rng));
    let qr = sample.qr();
    let mut q = qr.q();
    let r = qr.r();

    // fix the column signs so the distribution is uniform over O(m)
    for (j, mut col) in q.column_iter_mut().enumerate() {
        if r[(j, j)] < 0.0 {
            col.neg_mut();
        }
    }
    if dim > 0 && q.determinant() < 0.0 {
        q.column_mut(0).neg_mut();
    }

    Array2::from_shape_fn((dim, dim), |(i, j)| q[(i, j)])
}

/// Random similarity transform; the scale is drawn from `[0.5, 2.0)` when
/// `with_scale` is set, otherwise it is `1.0`.
pub fn random_similarity<R: Rng + ?Sized>(rng: &mut R, dim: usize, with_scale: bool) -> SimilarityTransform {
    let rotation = random_rotation(rng, dim);
    let translation = Array1::from_shape_simple_fn(dim, || gaussian(rng) * 10.0);
    let scale = if with_scale { rng.gen_range(0.5..2.0) } else { 1.0 };
    SimilarityTransform::new(rotation, translation, scale)
}

/// Registered pair `(x, y)` with `y = c * R * x + t` for the returned ground truth.
pub fn similarity_pair<R: Rng + ?Sized>(
    rng: &mut R,
    dim: usize,
    count: usize,
    with_scale: bool,
) -> (Array2<f64>, Array2<f64>, SimilarityTransform) {
    let truth = random_similarity(rng, dim, with_scale);
    let x = random_points(rng, dim, count, 5.0);
    let y = truth.transform_points(&x);
    (x, y, truth)
}

/// Copy of `points` with i.i.d. Gaussian noise of standard deviation `sigma`.
pub fn add_noise<R: Rng + ?Sized>(rng: &mut R, points: &Array2<f64>, sigma: f64) -> Array2<f64> {
    points.mapv(|v| v + gaussian(rng) * sigma)
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(StandardNormal)
}
