use super::GeometryError;
use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix2};
use serde::{Deserialize, Serialize};

/// A Sim(m) transform `p -> scale * rotation * p + translation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityTransform {
    pub rotation: Array2<f64>,
    pub translation: Array1<f64>,
    pub scale: f64,
}

impl SimilarityTransform {
    pub fn new(rotation: Array2<f64>, translation: Array1<f64>, scale: f64) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    pub fn identity(dim: usize) -> Self {
        Self::new(Array2::eye(dim), Array1::zeros(dim), 1.0)
    }

    pub fn dim(&self) -> usize {
        self.translation.len()
    }

    /// Map an `m × n` point set (one point per column).
    pub fn apply<S>(&self, points: &ArrayBase<S, Ix2>) -> Result<Array2<f64>, GeometryError>
    where
        S: Data<Elem = f64>,
    {
        if points.nrows() != self.dim() {
            return Err(GeometryError::DimensionMismatch {
                expected: self.dim(),
                got: points.nrows(),
            });
        }
        Ok(self.transform_points(points))
    }

    pub(crate) fn transform_points<S>(&self, points: &ArrayBase<S, Ix2>) -> Array2<f64>
    where
        S: Data<Elem = f64>,
    {
        let mut mapped = self.rotation.dot(points) * self.scale;
        for mut col in mapped.axis_iter_mut(Axis(1)) {
            col += &self.translation;
        }
        mapped
    }

    /// `(m+1) × (m+1)` matrix `[[scale * rotation, translation], [0, 1]]`.
    pub fn to_homogeneous(&self) -> Array2<f64> {
        let m = self.dim();
        let mut h = Array2::eye(m + 1);
        h.slice_mut(s![..m, ..m]).assign(&(&self.rotation * self.scale));
        h.slice_mut(s![..m, m]).assign(&self.translation);
        h
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.t().to_owned();
        let scale = 1.0 / self.scale;
        let translation = rotation.dot(&self.translation) * -scale;
        Self::new(rotation, translation, scale)
    }

    /// Split into the `(r, t, c)` triple.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>, f64) {
        (self.rotation, self.translation, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn quarter_turn() -> SimilarityTransform {
        SimilarityTransform::new(array![[0.0, -1.0], [1.0, 0.0]], array![1.0, 2.0], 2.0)
    }

    #[test]
    fn test_identity_leaves_points() {
        let points = array![[1.0, -2.0, 3.5], [0.0, 4.0, -1.0], [7.0, 8.0, 9.0]];
        let mapped = SimilarityTransform::identity(3).apply(&points).unwrap();
        assert_eq!(mapped, points);
    }

    #[test]
    fn test_apply_scale_rotate_translate() {
        let points = array![[1.0, 0.0], [0.0, 1.0]];
        let mapped = quarter_turn().apply(&points).unwrap();
        assert_abs_diff_eq!(mapped, array![[1.0, -1.0], [4.0, 2.0]], epsilon = 1e-12);
    }

    #[test]
    fn test_apply_dimension_mismatch() {
        let points = Array2::<f64>::zeros((3, 4));
        assert_eq!(
            quarter_turn().apply(&points),
            Err(GeometryError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_homogeneous_layout() {
        let h = quarter_turn().to_homogeneous();
        assert_abs_diff_eq!(
            h,
            array![[0.0, -2.0, 1.0], [2.0, 0.0, 2.0], [0.0, 0.0, 1.0]],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_inverse_round_trips_points() {
        let transform = quarter_turn();
        let points = array![[0.3, -1.2, 5.0], [2.0, 0.0, -4.5]];
        let mapped = transform.apply(&points).unwrap();
        let restored = transform.inverse().apply(&mapped).unwrap();
        assert_abs_diff_eq!(restored, points, epsilon = 1e-12);
    }

    #[test]
    fn test_serde_json() {
        let transform = quarter_turn();
        let json = serde_json::to_string(&transform).unwrap();
        let parsed: SimilarityTransform = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, transform);
    }
}
