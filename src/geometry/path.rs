use ndarray::{Array1, ArrayBase, Data, Ix2};

/// Discrete arc length of an `n × m` point sequence (one point per row).
pub fn arc_len<S>(x: &ArrayBase<S, Ix2>) -> f64
where
    S: Data<Elem = f64>,
{
    segment_lengths(x).sum()
}

/// Running distance along an `n × m` point sequence, starting at `0`.
///
/// The last entry equals [`arc_len`] of the same sequence.
pub fn accumulated_distances<S>(x: &ArrayBase<S, Ix2>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let segments = segment_lengths(x);
    let mut accumulated = Array1::zeros(segments.len() + 1);
    let mut total = 0.0;
    for (slot, length) in accumulated.iter_mut().skip(1).zip(segments.iter()) {
        total += length;
        *slot = total;
    }
    accumulated
}

fn segment_lengths<S>(x: &ArrayBase<S, Ix2>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    x.outer_iter()
        .zip(x.outer_iter().skip(1))
        .map(|(a, b)| (&a - &b).mapv(|v| v * v).sum().sqrt())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_l_shaped_path() {
        let x = array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        assert_eq!(arc_len(&x), 2.0);
        assert_eq!(accumulated_distances(&x), array![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_single_point() {
        let x = array![[3.0, -4.0, 5.0]];
        assert_eq!(arc_len(&x), 0.0);
        assert_eq!(accumulated_distances(&x), array![0.0]);
    }

    #[test]
    fn test_empty_sequence() {
        let x = Array2::<f64>::zeros((0, 3));
        assert_eq!(arc_len(&x), 0.0);
        assert_eq!(accumulated_distances(&x), array![0.0]);
    }

    #[test]
    fn test_segments_are_euclidean() {
        let x = array![[0.0, 0.0, 0.0], [3.0, 4.0, 0.0], [3.0, 4.0, 12.0]];
        assert_eq!(segment_lengths(&x), array![5.0, 12.0]);
    }
}
