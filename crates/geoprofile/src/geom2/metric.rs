//! Distances over coordinate sets.

use nalgebra::{DMatrix, Vector2};

/// Symmetric matrix of pairwise Euclidean distances with a zero diagonal.
///
/// Works on raw or projected coordinates alike; row/column `i` is `points[i]`.
pub fn distance_matrix(points: &[Vector2<f64>]) -> DMatrix<f64> {
    let n = points.len();
    let mut d = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let dij = (points[i] - points[j]).norm();
            d[(i, j)] = dij;
            d[(j, i)] = dij;
        }
    }
    d
}

/// Index of the point nearest to `target`; ties resolve to the first occurrence.
pub fn nearest_index(points: &[Vector2<f64>], target: Vector2<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = (p - target).norm();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Length of the polyline visiting `points` in iteration order.
pub fn polyline_length<I>(points: I) -> f64
where
    I: IntoIterator<Item = Vector2<f64>>,
{
    let mut it = points.into_iter();
    let Some(mut prev) = it.next() else {
        return 0.0;
    };
    let mut total = 0.0;
    for p in it {
        total += (p - prev).norm();
        prev = p;
    }
    total
}
