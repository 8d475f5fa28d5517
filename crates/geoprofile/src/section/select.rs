//! Corridor selection and reprojection onto path segments.

use std::collections::BTreeMap;

use nalgebra::Vector2;

use crate::error::{ConfigurationError, SelectionError};
use crate::geom2::{Corridor, Polyline};

/// Indices of the points covered by `corridor`, in their original relative
/// order.
///
/// Monotone in the corridor width. An empty result is a `SelectionError`.
pub fn select_in_corridor(
    points: &[Vector2<f64>],
    corridor: &Corridor<'_>,
) -> Result<Vec<usize>, SelectionError> {
    let included: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| corridor.covers(**p))
        .map(|(i, _)| i)
        .collect();
    if included.is_empty() {
        return Err(SelectionError {
            candidates: points.len(),
            buffer_width: corridor.half_width(),
        });
    }
    Ok(included)
}

/// Projection of each point onto the first path segment (in path order) whose
/// own corridor covers it.
///
/// - The projection is onto the infinite line through the segment endpoints.
/// - Ties between adjacent segments resolve to the earlier segment.
/// - Points covered by no single-segment corridor (possible at joins) are
///   absent; callers fall back to the raw coordinate.
pub fn reproject_onto(
    points: &[Vector2<f64>],
    path: &Polyline,
    buffer_width: f64,
) -> Result<BTreeMap<usize, Vector2<f64>>, ConfigurationError> {
    let mut projected = BTreeMap::new();
    for (k, segment) in path.segments().enumerate() {
        let corridor = Corridor::around_segment(path, k, buffer_width)?;
        for (i, p) in points.iter().enumerate() {
            if projected.contains_key(&i) || !corridor.covers(*p) {
                continue;
            }
            projected.insert(i, segment.project_onto_line(*p));
        }
    }
    Ok(projected)
}

/// Projected coordinate where available, raw coordinate otherwise.
pub fn effective_coordinates(
    points: &[Vector2<f64>],
    projected: &BTreeMap<usize, Vector2<f64>>,
) -> Vec<Vector2<f64>> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| projected.get(&i).copied().unwrap_or(*p))
        .collect()
}
