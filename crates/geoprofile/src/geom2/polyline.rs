//! Path polyline and its segments.

use nalgebra::Vector2;
use serde::Serialize;

use super::cfg::VERTEX_MERGE_EPS;
use crate::error::ConfigurationError;

/// Directed segment `a → b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2 {
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
}

impl Segment2 {
    #[inline]
    pub fn new(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Signed distance of the orthogonal foot of `p` from `a`, measured along
    /// the segment, and the unsigned distance of `p` from the carrier line.
    ///
    /// Returns `None` for a zero-length segment.
    pub fn frame(&self, p: Vector2<f64>) -> Option<(f64, f64)> {
        let d = self.direction();
        let len = d.norm();
        if len <= VERTEX_MERGE_EPS {
            return None;
        }
        let ap = p - self.a;
        let along = ap.dot(&d) / len;
        let across = (d.x * ap.y - d.y * ap.x).abs() / len;
        Some((along, across))
    }

    /// Orthogonal projection of `p` onto the infinite line through `a` and `b`
    /// (not clamped to the segment). A zero-length segment projects onto `a`.
    pub fn project_onto_line(&self, p: Vector2<f64>) -> Vector2<f64> {
        let d = self.direction();
        let len2 = d.norm_squared();
        if len2 <= VERTEX_MERGE_EPS * VERTEX_MERGE_EPS {
            return self.a;
        }
        self.a + d * ((p - self.a).dot(&d) / len2)
    }
}

/// Ordered path with at least two distinct vertices.
///
/// Invariants:
/// - All vertices are finite.
/// - Consecutive duplicates are merged, so every segment has positive length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polyline {
    vertices: Vec<Vector2<f64>>,
}

impl Polyline {
    pub fn new(vertices: Vec<Vector2<f64>>) -> Result<Self, ConfigurationError> {
        if let Some(index) = vertices
            .iter()
            .position(|v| !(v.x.is_finite() && v.y.is_finite()))
        {
            return Err(ConfigurationError::NonFiniteVertex { index });
        }
        let mut merged: Vec<Vector2<f64>> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if merged
                .last()
                .is_some_and(|last| (last - v).norm() <= VERTEX_MERGE_EPS)
            {
                continue;
            }
            merged.push(v);
        }
        if merged.len() < 2 {
            return Err(ConfigurationError::PathTooShort(merged.len()));
        }
        Ok(Self { vertices: merged })
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self, ConfigurationError> {
        Self::new(coords.iter().map(|&(x, y)| Vector2::new(x, y)).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn first(&self) -> Vector2<f64> {
        self.vertices[0]
    }

    #[inline]
    pub fn last(&self) -> Vector2<f64> {
        self.vertices[self.vertices.len() - 1]
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Segments in path order.
    pub fn segments(&self) -> impl Iterator<Item = Segment2> + '_ {
        self.vertices.windows(2).map(|w| Segment2::new(w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }
}
