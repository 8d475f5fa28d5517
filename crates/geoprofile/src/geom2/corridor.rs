//! Buffered corridor around a path (flat end caps, round joins).
//!
//! Model
//! - Each segment contributes the rectangle swept by its perpendicular of
//!   half-width `w` (flat caps: nothing beyond either endpoint).
//! - Each interior vertex contributes the round join: the sector of the disk
//!   of radius `w` lying past the end of the incoming segment and before the
//!   start of the outgoing one.
//! - A point is covered iff some rectangle or join contains it, with slack
//!   `COVER_EPS` on every boundary.

use nalgebra::Vector2;

use super::cfg::COVER_EPS;
use super::polyline::{Polyline, Segment2};
use crate::error::ConfigurationError;

/// Corridor of half-width `half_width` around a run of path vertices.
#[derive(Clone, Copy, Debug)]
pub struct Corridor<'a> {
    vertices: &'a [Vector2<f64>],
    half_width: f64,
}

impl<'a> Corridor<'a> {
    /// Corridor around the whole path.
    pub fn around(path: &'a Polyline, half_width: f64) -> Result<Self, ConfigurationError> {
        Self::from_vertices(path.vertices(), half_width)
    }

    /// Corridor around segment `index` of the path alone.
    /// `index` must be below `path.segment_count()`.
    pub(crate) fn around_segment(
        path: &'a Polyline,
        index: usize,
        half_width: f64,
    ) -> Result<Self, ConfigurationError> {
        Self::from_vertices(&path.vertices()[index..index + 2], half_width)
    }

    fn from_vertices(
        vertices: &'a [Vector2<f64>],
        half_width: f64,
    ) -> Result<Self, ConfigurationError> {
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(ConfigurationError::BufferWidth(half_width));
        }
        Ok(Self {
            vertices,
            half_width,
        })
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Boundary-inclusive coverage test.
    pub fn covers(&self, p: Vector2<f64>) -> bool {
        self.segments().any(|s| self.rectangle_covers(&s, p)) || self.joins_cover(p)
    }

    fn segments(&self) -> impl Iterator<Item = Segment2> + 'a {
        self.vertices.windows(2).map(|w| Segment2::new(w[0], w[1]))
    }

    fn rectangle_covers(&self, s: &Segment2, p: Vector2<f64>) -> bool {
        match s.frame(p) {
            Some((along, across)) => {
                along >= -COVER_EPS
                    && along <= s.length() + COVER_EPS
                    && across <= self.half_width + COVER_EPS
            }
            None => false,
        }
    }

    fn joins_cover(&self, p: Vector2<f64>) -> bool {
        self.vertices.windows(3).any(|w| {
            let v = w[1];
            let rel = p - v;
            rel.norm() <= self.half_width + COVER_EPS
                && rel.dot(&(w[1] - w[0])) >= 0.0
                && rel.dot(&(w[2] - w[1])) <= 0.0
        })
    }
}
