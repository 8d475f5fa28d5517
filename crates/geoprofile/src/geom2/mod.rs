//! Planar geometry for profile paths.
//!
//! Purpose
//! - Represent the user path as a `Polyline` over `Vector2<f64>` and answer
//!   the three geometric questions the section pipeline asks: is a point
//!   inside the buffered corridor, where does it land when projected onto a
//!   segment, and how far apart are two locations.
//!
//! Conventions
//! - Coordinates are planar Cartesian (e.g. RD New, UTM); no CRS handling.
//! - Corridors use flat end caps and round joins and are boundary-inclusive
//!   with slack `COVER_EPS`.
//!
//! Code cross-refs: `section::{select_in_corridor, reproject_onto}`.

mod cfg;
mod corridor;
mod metric;
mod polyline;

pub use cfg::COVER_EPS;
pub use corridor::Corridor;
pub use metric::{distance_matrix, nearest_index, polyline_length};
pub use polyline::{Polyline, Segment2};
