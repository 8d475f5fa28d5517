//! Tolerance defaults for planar predicates.

/// Slack (in coordinate units) applied to corridor membership so that points
/// exactly on the corridor boundary count as covered.
pub const COVER_EPS: f64 = 1e-9;

/// Consecutive path vertices closer than this are merged.
pub(crate) const VERTEX_MERGE_EPS: f64 = 1e-12;
