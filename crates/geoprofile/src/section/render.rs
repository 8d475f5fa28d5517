//! Renderer capability seam.
//!
//! Plotting backends live outside this crate. A backend implements
//! `ProfileRenderer`; `NullRenderer` stands in when none is available.

use super::layout::{Placement, ProfileLayout};
use crate::column::Column;

/// Receives the assembled profile, one column at a time, then the traces.
pub trait ProfileRenderer {
    /// Whether the backend can draw at all. Unavailable renderers are skipped.
    fn is_available(&self) -> bool {
        true
    }

    fn column(&mut self, column: &Column, placement: &Placement);

    fn groundwater_trace(&mut self, _trace: &[(f64, f64)]) {}

    fn surface_trace(&mut self, _trace: &[(f64, f64)]) {}
}

/// No backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl ProfileRenderer for NullRenderer {
    fn is_available(&self) -> bool {
        false
    }

    fn column(&mut self, _column: &Column, _placement: &Placement) {}
}

/// Feed `layout` to `renderer`. Returns whether anything was drawn.
pub fn drive<R: ProfileRenderer + ?Sized>(
    renderer: &mut R,
    columns: &[&Column],
    layout: &ProfileLayout,
) -> bool {
    if !renderer.is_available() {
        tracing::debug!("renderer unavailable; skipping");
        return false;
    }
    for placement in &layout.placements {
        renderer.column(columns[placement.column], placement);
    }
    renderer.groundwater_trace(&layout.groundwater_trace());
    renderer.surface_trace(&layout.surface_trace());
    true
}
