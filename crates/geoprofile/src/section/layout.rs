//! Horizontal placement of ordered columns along the profile.
//!
//! The ordered coordinates are bracketed by a start and an end anchor. Each
//! column owns half the gap to its predecessor (`d_left`) and half the gap to
//! its successor (`d_right`); slots are laid out contiguously from `x0`.

use nalgebra::Vector2;
use serde::Serialize;

use crate::column::Column;

/// Slot of one column in the profile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    /// Index into the included columns.
    pub column: usize,
    pub name: String,
    /// Horizontal position of the column axis.
    pub center: f64,
    pub d_left: f64,
    pub d_right: f64,
    pub groundwater_level: Option<f64>,
    pub surface_level: Option<f64>,
}

impl Placement {
    /// Left edge of the slot.
    #[inline]
    pub fn left(&self) -> f64 {
        self.center - self.d_left
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.center + self.d_right
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.d_left + self.d_right
    }
}

/// Columns in traversal order with their slots.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileLayout {
    pub placements: Vec<Placement>,
    /// Offset of the first slot's left edge.
    pub x0: f64,
    /// Sum of all slot widths: the length of the anchored traversal.
    pub width: f64,
}

impl ProfileLayout {
    /// `(center, level)` for every column with a groundwater level.
    pub fn groundwater_trace(&self) -> Vec<(f64, f64)> {
        self.trace(|p| p.groundwater_level)
    }

    /// `(center, level)` for every column with a surface level.
    pub fn surface_trace(&self) -> Vec<(f64, f64)> {
        self.trace(|p| p.surface_level)
    }

    fn trace(&self, level: impl Fn(&Placement) -> Option<f64>) -> Vec<(f64, f64)> {
        self.placements
            .iter()
            .filter_map(|p| level(p).map(|z| (p.center, z)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Lay out `order` over `columns`, using `points[i]` as the position of
/// `columns[i]`.
pub fn assemble(
    order: &[usize],
    columns: &[&Column],
    points: &[Vector2<f64>],
    anchors: (Vector2<f64>, Vector2<f64>),
    x0: f64,
) -> ProfileLayout {
    let mut chain = Vec::with_capacity(order.len() + 2);
    chain.push(anchors.0);
    chain.extend(order.iter().map(|&i| points[i]));
    chain.push(anchors.1);

    let mut offset = x0;
    let placements = order
        .iter()
        .enumerate()
        .map(|(k, &i)| {
            let here = chain[k + 1];
            let d_left = (here - chain[k]).norm() / 2.0;
            let d_right = (chain[k + 2] - here).norm() / 2.0;
            let column = columns[i];
            let placement = Placement {
                column: i,
                name: column.name().to_string(),
                center: offset + d_left,
                d_left,
                d_right,
                groundwater_level: column.groundwater_level(),
                surface_level: column.elevation(),
            };
            offset += d_left + d_right;
            placement
        })
        .collect();
    ProfileLayout {
        placements,
        x0,
        width: offset - x0,
    }
}
