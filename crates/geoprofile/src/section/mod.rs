//! Section: columns along a user path, ordered and laid out for a profile.
//!
//! Purpose
//! - Turn a column set and a polyline into what a profile renderer needs:
//!   the columns inside the corridor, their (optionally projected) positions,
//!   a travel order with its length, and per-column horizontal slots.
//!
//! Pipeline
//! - `select_in_corridor` → (`reproject_onto`) → `distance_matrix` →
//!   `sequence` → `assemble`. Each stage is a pure function; `Section` only
//!   caches results per construction.
//!
//! Contract
//! - Configuration is checked in `Section::new`; selection, capacity and
//!   ordering errors surface from the accessors that need them.
//! - Duplicate names or coordinates are reported as `SectionWarning`s and via
//!   `tracing::warn!`; they never change a result.
//! - Nothing here reorders the caller's columns. `with_start_column_first`
//!   builds a new, explicitly reordered section.
//!
//! Code cross-refs: `geom2::{Corridor, distance_matrix}`, `column::Column`.

mod layout;
mod render;
mod select;
mod sequence;
mod types;

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use nalgebra::{DMatrix, Vector2};
use serde::Serialize;

use crate::column::Column;
use crate::error::{ConfigurationError, ProfileError, ProfileResult};
use crate::geom2::{self, polyline_length, Corridor, Polyline};

pub use layout::{assemble, Placement, ProfileLayout};
pub use render::{drive, NullRenderer, ProfileRenderer};
pub use select::{effective_coordinates, reproject_onto, select_in_corridor};
pub use sequence::{
    exact_optimal_order, identity_order, nearest_neighbor_order, sequence, EXACT_CAPACITY,
};
pub use types::{SectionConfig, SectionWarning, Sequence, SortingMode};

/// Plain data behind a map view of the section.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapOverview {
    /// Every column position.
    pub all: Vec<Vector2<f64>>,
    /// Positions of the included columns.
    pub included: Vec<Vector2<f64>>,
    pub path: Vec<Vector2<f64>>,
    /// Effective positions in travel order.
    pub route: Vec<Vector2<f64>>,
    /// Raw position → projected position, per projected column.
    pub links: Vec<(Vector2<f64>, Vector2<f64>)>,
}

/// Columns plus path plus configuration, with lazily derived results.
#[derive(Debug)]
pub struct Section {
    columns: Vec<Column>,
    path: Polyline,
    cfg: SectionConfig,
    warnings: Vec<SectionWarning>,
    included: OnceCell<ProfileResult<Vec<usize>>>,
    projected: OnceCell<ProfileResult<BTreeMap<usize, Vector2<f64>>>>,
    sequence: OnceCell<ProfileResult<Sequence>>,
}

impl Section {
    pub fn new(
        columns: Vec<Column>,
        path: Polyline,
        cfg: SectionConfig,
    ) -> Result<Self, ConfigurationError> {
        cfg.validate()?;
        let warnings = duplicate_warnings(&columns);
        for w in &warnings {
            tracing::warn!("{w}");
        }
        Ok(Self {
            columns,
            path,
            cfg,
            warnings,
            included: OnceCell::new(),
            projected: OnceCell::new(),
            sequence: OnceCell::new(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn path(&self) -> &Polyline {
        &self.path
    }

    pub fn config(&self) -> &SectionConfig {
        &self.cfg
    }

    pub fn warnings(&self) -> &[SectionWarning] {
        &self.warnings
    }

    pub fn corridor(&self) -> Result<Corridor<'_>, ConfigurationError> {
        Corridor::around(&self.path, self.cfg.buffer_width)
    }

    fn all_coordinates(&self) -> Vec<Vector2<f64>> {
        self.columns.iter().map(Column::coordinates).collect()
    }

    /// Indices into `columns()` of the columns inside the corridor.
    pub fn included_indices(&self) -> ProfileResult<&[usize]> {
        self.included
            .get_or_init(|| {
                let corridor = self.corridor()?;
                let included = select_in_corridor(&self.all_coordinates(), &corridor)?;
                tracing::debug!(
                    included = included.len(),
                    total = self.columns.len(),
                    "corridor selection"
                );
                Ok(included)
            })
            .as_deref()
            .map_err(Clone::clone)
    }

    pub fn included(&self) -> ProfileResult<Vec<&Column>> {
        Ok(self
            .included_indices()?
            .iter()
            .map(|&i| &self.columns[i])
            .collect())
    }

    /// Raw positions of the included columns.
    pub fn included_coordinates(&self) -> ProfileResult<Vec<Vector2<f64>>> {
        Ok(self
            .included_indices()?
            .iter()
            .map(|&i| self.columns[i].coordinates())
            .collect())
    }

    /// Projection of each included column onto its first covering segment,
    /// keyed by included index. Computed whether or not `reproject` is set.
    pub fn projected(&self) -> ProfileResult<&BTreeMap<usize, Vector2<f64>>> {
        self.projected
            .get_or_init(|| {
                let points = self.included_coordinates()?;
                Ok(reproject_onto(&points, &self.path, self.cfg.buffer_width)?)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Positions used for ordering and layout: projected when `reproject`
    /// is set (raw where no projection exists), raw otherwise.
    pub fn effective_coordinates(&self) -> ProfileResult<Vec<Vector2<f64>>> {
        let raw = self.included_coordinates()?;
        if !self.cfg.reproject {
            return Ok(raw);
        }
        Ok(effective_coordinates(&raw, self.projected()?))
    }

    pub fn distance_matrix(&self) -> ProfileResult<DMatrix<f64>> {
        Ok(geom2::distance_matrix(&self.effective_coordinates()?))
    }

    /// Included column nearest to the first path vertex (raw positions).
    pub fn start_index(&self) -> ProfileResult<usize> {
        self.nearest_included(self.path.first())
    }

    /// Included column nearest to the last path vertex (raw positions).
    pub fn end_index(&self) -> ProfileResult<usize> {
        self.nearest_included(self.path.last())
    }

    fn nearest_included(&self, target: Vector2<f64>) -> ProfileResult<usize> {
        let points = self.included_coordinates()?;
        // Selection never yields an empty set.
        Ok(geom2::nearest_index(&points, target).unwrap_or(0))
    }

    /// Travel order over the included columns and its length.
    ///
    /// Nearest-neighbor lengths are measured over raw positions even when
    /// the walk used projected ones; the other policies report the length
    /// over the positions they ordered.
    pub fn sequence(&self) -> ProfileResult<&Sequence> {
        self.sequence
            .get_or_init(|| {
                let points = self.effective_coordinates()?;
                let dist = geom2::distance_matrix(&points);
                let start = self.start_index()?;
                let _span = tracing::debug_span!(
                    "sequence",
                    mode = %self.cfg.sorting_mode,
                    n = points.len()
                )
                .entered();
                let mut seq = sequence(self.cfg.sorting_mode, &dist, &points, start)?;
                if self.cfg.sorting_mode == SortingMode::NearestNeighbor && self.cfg.reproject {
                    // The walk runs on projected positions; its length is
                    // reported along the raw positions.
                    let raw = self.included_coordinates()?;
                    seq.total_length = polyline_length(seq.order.iter().map(|&i| raw[i]));
                }
                Ok(seq)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Per-column slots starting at offset `x0`.
    ///
    /// With `reproject` the outer anchors are the path endpoints; without it
    /// they are the first and last ordered columns themselves.
    pub fn layout(&self, x0: f64) -> ProfileResult<ProfileLayout> {
        let seq = self.sequence()?;
        let points = self.effective_coordinates()?;
        let included = self.included()?;
        let anchors = if self.cfg.reproject {
            (self.path.first(), self.path.last())
        } else {
            match (seq.order.first(), seq.order.last()) {
                (Some(&a), Some(&b)) => (points[a], points[b]),
                _ => (self.path.first(), self.path.last()),
            }
        };
        Ok(assemble(&seq.order, &included, &points, anchors, x0))
    }

    /// Lay out from `x0` and feed the result to `renderer`.
    pub fn render<R: ProfileRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        x0: f64,
    ) -> ProfileResult<ProfileLayout> {
        let layout = self.layout(x0)?;
        drive(renderer, &self.included()?, &layout);
        Ok(layout)
    }

    /// Map-view data; `links` stay empty unless `reproject` is set.
    pub fn map_overview(&self) -> ProfileResult<MapOverview> {
        let included = self.included_coordinates()?;
        let effective = self.effective_coordinates()?;
        let route = self
            .sequence()?
            .order
            .iter()
            .map(|&i| effective[i])
            .collect();
        let links = if self.cfg.reproject {
            self.projected()?
                .iter()
                .map(|(&i, &p)| (included[i], p))
                .collect()
        } else {
            Vec::new()
        };
        Ok(MapOverview {
            all: self.all_coordinates(),
            included,
            path: self.path.vertices().to_vec(),
            route,
            links,
        })
    }

    /// Same inputs with the column nearest to the path start moved to the
    /// front of `columns`. The search runs over every column, selected or
    /// not, so the included order can stay unchanged.
    pub fn with_start_column_first(&self) -> Result<Section, ProfileError> {
        let Some(start) = geom2::nearest_index(&self.all_coordinates(), self.path.first()) else {
            return Ok(Section::new(Vec::new(), self.path.clone(), self.cfg)?);
        };
        let mut columns = self.columns.clone();
        let column = columns.remove(start);
        columns.insert(0, column);
        Ok(Section::new(columns, self.path.clone(), self.cfg)?)
    }
}

/// Duplicate names and duplicate coordinates among `columns`, if any.
pub fn duplicate_warnings(columns: &[Column]) -> Vec<SectionWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    let names: BTreeSet<String> = columns
        .iter()
        .filter(|c| !seen.insert(c.name()))
        .map(|c| c.name().to_string())
        .collect();
    if !names.is_empty() {
        warnings.push(SectionWarning::DuplicateNames {
            names: names.into_iter().collect(),
        });
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut coordinates = Vec::new();
    for c in columns {
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        let key = ((c.x() + 0.0).to_bits(), (c.y() + 0.0).to_bits());
        if !seen.insert(key) && reported.insert(key) {
            coordinates.push((c.x(), c.y()));
        }
    }
    if !coordinates.is_empty() {
        warnings.push(SectionWarning::DuplicateCoordinates { coordinates });
    }
    warnings
}
