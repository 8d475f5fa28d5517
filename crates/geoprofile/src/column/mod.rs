//! Column: one borehole or sounding location with its layer classification.
//!
//! Purpose
//! - Hold the validated per-location data that a cross-section is built from:
//!   planar coordinates, optional surface and groundwater level, an ordered
//!   layer classification and optional depth-aligned sensor series.
//!
//! Contract
//! - All validation happens at construction; a `Column` is immutable after.
//! - Invalid classification input (unequal lengths, unknown or missing key,
//!   unknown soil code, series length mismatch) yields `ValidationError` and
//!   constructs nothing.
//! - Coordinates are taken as given; no CRS checks.
//!
//! Code cross-refs: `soil::SoilCatalog`, `factory::{Sounding, BoreDescription}`.

mod factory;
pub mod soil;
mod types;

use std::collections::BTreeMap;

use nalgebra::Vector2;
use serde::Serialize;

use crate::error::ValidationError;

pub use factory::{strip_soil_qualifiers, BoreDescription, ClassifyResponse, ColumnRecord, Sounding};
pub use soil::{Nen8990, SoilCatalog, NEN_8990_CODES};
pub use types::{
    Classification, ClassificationRecord, Layer, RecordValue, Series, KEY_DEPTH, KEY_SOIL_NAME,
    KEY_THICKNESS,
};

/// Name used when a location carries no identifier.
pub const DEFAULT_NAME: &str = "N/A";

/// Validated location entity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Column {
    name: String,
    coordinates: Vector2<f64>,
    elevation: Option<f64>,
    groundwater_level: Option<f64>,
    classification: Classification,
    series: Option<Series>,
}

impl Column {
    /// Column with default name and no optional data.
    pub fn new(x: f64, y: f64, classification: Classification) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            coordinates: Vector2::new(x, y),
            elevation: None,
            groundwater_level: None,
            classification,
            series: None,
        }
    }

    /// Start a column with optional attributes; finish with
    /// [`ColumnBuilder::build`].
    pub fn builder(x: f64, y: f64) -> ColumnBuilder {
        ColumnBuilder {
            name: DEFAULT_NAME.to_string(),
            coordinates: Vector2::new(x, y),
            elevation: None,
            groundwater_level: None,
            series: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coordinates.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coordinates.y
    }

    #[inline]
    pub fn coordinates(&self) -> Vector2<f64> {
        self.coordinates
    }

    /// Surface level [m REF].
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Groundwater level [m REF].
    pub fn groundwater_level(&self) -> Option<f64> {
        self.groundwater_level
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }
}

/// Collects the optional attributes of a [`Column`] before validation.
#[derive(Clone, Debug)]
pub struct ColumnBuilder {
    name: String,
    coordinates: Vector2<f64>,
    elevation: Option<f64>,
    groundwater_level: Option<f64>,
    series: Option<BTreeMap<String, Vec<f64>>>,
}

impl ColumnBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn elevation(mut self, z: f64) -> Self {
        self.elevation = Some(z);
        self
    }

    pub fn groundwater_level(mut self, level: f64) -> Self {
        self.groundwater_level = Some(level);
        self
    }

    /// Depth-aligned series; must contain `depth` and match the
    /// classification's length (checked in `build`).
    pub fn series(mut self, series: BTreeMap<String, Vec<f64>>) -> Self {
        self.series = Some(series);
        self
    }

    pub fn build(self, classification: Classification) -> Result<Column, ValidationError> {
        let series = self
            .series
            .map(|s| Series::new(s, classification.len()))
            .transpose()?;
        Ok(Column {
            name: self.name,
            coordinates: self.coordinates,
            elevation: self.elevation,
            groundwater_level: self.groundwater_level,
            classification,
            series,
        })
    }

    /// Validate a raw classification record and build.
    pub fn build_from_record(
        self,
        record: &ClassificationRecord,
        catalog: &impl SoilCatalog,
    ) -> Result<Column, ValidationError> {
        let classification = Classification::from_record(record, catalog)?;
        self.build(classification)
    }
}
