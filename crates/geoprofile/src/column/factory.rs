//! Columns from upstream records: classification-service output for cone
//! penetration tests, bore descriptions, and plain JSON column records.
//!
//! Conventions follow the upstream services: camelCase keys, levels in
//! [m REF], boundaries as depths below the reference offset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::soil::SoilCatalog;
use super::types::{Classification, ClassificationRecord, KEY_DEPTH};
use super::{Column, DEFAULT_NAME};
use crate::error::ValidationError;

/// Series key the sounding uses for depth relative to the reference level.
const KEY_DEPTH_OFFSET: &str = "depthOffset";

/// Layer boundaries returned by the classification service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    /// Layer tops below the vertical reference offset [m].
    pub upper_boundary: Vec<f64>,
    /// Layer bottoms below the vertical reference offset [m].
    pub lower_boundary: Vec<f64>,
    /// Soil codes, possibly carrying `;`-suffixes and `*` markers.
    #[serde(default)]
    pub geotechnical_soil_name: Vec<String>,
}

/// Cone penetration test metadata and measured series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sounding {
    pub x: f64,
    pub y: f64,
    /// Surface level [m REF].
    pub vertical_position_offset: f64,
    #[serde(default)]
    pub groundwater_level_offset: Option<f64>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub bro_id: Option<String>,
    /// Measured series keyed by name; `depthOffset` is the depth axis.
    #[serde(default)]
    pub data: BTreeMap<String, Vec<f64>>,
}

/// Layered bore description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoreDescription {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vertical_position_offset: Option<f64>,
    #[serde(default)]
    pub groundwater_level: Option<f64>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub bro_id: Option<String>,
    /// Layer tops [m REF].
    pub upper_boundary_offset: Vec<f64>,
    pub upper_boundary: Vec<f64>,
    pub lower_boundary: Vec<f64>,
    pub geotechnical_soil_name: Vec<String>,
}

/// Plain JSON column record as produced by acquisition pipelines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub groundwater_level: Option<f64>,
    pub classify: ClassificationRecord,
    #[serde(default)]
    pub data: Option<BTreeMap<String, Vec<f64>>>,
}

impl ColumnRecord {
    pub fn into_column(self, catalog: &impl SoilCatalog) -> Result<Column, ValidationError> {
        let mut builder = Column::builder(self.x, self.y);
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(z) = self.z {
            builder = builder.elevation(z);
        }
        if let Some(level) = self.groundwater_level {
            builder = builder.groundwater_level(level);
        }
        if let Some(data) = self.data {
            builder = builder.series(data);
        }
        builder.build_from_record(&self.classify, catalog)
    }
}

/// Drop qualifier markers from a service soil code: everything from the first
/// `;` on, and every `*`.
pub fn strip_soil_qualifiers(raw: &str) -> String {
    raw.split(';').next().unwrap_or_default().replace('*', "")
}

fn display_name(bro_id: &Option<String>, alias: &Option<String>) -> String {
    bro_id
        .as_ref()
        .or(alias.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

fn thicknesses(upper: &[f64], lower: &[f64], codes: usize) -> Result<Vec<f64>, ValidationError> {
    if upper.len() != lower.len() {
        return Err(ValidationError::LengthMismatch {
            depth: upper.len(),
            thickness: lower.len(),
            soil_codes: codes,
        });
    }
    Ok(lower.iter().zip(upper).map(|(lo, up)| lo - up).collect())
}

impl Column {
    /// Column from a classification-service response and its sounding.
    ///
    /// - layer top = surface level − upper boundary
    /// - thickness = lower boundary − upper boundary
    /// - soil codes lose `;`-suffixes and `*` markers
    /// - the `depthOffset` series becomes the `depth` series
    ///
    /// Series must have one value per layer, like any column series. A raw
    /// sounding carries one row per measured depth, so its `data` must be
    /// resampled to the layers (or left empty) first; otherwise this returns
    /// `ValidationError::SeriesLength`.
    pub fn from_cpt(
        response: &ClassifyResponse,
        cpt: &Sounding,
        catalog: &impl SoilCatalog,
    ) -> Result<Column, ValidationError> {
        let depth = response
            .upper_boundary
            .iter()
            .map(|up| cpt.vertical_position_offset - up)
            .collect();
        let thickness = thicknesses(
            &response.upper_boundary,
            &response.lower_boundary,
            response.geotechnical_soil_name.len(),
        )?;
        let codes = response
            .geotechnical_soil_name
            .iter()
            .map(|s| strip_soil_qualifiers(s))
            .collect();
        let classification = Classification::new(depth, thickness, codes, catalog)?;

        let mut series = cpt.data.clone();
        if let Some(offset) = series.remove(KEY_DEPTH_OFFSET) {
            series.insert(KEY_DEPTH.to_string(), offset);
        }

        let mut builder = Column::builder(cpt.x, cpt.y)
            .name(display_name(&cpt.bro_id, &cpt.alias))
            .elevation(cpt.vertical_position_offset);
        if let Some(level) = cpt.groundwater_level_offset {
            builder = builder.groundwater_level(level);
        }
        if !series.is_empty() {
            builder = builder.series(series);
        }
        builder.build(classification)
    }

    /// Column from a bore description; no series are attached.
    pub fn from_bore(
        bore: &BoreDescription,
        catalog: &impl SoilCatalog,
    ) -> Result<Column, ValidationError> {
        let thickness = thicknesses(
            &bore.upper_boundary,
            &bore.lower_boundary,
            bore.geotechnical_soil_name.len(),
        )?;
        let classification = Classification::new(
            bore.upper_boundary_offset.clone(),
            thickness,
            bore.geotechnical_soil_name.clone(),
            catalog,
        )?;
        let mut builder =
            Column::builder(bore.x, bore.y).name(display_name(&bore.bro_id, &bore.alias));
        if let Some(z) = bore.vertical_position_offset {
            builder = builder.elevation(z);
        }
        if let Some(level) = bore.groundwater_level {
            builder = builder.groundwater_level(level);
        }
        builder.build(classification)
    }
}
