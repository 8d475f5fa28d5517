//! Validated layer classification and depth-aligned series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::soil::SoilCatalog;
use crate::error::ValidationError;

/// Wire key of the layer tops.
pub const KEY_DEPTH: &str = "depth";
/// Wire key of the layer thicknesses.
pub const KEY_THICKNESS: &str = "thickness";
/// Wire key of the soil codes.
pub const KEY_SOIL_NAME: &str = "geotechnicalSoilName";

/// A single cell of a classification record as delivered by collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RecordValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for RecordValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Raw classification record keyed by `depth`, `thickness`, `geotechnicalSoilName`.
pub type ClassificationRecord = BTreeMap<String, Vec<RecordValue>>;

/// Ordered layering of a column.
///
/// Invariants:
/// - `depth`, `thickness` and `soil_codes` have identical length (≥ 0).
/// - Every soil code is a member of the catalog used at construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    depth: Vec<f64>,
    thickness: Vec<f64>,
    soil_codes: Vec<String>,
}

/// One layer view: top and bottom level [m REF], thickness [m], soil code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer<'a> {
    pub top: f64,
    pub bottom: f64,
    pub thickness: f64,
    pub soil_code: &'a str,
}

impl Classification {
    pub fn new(
        depth: Vec<f64>,
        thickness: Vec<f64>,
        soil_codes: Vec<String>,
        catalog: &impl SoilCatalog,
    ) -> Result<Self, ValidationError> {
        if depth.len() != thickness.len() || depth.len() != soil_codes.len() {
            return Err(ValidationError::LengthMismatch {
                depth: depth.len(),
                thickness: thickness.len(),
                soil_codes: soil_codes.len(),
            });
        }
        if let Some(code) = soil_codes.iter().find(|c| !catalog.contains(c)) {
            return Err(ValidationError::UnknownSoilCode { code: code.clone() });
        }
        Ok(Self {
            depth,
            thickness,
            soil_codes,
        })
    }

    /// Validate a raw key/value record. No keys besides the three
    /// classification keys are permitted.
    pub fn from_record(
        record: &ClassificationRecord,
        catalog: &impl SoilCatalog,
    ) -> Result<Self, ValidationError> {
        if let Some(key) = record
            .keys()
            .find(|k| ![KEY_DEPTH, KEY_THICKNESS, KEY_SOIL_NAME].contains(&k.as_str()))
        {
            return Err(ValidationError::UnknownKey { key: key.clone() });
        }
        let depth = numbers(record, KEY_DEPTH)?;
        let thickness = numbers(record, KEY_THICKNESS)?;
        let soil_codes = texts(record, KEY_SOIL_NAME)?;
        Self::new(depth, thickness, soil_codes, catalog)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Layer tops [m REF].
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    /// Layer thicknesses [m].
    pub fn thickness(&self) -> &[f64] {
        &self.thickness
    }

    pub fn soil_codes(&self) -> &[String] {
        &self.soil_codes
    }

    /// Layers from top to bottom as stored.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> + '_ {
        self.depth
            .iter()
            .zip(&self.thickness)
            .zip(&self.soil_codes)
            .map(|((&top, &thickness), code)| Layer {
                top,
                bottom: top - thickness,
                thickness,
                soil_code: code,
            })
    }
}

fn field<'r>(
    record: &'r ClassificationRecord,
    key: &'static str,
) -> Result<&'r [RecordValue], ValidationError> {
    record
        .get(key)
        .map(Vec::as_slice)
        .ok_or(ValidationError::MissingKey { key })
}

fn numbers(record: &ClassificationRecord, key: &'static str) -> Result<Vec<f64>, ValidationError> {
    field(record, key)?
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            RecordValue::Number(x) => Ok(*x),
            RecordValue::Text(_) => Err(ValidationError::WrongType {
                key,
                index,
                expected: "number",
            }),
        })
        .collect()
}

fn texts(record: &ClassificationRecord, key: &'static str) -> Result<Vec<String>, ValidationError> {
    field(record, key)?
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            RecordValue::Text(s) => Ok(s.clone()),
            RecordValue::Number(_) => Err(ValidationError::WrongType {
                key,
                index,
                expected: "string",
            }),
        })
        .collect()
}

/// Named sensor series aligned index-for-index with a `depth` series.
///
/// Invariants:
/// - Contains a `depth` series.
/// - Every series has the same length as the owning column's classification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    values: BTreeMap<String, Vec<f64>>,
}

impl Series {
    pub(crate) fn new(
        values: BTreeMap<String, Vec<f64>>,
        expected: usize,
    ) -> Result<Self, ValidationError> {
        if !values.contains_key(KEY_DEPTH) {
            return Err(ValidationError::MissingSeriesDepth);
        }
        if let Some((name, v)) = values.iter().find(|(_, v)| v.len() != expected) {
            return Err(ValidationError::SeriesLength {
                name: name.clone(),
                len: v.len(),
                expected,
            });
        }
        Ok(Self { values })
    }

    /// The shared depth axis [m REF].
    pub fn depth(&self) -> &[f64] {
        self.values
            .get(KEY_DEPTH)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Names of the data series (excluding `depth`).
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| *k != KEY_DEPTH)
    }
}
