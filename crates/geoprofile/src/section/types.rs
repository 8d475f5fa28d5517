//! Configuration and result types of the section pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Ordering policy over the included columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingMode {
    /// Minimum-length open path from the start column (Held–Karp).
    #[serde(alias = "tsp")]
    ExactOptimal,
    /// Greedy nearest-neighbor walk from the start column.
    #[default]
    NearestNeighbor,
    /// Keep the caller's order.
    #[serde(alias = "custom")]
    Identity,
}

impl SortingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactOptimal => "exact_optimal",
            Self::NearestNeighbor => "nearest_neighbor",
            Self::Identity => "identity",
        }
    }
}

impl fmt::Display for SortingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortingMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exact_optimal" | "tsp" => Ok(Self::ExactOptimal),
            "nearest_neighbor" => Ok(Self::NearestNeighbor),
            "identity" | "custom" => Ok(Self::Identity),
            _ => Err(ConfigurationError::SortingMode(s.to_string())),
        }
    }
}

/// Section parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Corridor half-width around the path [m]. Must be > 0.
    pub buffer_width: f64,
    pub sorting_mode: SortingMode,
    /// Order and lay out columns by their projection onto the path.
    pub reproject: bool,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            buffer_width: 10.0,
            sorting_mode: SortingMode::NearestNeighbor,
            reproject: true,
        }
    }
}

impl SectionConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.buffer_width.is_finite() && self.buffer_width > 0.0) {
            return Err(ConfigurationError::BufferWidth(self.buffer_width));
        }
        Ok(())
    }
}

/// Non-fatal findings about the column set. They never change results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SectionWarning {
    DuplicateNames { names: Vec<String> },
    DuplicateCoordinates { coordinates: Vec<(f64, f64)> },
}

impl fmt::Display for SectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNames { names } => {
                write!(f, "column names are not unique: {}", names.join(", "))
            }
            Self::DuplicateCoordinates { coordinates } => {
                write!(f, "column coordinates are not unique: {coordinates:?}")
            }
        }
    }
}

/// Visiting order over the included columns and the length it travels.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Sequence {
    /// Permutation of included-column indices.
    pub order: Vec<usize>,
    pub total_length: f64,
}
