//! Error kinds raised by column construction and section evaluation.
//!
//! Every error is returned at the point of detection and propagates
//! unmodified; nothing is retried and no partial result is produced.
//! `ProfileError` gathers the four kinds for callers that drive a whole
//! section end to end.

use thiserror::Error;

/// Result alias for whole-section operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Malformed column input. Nothing is constructed when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A classification key outside `depth`, `thickness`, `geotechnicalSoilName`.
    #[error("unknown classification key `{key}`")]
    UnknownKey { key: String },

    #[error("classification key `{key}` is missing")]
    MissingKey { key: &'static str },

    #[error(
        "classification sequences differ in length \
         (depth {depth}, thickness {thickness}, soil codes {soil_codes})"
    )]
    LengthMismatch {
        depth: usize,
        thickness: usize,
        soil_codes: usize,
    },

    /// A record value has the wrong JSON type for its key.
    #[error("value {index} of `{key}` must be a {expected}")]
    WrongType {
        key: &'static str,
        index: usize,
        expected: &'static str,
    },

    #[error("soil code `{code}` is not in the soil catalog (NEN-EN-ISO 14688-1 + NEN 8990, table NA.17)")]
    UnknownSoilCode { code: String },

    #[error("series data must contain a `depth` series")]
    MissingSeriesDepth,

    #[error("series `{name}` has {len} values, the classification has {expected}")]
    SeriesLength {
        name: String,
        len: usize,
        expected: usize,
    },
}

/// Invalid section parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("buffer width must be positive and finite, got {0}")]
    BufferWidth(f64),

    #[error("path needs at least two distinct vertices, got {0}")]
    PathTooShort(usize),

    #[error("path vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    #[error("unknown sorting mode `{0}` (expected exact_optimal, nearest_neighbor or identity)")]
    SortingMode(String),
}

/// The corridor around the path covers none of the columns.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("no points within corridor; widen buffer or adjust path ({candidates} columns, buffer width {buffer_width})")]
pub struct SelectionError {
    pub candidates: usize,
    pub buffer_width: f64,
}

/// Exact ordering refused because the input exceeds its size ceiling.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("exact ordering supports at most {limit} columns, got {count}; choose a heuristic sorting mode")]
pub struct CapacityError {
    pub count: usize,
    pub limit: usize,
}

/// Any failure of a section pipeline stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
