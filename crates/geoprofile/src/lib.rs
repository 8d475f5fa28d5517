//! Geological cross-sections from discrete boreholes and soundings.
//!
//! A `Section` takes validated `Column`s and a user path, keeps the columns
//! inside a buffered corridor around the path, optionally projects them onto
//! it, orders them (identity, nearest neighbor, or exact open-path TSP) and
//! lays them out as contiguous horizontal slots for an external renderer.
//!
//! Everything here is synchronous and pure; no I/O, no plotting.

pub mod column;
pub mod error;
pub mod geom2;
pub mod section;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{
    CapacityError, ConfigurationError, ProfileError, ProfileResult, SelectionError,
    ValidationError,
};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for callers that build a section end to end.
pub mod prelude {
    pub use crate::column::{Column, ColumnRecord, Nen8990, SoilCatalog};
    pub use crate::error::{ProfileError, ProfileResult};
    pub use crate::geom2::Polyline;
    pub use crate::section::{
        NullRenderer, ProfileLayout, ProfileRenderer, Section, SectionConfig, SortingMode,
    };
    pub use nalgebra::Vector2 as Vec2;
}
