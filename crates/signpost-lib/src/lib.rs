//! Signpost Library - Off-Screen Point Counting per Compass Sector
//!
//! This library partitions the space outside a map viewport into eight polygonal
//! regions, one per secondary intercardinal direction, and counts how many points of
//! a dataset fall in each of them. A map front-end uses the counts to show directional
//! indicators ("12 points to the north-north-east") that update as the user pans and zooms.
//!
//! # Architecture
//!
//! - **[`Extent`]**: Axis-aligned geographic rectangle (dataset bounds and viewport)
//! - **[`Sector`]** / **[`SectorMap`]**: The eight directions and a dense per-direction mapping
//! - **[`build_regions`]**: Builds the eight exterior regions from the two extents
//! - **[`count_by_sector`]**: Point-in-polygon counting into per-sector totals
//! - **[`SignpostEngine`]**: Recomputes regions and counts on every viewport change
//!
//! # Coordinates
//!
//! Points are `geo::Point<f64>` with `x` holding the longitude and `y` the latitude.
//! Viewports crossing the antimeridian are not supported.
//!
//! # Performance Characteristics
//!
//! - **Region build**: O(1), eight fixed-shape polygons rebuilt on every viewport change
//! - **Counting**: O(N) in the number of points, parallel above [`Config::parallel_threshold`]

mod counter;
mod engine;
mod extent;
mod notifier;
mod region;
mod sector;

// Public API exports
pub use counter::{BoundaryRule, Indicator, count_by_sector, count_by_sector_with, indicators};
pub use engine::{Config, EngineState, IndicatorSink, PointSource, SignpostEngine};
pub use extent::Extent;
pub use notifier::{CancelToken, ViewportNotifier};
pub use region::{Region, build_regions};
pub use sector::{Sector, SectorMap};

/// Error types for the signpost library
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignpostError {
    #[error("Malformed extent: north={north}, east={east}, south={south}, west={west}")]
    MalformedExtent {
        north: f64,
        east: f64,
        south: f64,
        west: f64,
    },

    #[error("Computation superseded by viewport generation {generation}")]
    Superseded { generation: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

pub type Result<T> = std::result::Result<T, SignpostError>;
