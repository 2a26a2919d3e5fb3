//! Exterior region construction
//!
//! The space between the viewport and the dataset extent is cut into eight
//! quadrilaterals: the two midlines through the viewport center split it into
//! quadrants, and the diagonal from each viewport corner to the matching dataset
//! corner splits every quadrant into two sectors.
//!
//! ```text
//!  dW,dN ________ midX ________ dE,dN
//!       |\  NNW   |    NNE   /|
//!       |  \______|________/  |
//!       |WNW|     |      | ENE|
//!  midY |---|---- + -----|----|
//!       |WSW|     |      | ESE|
//!       |  /‾‾‾‾‾‾|‾‾‾‾‾‾‾‾\  |
//!       |/  SSW   |    SSE   \|
//!  dW,dS ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾ dE,dS
//! ```

use crate::{Extent, Sector, SectorMap};
use geo::{LineString, Polygon};

/// Polygon covering the off-screen space of one sector
pub type Region = Polygon<f64>;

/// Build the eight regions around `viewport`, reaching out to `dataset`
///
/// The viewport (and its center) is first clamped into the dataset extent, so a
/// side where the viewport already shows everything produces a zero-area region
/// rather than an inverted one. Every region is produced, degenerate or not.
///
/// Both extents are expected to be well-formed; see [`Extent::validate`]. Inverted
/// or NaN bounds do not panic but yield meaningless, possibly self-intersecting or
/// zero-area, polygons.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn build_regions(dataset: Extent, viewport: Extent) -> SectorMap<Region> {
    let view = viewport.clamp_within(&dataset);
    let center = viewport.center();
    let mid_x = center.x().min(view.east).max(view.west);
    let mid_y = center.y().min(view.north).max(view.south);

    let (d_n, d_e, d_s, d_w) = (dataset.north, dataset.east, dataset.south, dataset.west);
    let (v_n, v_e, v_s, v_w) = (view.north, view.east, view.south, view.west);

    SectorMap::from_fn(|sector| {
        let ring = match sector {
            Sector::Nne => [(mid_x, d_n), (d_e, d_n), (v_e, v_n), (mid_x, v_n)],
            Sector::Ene => [(v_e, v_n), (d_e, d_n), (d_e, mid_y), (v_e, mid_y)],
            Sector::Ese => [(v_e, mid_y), (d_e, mid_y), (d_e, d_s), (v_e, v_s)],
            Sector::Sse => [(mid_x, v_s), (v_e, v_s), (d_e, d_s), (mid_x, d_s)],
            Sector::Ssw => [(v_w, v_s), (mid_x, v_s), (mid_x, d_s), (d_w, d_s)],
            Sector::Wsw => [(d_w, mid_y), (v_w, mid_y), (v_w, v_s), (d_w, d_s)],
            Sector::Wnw => [(d_w, d_n), (v_w, v_n), (v_w, mid_y), (d_w, mid_y)],
            Sector::Nnw => [(d_w, d_n), (mid_x, d_n), (mid_x, v_n), (v_w, v_n)],
        };
        closed_polygon(&ring)
    })
}

/// Polygon from a ring of (lon, lat) vertices, repeating the first one at the end
fn closed_polygon(ring: &[(f64, f64); 4]) -> Region {
    let mut coords: Vec<(f64, f64)> = ring.to_vec();
    coords.push(ring[0]);
    Polygon::new(LineString::from(coords), vec![])
}
