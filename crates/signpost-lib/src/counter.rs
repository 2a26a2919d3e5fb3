//! Per-sector point counting
//!
//! Every point is tested against the eight regions with `geo`'s point-in-polygon
//! predicates. Regions are small fixed-size polygons, so the cost is linear in the
//! number of points.

use crate::{CancelToken, Config, Region, Result, Sector, SectorMap};
use geo::{Contains, Intersects, Point};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of points counted between two cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 4096;

/// How points lying exactly on a region boundary are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundaryRule {
    /// Count a point only when it is strictly inside a region.
    /// Points on a shared edge or corner diagonal are counted nowhere.
    #[default]
    Strict,
    /// Count a point in the first sector (clockwise from NNE) whose closed region
    /// contains it. Every point of the closed exterior lands in exactly one sector.
    FirstMatch,
}

/// What an indicator widget shows for one sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Indicator {
    /// Points off-screen in this direction
    pub count: usize,
    /// Whether the indicator should be shown (`count > 0`)
    pub visible: bool,
}

impl Indicator {
    #[inline]
    pub fn from_count(count: usize) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Turn raw counts into indicator states
pub fn indicators(counts: &SectorMap<usize>) -> SectorMap<Indicator> {
    counts.map(|_, &count| Indicator::from_count(count))
}

/// Count, per sector, the points falling inside that sector's region
///
/// Sectors without any match report 0. With [`BoundaryRule::Strict`] and
/// overlapping regions (only possible with malformed extents) a point may be
/// counted in more than one sector.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn count_by_sector(
    regions: &SectorMap<Region>,
    points: &[Point<f64>],
    rule: BoundaryRule,
) -> SectorMap<usize> {
    count_chunk(regions, points, rule)
}

/// Count like [`count_by_sector`], honoring the configuration and a cancel token
///
/// Large inputs (at least [`Config::parallel_threshold`] points) are split across
/// the rayon thread pool. The token is checked between chunks of points; once it
/// reports a newer viewport the count stops with [`crate::SignpostError::Superseded`].
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn count_by_sector_with(
    regions: &SectorMap<Region>,
    points: &[Point<f64>],
    config: &Config,
    cancel: &CancelToken,
) -> Result<SectorMap<usize>> {
    let rule = config.boundary_rule;

    if points.len() >= config.parallel_threshold {
        points
            .par_chunks(CANCEL_CHECK_INTERVAL)
            .map(|chunk| {
                cancel.check()?;
                Ok(count_chunk(regions, chunk, rule))
            })
            .try_reduce(SectorMap::default, |mut acc, part| {
                acc.accumulate(&part);
                Ok(acc)
            })
    } else {
        let mut counts = SectorMap::default();
        for chunk in points.chunks(CANCEL_CHECK_INTERVAL) {
            cancel.check()?;
            counts.accumulate(&count_chunk(regions, chunk, rule));
        }
        Ok(counts)
    }
}

fn count_chunk(
    regions: &SectorMap<Region>,
    points: &[Point<f64>],
    rule: BoundaryRule,
) -> SectorMap<usize> {
    let mut counts = SectorMap::default();

    for point in points {
        match rule {
            BoundaryRule::Strict => {
                for (sector, region) in regions.iter() {
                    if region.contains(point) {
                        counts[sector] += 1;
                    }
                }
            }
            BoundaryRule::FirstMatch => {
                if let Some(sector) = Sector::ALL
                    .into_iter()
                    .find(|&sector| regions[sector].intersects(point))
                {
                    counts[sector] += 1;
                }
            }
        }
    }

    counts
}
