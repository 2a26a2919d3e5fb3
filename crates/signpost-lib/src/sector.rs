//! Compass sectors and dense per-sector storage

use crate::{Result, SignpostError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the eight secondary intercardinal directions, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sector {
    /// North-north-east
    Nne,
    /// East-north-east
    Ene,
    /// East-south-east
    Ese,
    /// South-south-east
    Sse,
    /// South-south-west
    Ssw,
    /// West-south-west
    Wsw,
    /// West-north-west
    Wnw,
    /// North-north-west
    Nnw,
}

impl Sector {
    /// All sectors in their fixed, clockwise order
    pub const ALL: [Sector; 8] = [
        Sector::Nne,
        Sector::Ene,
        Sector::Ese,
        Sector::Sse,
        Sector::Ssw,
        Sector::Wsw,
        Sector::Wnw,
        Sector::Nnw,
    ];

    /// Position in [`Sector::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case compass label, e.g. `"NNE"`
    pub const fn label(self) -> &'static str {
        match self {
            Sector::Nne => "NNE",
            Sector::Ene => "ENE",
            Sector::Ese => "ESE",
            Sector::Sse => "SSE",
            Sector::Ssw => "SSW",
            Sector::Wsw => "WSW",
            Sector::Wnw => "WNW",
            Sector::Nnw => "NNW",
        }
    }

    /// Clockwise rotation from north of the sector's midline, in degrees
    ///
    /// Only used by indicator widgets to orient their arrow.
    #[inline]
    pub fn rotation_degrees(self) -> f64 {
        22.5 + 45.0 * self.index() as f64
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = SignpostError;

    fn from_str(s: &str) -> Result<Self> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SignpostError::InvalidCoordinate(format!("unknown sector '{s}'")))
    }
}

/// A value for every [`Sector`]
///
/// Backed by a fixed array, so every sector is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectorMap<T>([T; 8]);

impl<T> SectorMap<T> {
    /// Build a map by evaluating `f` once per sector, in [`Sector::ALL`] order
    pub fn from_fn(mut f: impl FnMut(Sector) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Sector::ALL[i])))
    }

    /// Get the value for a sector
    #[inline]
    pub fn get(&self, sector: Sector) -> &T {
        &self.0[sector.index()]
    }

    /// Iterate over `(sector, value)` pairs in [`Sector::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Sector, &T)> {
        Sector::ALL.into_iter().zip(self.0.iter())
    }

    /// Transform every value, keeping the sector association
    pub fn map<U>(&self, mut f: impl FnMut(Sector, &T) -> U) -> SectorMap<U> {
        SectorMap::from_fn(|sector| f(sector, self.get(sector)))
    }

    /// Values in [`Sector::ALL`] order
    #[inline]
    pub fn values(&self) -> &[T; 8] {
        &self.0
    }
}

impl SectorMap<usize> {
    /// Sum over all sectors
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Add another set of counts into this one
    pub fn accumulate(&mut self, other: &SectorMap<usize>) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }
}

impl<T> Index<Sector> for SectorMap<T> {
    type Output = T;

    fn index(&self, sector: Sector) -> &T {
        &self.0[sector.index()]
    }
}

impl<T> IndexMut<Sector> for SectorMap<T> {
    fn index_mut(&mut self, sector: Sector) -> &mut T {
        &mut self.0[sector.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_order_and_index() {
        for (i, sector) in Sector::ALL.iter().enumerate() {
            assert_eq!(sector.index(), i);
        }
    }

    #[test]
    fn test_rotation_degrees() {
        let rotations: Vec<f64> = Sector::ALL.iter().map(|s| s.rotation_degrees()).collect();
        assert_eq!(
            rotations,
            vec![22.5, 67.5, 112.5, 157.5, 202.5, 247.5, 292.5, 337.5]
        );
    }

    #[test]
    fn test_label_roundtrip() {
        for sector in Sector::ALL {
            assert_eq!(sector.to_string().parse::<Sector>().unwrap(), sector);
        }
        assert_eq!("wnw".parse::<Sector>().unwrap(), Sector::Wnw);
        assert!("N".parse::<Sector>().is_err());
    }

    #[test]
    fn test_sector_map_defaults_to_zero() {
        let counts: SectorMap<usize> = SectorMap::default();
        assert!(counts.iter().all(|(_, &c)| c == 0));
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_sector_map_index_and_accumulate() {
        let mut a: SectorMap<usize> = SectorMap::default();
        a[Sector::Ssw] = 3;
        let b = SectorMap::from_fn(|s| s.index());
        a.accumulate(&b);

        assert_eq!(a[Sector::Ssw], 3 + Sector::Ssw.index());
        assert_eq!(*a.get(Sector::Nne), 0);
        assert_eq!(a.total(), 3 + (0..8).sum::<usize>());
    }

    #[test]
    fn test_sector_map_map() {
        let labels = SectorMap::from_fn(|s| s.index()).map(|s, &i| format!("{s}{i}"));
        assert_eq!(labels[Sector::Ene], "ENE1");
    }
}
