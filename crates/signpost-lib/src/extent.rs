//! Axis-aligned geographic extents
//!
//! An [`Extent`] describes both the (margin-expanded) bounds of the point dataset and
//! the live map viewport. Bounds are stored by compass side, in degrees.

use crate::{Result, SignpostError};
use geo::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    /// Northern latitude bound
    pub north: f64,
    /// Eastern longitude bound
    pub east: f64,
    /// Southern latitude bound
    pub south: f64,
    /// Western longitude bound
    pub west: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Extent {
    /// Create an extent without checking its bounds
    ///
    /// Use [`Extent::try_new`] or [`Extent::validate`] when the bounds come from
    /// untrusted input.
    #[inline]
    pub const fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// Create an extent, rejecting inverted or non-finite bounds
    pub fn try_new(north: f64, east: f64, south: f64, west: f64) -> Result<Self> {
        let extent = Self::new(north, east, south, west);
        extent.validate()?;
        Ok(extent)
    }

    /// Check that north > south and east > west, with all bounds finite
    pub fn validate(&self) -> Result<()> {
        let finite = [self.north, self.east, self.south, self.west]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.north > self.south && self.east > self.west {
            Ok(())
        } else {
            Err(SignpostError::MalformedExtent {
                north: self.north,
                east: self.east,
                south: self.south,
                west: self.west,
            })
        }
    }

    /// Tight bounds of a set of points, or `None` when there are no points
    ///
    /// A single point (or a set of collinear points) yields a zero-width or
    /// zero-height extent, which only becomes well-formed after [`Extent::expand`].
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let seed = Self::new(first.y(), first.x(), first.y(), first.x());

        Some(iter.fold(seed, |acc, p| Self {
            north: acc.north.max(p.y()),
            east: acc.east.max(p.x()),
            south: acc.south.min(p.y()),
            west: acc.west.min(p.x()),
        }))
    }

    /// Grow every side outwards by `margin` degrees
    #[inline]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            north: self.north + margin,
            east: self.east + margin,
            south: self.south - margin,
            west: self.west - margin,
        }
    }

    /// Center of the extent (midpoint of both axes)
    #[inline]
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }

    /// Longitude span in degrees
    #[inline]
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span in degrees
    #[inline]
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Whether the point lies strictly inside (edges excluded)
    #[inline]
    pub fn contains_strictly(&self, point: &Point<f64>) -> bool {
        point.x() > self.west
            && point.x() < self.east
            && point.y() > self.south
            && point.y() < self.north
    }

    /// Pull every side of this extent into `outer`
    ///
    /// Sides already inside `outer` are left untouched; a side beyond it lands on
    /// the matching edge of `outer`. Never panics, even for inverted or NaN bounds.
    pub fn clamp_within(&self, outer: &Extent) -> Self {
        Self {
            north: self.north.min(outer.north).max(outer.south),
            east: self.east.min(outer.east).max(outer.west),
            south: self.south.min(outer.north).max(outer.south),
            west: self.west.min(outer.east).max(outer.west),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(Extent::try_new(5.0, 5.0, -5.0, -5.0).is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        assert!(Extent::try_new(-5.0, 5.0, 5.0, -5.0).is_err());
        assert!(Extent::try_new(5.0, -5.0, -5.0, 5.0).is_err());
        // Zero height is as meaningless as inverted
        assert!(Extent::try_new(1.0, 5.0, 1.0, -5.0).is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let err = Extent::try_new(f64::NAN, 5.0, -5.0, -5.0).unwrap_err();
        assert!(matches!(err, SignpostError::MalformedExtent { .. }));
    }

    #[test]
    fn test_from_points() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(-10.0, 10.0),
            Point::new(10.0, -10.0),
            Point::new(-3.0, 4.0),
        ];
        let extent = Extent::from_points(&points).unwrap();
        assert_eq!(extent, Extent::new(10.0, 10.0, -10.0, -10.0));
    }

    #[test]
    fn test_from_points_empty() {
        let points: Vec<Point<f64>> = Vec::new();
        assert!(Extent::from_points(&points).is_none());
    }

    #[test]
    fn test_expand_with_margin() {
        let extent = Extent::new(10.0, 10.0, -10.0, -10.0).expand(1.0);
        assert_eq!(extent, Extent::new(11.0, 11.0, -11.0, -11.0));
    }

    #[test]
    fn test_single_point_needs_margin() {
        let points = vec![Point::new(3.0, 4.0)];
        let extent = Extent::from_points(&points).unwrap();
        assert!(extent.validate().is_err());
        assert!(extent.expand(1.0).validate().is_ok());
    }

    #[test]
    fn test_center() {
        let center = Extent::new(6.0, 20.0, 2.0, 10.0).center();
        assert_eq!(center.x(), 15.0);
        assert_eq!(center.y(), 4.0);
    }

    #[test]
    fn test_contains_strictly_excludes_edges() {
        let extent = Extent::new(5.0, 5.0, -5.0, -5.0);
        assert!(extent.contains_strictly(&Point::new(0.0, 0.0)));
        assert!(!extent.contains_strictly(&Point::new(5.0, 0.0)));
        assert!(!extent.contains_strictly(&Point::new(0.0, -5.0)));
        assert!(!extent.contains_strictly(&Point::new(7.0, 0.0)));
    }

    #[test]
    fn test_clamp_within() {
        let outer = Extent::new(11.0, 11.0, -11.0, -11.0);
        let viewport = Extent::new(20.0, 5.0, -5.0, -30.0);
        let clamped = viewport.clamp_within(&outer);
        assert_eq!(clamped, Extent::new(11.0, 5.0, -5.0, -11.0));
    }

    #[test]
    fn test_clamp_within_malformed_bounds() {
        let outer = Extent::new(11.0, 11.0, -11.0, -11.0);

        let inverted = Extent::new(-5.0, 5.0, 5.0, -5.0).clamp_within(&outer);
        assert_eq!(inverted, Extent::new(-5.0, 5.0, 5.0, -5.0));

        let clamped = Extent::new(5.0, 5.0, -5.0, -5.0).clamp_within(&outer.expand(-20.0));
        assert!(clamped.north.is_finite() && clamped.west.is_finite());

        let nan_outer = Extent::new(f64::NAN, 11.0, -11.0, -11.0);
        let clamped = Extent::new(20.0, 5.0, -5.0, -5.0).clamp_within(&nan_outer);
        assert_eq!(clamped.north, 20.0);
        assert_eq!(clamped.east, 5.0);
    }
}
