use clap::{Parser, ValueEnum};
use geo::Point;
use signpost_lib::{BoundaryRule, Config, Extent, SignpostError};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None, allow_negative_numbers = true)]
/// Signpost - Count the points lying outside a map viewport in each compass sector
pub struct Settings {
    /// Northern latitude of the viewport
    #[clap(long)]
    pub north: f64,

    /// Eastern longitude of the viewport
    #[clap(long)]
    pub east: f64,

    /// Southern latitude of the viewport
    #[clap(long)]
    pub south: f64,

    /// Western longitude of the viewport
    #[clap(long)]
    pub west: f64,

    /// Point to count, as LAT,LON (repeat for every point)
    #[clap(short, long = "point", value_name = "LAT,LON", value_parser = parse_point, allow_hyphen_values = true)]
    pub points: Vec<Point<f64>>,

    /// Degrees added around the point bounds to form the dataset extent (must be > 0)
    #[clap(long, default_value = "1.0")]
    pub margin: f64,

    /// How points exactly on a sector boundary are counted
    #[clap(long, value_enum, default_value_t = Boundary::Strict)]
    pub boundary: Boundary,

    /// Point count from which counting runs in parallel
    #[clap(long, default_value = "50000")]
    pub parallel_threshold: usize,

    /// Print the indicators as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

/// Boundary handling selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Only points strictly inside a sector are counted
    Strict,
    /// Boundary points go to the first matching sector, clockwise from NNE
    FirstMatch,
}

impl From<Boundary> for BoundaryRule {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Strict => BoundaryRule::Strict,
            Boundary::FirstMatch => BoundaryRule::FirstMatch,
        }
    }
}

impl Settings {
    /// Viewport given on the command line, rejected when its bounds are inverted
    pub fn viewport(&self) -> Result<Extent, SignpostError> {
        Extent::try_new(self.north, self.east, self.south, self.west)
    }

    /// Engine configuration from the command line
    pub fn config(&self) -> Config {
        Config {
            margin: self.margin,
            boundary_rule: self.boundary.into(),
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Parse `LAT,LON` into a point (`x` = longitude, `y` = latitude)
fn parse_point(s: &str) -> Result<Point<f64>, SignpostError> {
    let invalid = || SignpostError::InvalidCoordinate(format!("expected LAT,LON, got '{s}'"));

    let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
    if !lat.is_finite() || !lon.is_finite() {
        return Err(invalid());
    }
    Ok(Point::new(lon, lat))
}
