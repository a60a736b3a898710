//! Geographic utility objects.

use crate::grid::fgr;
use std::fmt;

/// A geographic position given as longitude and latitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Longitude [degrees east].
    pub longitude: fgr,
    /// Latitude [degrees north].
    pub latitude: fgr,
}

impl GeoPoint {
    /// Creates a new geographic point with the given coordinates.
    pub fn new(longitude: fgr, latitude: fgr) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

/// A closed geographic window bounded by longitude and latitude intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoWindow {
    lower_lon: fgr,
    upper_lon: fgr,
    lower_lat: fgr,
    upper_lat: fgr,
}

impl GeoWindow {
    /// Creates a new window from the given coordinate bounds.
    pub fn new(lower_lon: fgr, upper_lon: fgr, lower_lat: fgr, upper_lat: fgr) -> Self {
        assert!(
            upper_lon >= lower_lon,
            "Upper longitude bound {} is smaller than lower bound {}",
            upper_lon,
            lower_lon
        );
        assert!(
            upper_lat >= lower_lat,
            "Upper latitude bound {} is smaller than lower bound {}",
            upper_lat,
            lower_lat
        );
        Self {
            lower_lon,
            upper_lon,
            lower_lat,
            upper_lat,
        }
    }

    /// Creates the smallest window containing all the given points,
    /// or `None` if the iterator yields no points.
    pub fn containing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut window = Self::new(
            first.longitude,
            first.longitude,
            first.latitude,
            first.latitude,
        );
        for point in points {
            window.lower_lon = window.lower_lon.min(point.longitude);
            window.upper_lon = window.upper_lon.max(point.longitude);
            window.lower_lat = window.lower_lat.min(point.latitude);
            window.upper_lat = window.upper_lat.max(point.latitude);
        }
        Some(window)
    }

    /// Returns a window expanded by the given margin on all sides.
    pub fn expanded(&self, margin: fgr) -> Self {
        Self::new(
            self.lower_lon - margin,
            self.upper_lon + margin,
            self.lower_lat - margin,
            self.upper_lat + margin,
        )
    }

    /// Returns the lower longitude bound of the window.
    pub fn lower_lon(&self) -> fgr {
        self.lower_lon
    }

    /// Returns the upper longitude bound of the window.
    pub fn upper_lon(&self) -> fgr {
        self.upper_lon
    }

    /// Returns the lower latitude bound of the window.
    pub fn lower_lat(&self) -> fgr {
        self.lower_lat
    }

    /// Returns the upper latitude bound of the window.
    pub fn upper_lat(&self) -> fgr {
        self.upper_lat
    }
}

impl fmt::Display for GeoWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.lower_lon, self.upper_lon, self.lower_lat, self.upper_lat
        )
    }
}
