//! Domains of target points for time-series extraction.

use crate::{
    geometry::{GeoPoint, GeoWindow},
    grid::fgr,
    io::utils as io_utils,
};
use std::{collections::HashSet, fmt::Write as _, io, path::Path};

/// A single target point of a domain, identified by a unique id string
/// that also names the point's output file.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainPoint {
    position: GeoPoint,
    id: String,
}

impl DomainPoint {
    /// Creates a new domain point with the given position and id.
    pub fn new(longitude: fgr, latitude: fgr, id: String) -> Self {
        Self {
            position: GeoPoint::new(longitude, latitude),
            id,
        }
    }

    /// Returns the geographic position of the point.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Returns the longitude of the point [degrees east].
    pub fn longitude(&self) -> fgr {
        self.position.longitude
    }

    /// Returns the latitude of the point [degrees north].
    pub fn latitude(&self) -> fgr {
        self.position.latitude
    }

    /// Returns the id of the point.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// An ordered collection of domain points loaded from or written to a
/// plain text table with one header line and `longitude latitude id` rows.
#[derive(Clone, Debug)]
pub struct DomainCatalog {
    points: Vec<DomainPoint>,
}

impl DomainCatalog {
    /// Creates a catalog from the given points.
    ///
    /// Fails if the collection is empty, if any coordinate is non-finite
    /// or if two points share an id.
    pub fn from_points(points: Vec<DomainPoint>) -> io::Result<Self> {
        if points.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Domain contains no points",
            ));
        }
        let mut seen_ids = HashSet::new();
        for point in &points {
            if !point.longitude().is_finite() || !point.latitude().is_finite() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Domain point {} has non-finite coordinates {}",
                        point.id(),
                        point.position()
                    ),
                ));
            }
            if !seen_ids.insert(point.id().to_string()) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Domain contains duplicate point id {}", point.id()),
                ));
            }
        }
        Ok(Self { points })
    }

    /// Creates a catalog covering the Cartesian product of regularly spaced
    /// longitude and latitude values, with sequentially numbered point ids.
    ///
    /// Both ranges are inclusive of their upper bound (to within half a
    /// step). Longitude varies slowest.
    pub fn regular(
        lon_bounds: (fgr, fgr),
        lat_bounds: (fgr, fgr),
        resolution: fgr,
    ) -> io::Result<Self> {
        if !(resolution > 0.0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Domain resolution must be positive, got {}", resolution),
            ));
        }
        let lon_values = regular_axis_values(lon_bounds.0, lon_bounds.1, resolution)?;
        let lat_values = regular_axis_values(lat_bounds.0, lat_bounds.1, resolution)?;

        let mut points = Vec::with_capacity(lon_values.len() * lat_values.len());
        for &longitude in &lon_values {
            for &latitude in &lat_values {
                let id = format!("id{:06}", points.len());
                points.push(DomainPoint::new(longitude, latitude, id));
            }
        }
        Self::from_points(points)
    }

    /// Parses a catalog from the text of a domain table.
    ///
    /// The first line is a human-readable header and is ignored. Every
    /// following line must hold exactly three whitespace-separated columns:
    /// longitude, latitude and id.
    pub fn from_table_text(text: &str) -> io::Result<Self> {
        let mut points = Vec::new();
        for (line_idx, line) in text.lines().enumerate().skip(1) {
            let line_number = line_idx + 1;
            let columns: Vec<_> = line.split_whitespace().collect();
            if columns.len() != 3 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Line {} of domain table has {} columns \
                         (expected 3: longitude latitude id)",
                        line_number,
                        columns.len()
                    ),
                ));
            }
            let longitude = parse_coordinate(columns[0], "longitude", line_number)?;
            let latitude = parse_coordinate(columns[1], "latitude", line_number)?;
            points.push(DomainPoint::new(
                longitude,
                latitude,
                columns[2].to_string(),
            ));
        }
        Self::from_points(points)
    }

    /// Parses a catalog from the domain table at the given path.
    pub fn from_file(file_path: &Path) -> io::Result<Self> {
        let text = io_utils::read_text_file(file_path).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!(
                    "Could not read domain file {}: {}",
                    file_path.display(),
                    err
                ),
            )
        })?;
        Self::from_table_text(&text)
    }

    /// Returns the domain table text for the catalog.
    pub fn table_text(&self) -> String {
        let mut text = String::from("#     lon       lat         id\n");
        for point in &self.points {
            writeln!(
                text,
                "{:>9.4} {:>9.4}  {}",
                point.longitude(),
                point.latitude(),
                point.id()
            )
            .expect("Writing to string cannot fail");
        }
        text
    }

    /// Writes the catalog as a domain table to the given path.
    pub fn write(&self, file_path: &Path) -> io::Result<()> {
        io_utils::write_text_file(file_path, &self.table_text())
    }

    /// Returns the points of the catalog, in load order.
    pub fn points(&self) -> &[DomainPoint] {
        &self.points
    }

    /// Returns the number of points in the catalog.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the catalog has no points (never true for a valid catalog).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the smallest geographic window containing every point.
    pub fn bounding_window(&self) -> GeoWindow {
        GeoWindow::containing(self.points.iter().map(|point| point.position()))
            .expect("Catalog is never empty")
    }
}

fn parse_coordinate(value_string: &str, name: &str, line_number: usize) -> io::Result<fgr> {
    value_string.parse().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Invalid {} on line {} of domain table: {}",
                name, line_number, err
            ),
        )
    })
}

/// Enumerates regularly spaced values from `lower` to `upper` inclusive
/// (to within half a step).
fn regular_axis_values(lower: fgr, upper: fgr, step: fgr) -> io::Result<Vec<fgr>> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Axis bounds [{}, {}] must be finite", lower, upper),
        ));
    }
    if upper < lower {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Upper bound {} is smaller than lower bound {}", upper, lower),
        ));
    }
    let stop = upper + step / 2.0;
    let mut values = Vec::new();
    loop {
        let value = lower + step * values.len() as fgr;
        if value >= stop {
            break;
        }
        values.push(value);
    }
    Ok(values)
}
