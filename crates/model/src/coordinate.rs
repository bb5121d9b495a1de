use serde::{Deserialize, Serialize};

/// A WGS84 position. Serialized the GeoJSON way, as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// The point a user clicked on the map.
pub type QueryPoint = Coordinate;

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// Arithmetic mean of the given coordinates, `None` if there are none.
    pub fn mean<'a, I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let (longitude, latitude, count) = coordinates.into_iter().fold(
            (0.0, 0.0, 0usize),
            |(longitude, latitude, count), coordinate| {
                (
                    longitude + coordinate.longitude,
                    latitude + coordinate.latitude,
                    count + 1,
                )
            },
        );
        if count == 0 {
            return None;
        }
        Some(Self::new(longitude / count as f64, latitude / count as f64))
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.longitude, value.latitude]
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(value: Coordinate) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(value: geo::Point<f64>) -> Self {
        Self::new(value.x(), value.y())
    }
}

/// Axis-aligned box around a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    pub fn around(coordinates: &[Coordinate]) -> Option<Self> {
        utility::geo::extent(coordinates.iter().map(Coordinate::as_tuple)).map(
            |((min_lon, min_lat), (max_lon, max_lat))| Self {
                south_west: Coordinate::new(min_lon, min_lat),
                north_east: Coordinate::new(max_lon, max_lat),
            },
        )
    }
}
