use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A path exactly as the path-finding service returned it. Only ever used to
/// measure distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct RawPath(Vec<Coordinate>);

impl RawPath {
    /// Wraps the service's coordinates. A path needs at least two points.
    pub fn new(coordinates: Vec<Coordinate>) -> Option<Self> {
        (coordinates.len() >= 2).then_some(Self(coordinates))
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Coordinate {
        self.0[0]
    }

    pub fn last(&self) -> Coordinate {
        self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<Coordinate>> for RawPath {
    type Error = String;

    fn try_from(value: Vec<Coordinate>) -> Result<Self, Self::Error> {
        let len = value.len();
        RawPath::new(value).ok_or_else(|| format!("a path needs at least 2 points, got {len}"))
    }
}

impl From<RawPath> for Vec<Coordinate> {
    fn from(value: RawPath) -> Self {
        value.0
    }
}

/// A path prepared for drawing and camera motion. Shares its end points with
/// the raw path it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayPath(Vec<Coordinate>);

impl DisplayPath {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn into_coordinates(self) -> Vec<Coordinate> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<RawPath> for DisplayPath {
    fn from(value: RawPath) -> Self {
        Self(value.0)
    }
}
