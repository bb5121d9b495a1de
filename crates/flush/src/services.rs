//! Outside services the engine depends on. Implementations live in their own
//! crates (`mapbox`, `arcgis`) and report failures as
//! [`FlushError::UpstreamUnavailable`](crate::FlushError::UpstreamUnavailable).

use async_trait::async_trait;
use model::{
    catchment::Catchment, coordinate::Coordinate, facility::Facility, path::RawPath,
};

use crate::FlushResult;

#[async_trait]
pub trait PathService: Send + Sync {
    /// The single best path from `start` to `end`, or `None` if the service
    /// found no path.
    async fn find_path(&self, start: Coordinate, end: Coordinate)
        -> FlushResult<Option<RawPath>>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Human readable description of the place at `point`, `None` if the
    /// service knows nothing about it.
    async fn describe(&self, point: Coordinate) -> FlushResult<Option<String>>;
}

#[async_trait]
pub trait FeatureFeed: Send + Sync {
    async fn facilities(&self) -> FlushResult<Vec<Facility>>;

    async fn catchments(&self) -> FlushResult<Vec<Catchment>>;
}
