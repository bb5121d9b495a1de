use async_trait::async_trait;
use flush::{services::PathService, FlushResult};
use model::{coordinate::Coordinate, path::RawPath};
use serde::Deserialize;

use crate::{client::MapboxClient, MapboxError};

pub const SERVICE: &str = "path-finding";

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub geometry: LineString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<Coordinate>,
}

impl DirectionsResponse {
    /// The first route, if it is long enough to follow.
    pub fn into_path(self) -> Option<RawPath> {
        self.routes
            .into_iter()
            .next()
            .and_then(|route| RawPath::new(route.geometry.coordinates))
    }
}

/// Walking directions stand in for the sewer network.
#[derive(Clone, Debug)]
pub struct WalkingDirections {
    client: MapboxClient,
}

impl WalkingDirections {
    pub fn new(client: MapboxClient) -> Self {
        Self { client }
    }

    pub async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<DirectionsResponse, MapboxError> {
        let endpoint = format!(
            "directions/v5/mapbox/walking/{},{};{},{}",
            start.longitude, start.latitude, end.longitude, end.latitude
        );
        self.client
            .get(&endpoint, &[("geometries", "geojson"), ("overview", "full")])
            .await
    }
}

#[async_trait]
impl PathService for WalkingDirections {
    async fn find_path(&self, start: Coordinate, end: Coordinate) -> FlushResult<Option<RawPath>> {
        let response = self
            .route(start, end)
            .await
            .map_err(|why| why.into_flush_error(SERVICE))?;
        let path = response.into_path();
        if path.is_none() {
            log::warn!("no walking route between {:?} and {:?}", start, end);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_route_becomes_the_path() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{
                "code": "Ok",
                "routes": [
                    {
                        "distance": 812.4,
                        "geometry": {
                            "type": "LineString",
                            "coordinates": [[-79.3832, 43.6532], [-79.3840, 43.6520], [-79.3850, 43.6510]]
                        }
                    },
                    {
                        "distance": 900.0,
                        "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
                    }
                ]
            }"#,
        )
        .unwrap();
        let path = response.into_path().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Coordinate::new(-79.3832, 43.6532));
        assert_eq!(path.last(), Coordinate::new(-79.3850, 43.6510));
    }

    #[test]
    fn no_routes_means_no_path() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert!(response.into_path().is_none());
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"code": "NoSegment", "message": "no segment"}"#).unwrap();
        assert!(response.into_path().is_none());
    }

    #[test]
    fn single_point_route_is_not_a_path() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{"routes": [{"geometry": {"coordinates": [[-79.38, 43.65]]}}]}"#,
        )
        .unwrap();
        assert!(response.into_path().is_none());
    }
}
