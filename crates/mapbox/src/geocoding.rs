use async_trait::async_trait;
use flush::{services::ReverseGeocoder, FlushResult};
use model::coordinate::Coordinate;
use serde::Deserialize;

use crate::{client::MapboxClient, MapboxError};

pub const SERVICE: &str = "reverse-lookup";

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub place_name: String,
}

impl GeocodingResponse {
    pub fn into_place_name(self) -> Option<String> {
        self.features.into_iter().next().map(|place| place.place_name)
    }
}

/// Reverse lookup of street addresses.
#[derive(Clone, Debug)]
pub struct AddressLookup {
    client: MapboxClient,
}

impl AddressLookup {
    pub fn new(client: MapboxClient) -> Self {
        Self { client }
    }

    pub async fn lookup(&self, point: Coordinate) -> Result<GeocodingResponse, MapboxError> {
        let endpoint = format!(
            "geocoding/v5/mapbox.places/{},{}.json",
            point.longitude, point.latitude
        );
        self.client
            .get(&endpoint, &[("types", "address"), ("limit", "1")])
            .await
    }
}

#[async_trait]
impl ReverseGeocoder for AddressLookup {
    async fn describe(&self, point: Coordinate) -> FlushResult<Option<String>> {
        Ok(self
            .lookup(point)
            .await
            .map_err(|why| why.into_flush_error(SERVICE))?
            .into_place_name())
    }
}
