use std::{env, time::Duration};

use async_trait::async_trait;
use flush::{services::FeatureFeed, FlushError, FlushResult};
use geojson::{FeatureCollection, GeoJson};
use model::{catchment::Catchment, facility::Facility};

use crate::{features, ArcGisError};

pub const SERVICE: &str = "feature";

pub const PLANTS_URL: &str = "https://services.arcgis.com/a3UyP711tRR4O2v8/arcgis/rest/services/Wastewater_Treatment_Plants/FeatureServer";
pub const CATCHMENTS_URL: &str = "https://services.arcgis.com/a3UyP711tRR4O2v8/arcgis/rest/services/Wastewater_Treatment_Catchment/FeatureServer";

/// Asks the first layer for all features as WGS84 GeoJSON.
const QUERY: &str = "0/query?where=1=1&outFields=*&outSR=4326&f=geojson";

/// Plants and catchments served by two ArcGIS feature services.
#[derive(Clone, Debug)]
pub struct FeatureServiceFeed {
    pub plants_url: String,
    pub catchments_url: String,
    http: reqwest::Client,
}

impl FeatureServiceFeed {
    /// Requests that take longer than `timeout` fail.
    pub fn new<S: Into<String>>(
        plants_url: S,
        catchments_url: S,
        timeout: Duration,
    ) -> Result<Self, ArcGisError> {
        Ok(Self {
            plants_url: plants_url.into(),
            catchments_url: catchments_url.into(),
            http: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Toronto's services unless `FLUSH_PLANTS_URL` or `FLUSH_CATCHMENTS_URL`
    /// point elsewhere.
    pub fn env(timeout: Duration) -> Result<Self, ArcGisError> {
        Self::new(
            env::var("FLUSH_PLANTS_URL").unwrap_or_else(|_| PLANTS_URL.to_owned()),
            env::var("FLUSH_CATCHMENTS_URL").unwrap_or_else(|_| CATCHMENTS_URL.to_owned()),
            timeout,
        )
    }

    pub fn query_url(service_url: &str) -> String {
        format!("{}/{}", service_url.trim_end_matches('/'), QUERY)
    }

    pub async fn query(&self, service_url: &str) -> Result<FeatureCollection, ArcGisError> {
        let url = Self::query_url(service_url);
        log::info!("Requesting Endpoint '{}'.", url);

        let response = self.http.get(&url).send().await?;
        match response.status() {
            reqwest::StatusCode::OK => {
                let geojson = response.text().await?.parse::<GeoJson>()?;
                Ok(FeatureCollection::try_from(geojson)?)
            }
            other => Err(ArcGisError::InvalidResponse {
                status_code: other,
                url,
            }),
        }
    }
}

fn upstream(why: ArcGisError) -> FlushError {
    FlushError::upstream(SERVICE, why.to_string())
}

#[async_trait]
impl FeatureFeed for FeatureServiceFeed {
    async fn facilities(&self) -> FlushResult<Vec<Facility>> {
        let collection = self.query(&self.plants_url).await.map_err(upstream)?;
        Ok(features::facilities(&collection))
    }

    async fn catchments(&self) -> FlushResult<Vec<Catchment>> {
        let collection = self.query(&self.catchments_url).await.map_err(upstream)?;
        Ok(features::catchments(&collection))
    }
}
