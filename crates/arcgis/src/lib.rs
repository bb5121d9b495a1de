//! Treatment plants and catchments from ArcGIS feature services.

use std::{error, fmt, sync::Arc};

pub mod feed;
pub mod features;

#[derive(Debug, Clone)]
pub enum ArcGisError {
    RequestError(Arc<reqwest::Error>),
    GeoJsonError(Arc<geojson::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
    },
}

impl error::Error for ArcGisError {}

impl fmt::Display for ArcGisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArcGisError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ArcGisError::GeoJsonError(e) => write!(f, "GeoJSON parse error: {}", e),
            ArcGisError::InvalidResponse { status_code, url } => {
                write!(f, "Invalid Response ({}) {}", status_code, url)
            }
        }
    }
}

impl From<reqwest::Error> for ArcGisError {
    fn from(e: reqwest::Error) -> Self {
        ArcGisError::RequestError(Arc::new(e))
    }
}

impl From<geojson::Error> for ArcGisError {
    fn from(e: geojson::Error) -> Self {
        ArcGisError::GeoJsonError(Arc::new(e))
    }
}
