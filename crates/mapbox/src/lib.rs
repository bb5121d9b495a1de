use std::{error, fmt, sync::Arc};

use flush::FlushError;

pub mod client;
pub mod directions;
pub mod geocoding;

#[derive(Debug, Clone)]
pub enum MapboxError {
    MissingToken,
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
}

impl error::Error for MapboxError {}

impl fmt::Display for MapboxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapboxError::MissingToken => write!(f, "MAPBOX_ACCESS_TOKEN is not set."),
            MapboxError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            MapboxError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            MapboxError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
        }
    }
}

impl From<reqwest::Error> for MapboxError {
    fn from(e: reqwest::Error) -> Self {
        MapboxError::RequestError(Arc::new(e.without_url()))
    }
}

impl From<serde_json::Error> for MapboxError {
    fn from(e: serde_json::Error) -> Self {
        MapboxError::JsonError(Arc::new(e))
    }
}

impl MapboxError {
    /// Reports this error to the engine as a failure of `service`.
    pub fn into_flush_error(self, service: &'static str) -> FlushError {
        FlushError::upstream(service, self.to_string())
    }
}
