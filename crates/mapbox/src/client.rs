use std::{env, time::Duration};

use serde::de::DeserializeOwned;

use crate::MapboxError;

pub const MAPBOX_API_URL: &str = "https://api.mapbox.com";

#[derive(Clone, Debug)]
pub struct MapboxCredentials {
    pub access_token: String,
}

impl MapboxCredentials {
    pub fn env() -> Result<Self, MapboxError> {
        let access_token = env::var("MAPBOX_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(MapboxError::MissingToken)?;
        Ok(Self { access_token })
    }
}

/// Thin wrapper around a shared `reqwest` client that signs every request
/// with the access token and gives up after `timeout`.
#[derive(Clone, Debug)]
pub struct MapboxClient {
    credentials: MapboxCredentials,
    base_url: String,
    http: reqwest::Client,
}

impl MapboxClient {
    pub fn new(credentials: MapboxCredentials, timeout: Duration) -> Result<Self, MapboxError> {
        Self::with_base_url(credentials, MAPBOX_API_URL, timeout)
    }

    pub fn with_base_url<S: Into<String>>(
        credentials: MapboxCredentials,
        base_url: S,
        timeout: Duration,
    ) -> Result<Self, MapboxError> {
        Ok(Self {
            credentials,
            base_url: base_url.into(),
            http: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Fetch JSON from an endpoint using this client.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MapboxError> {
        let url = self.url(endpoint);
        log::debug!("Requesting Endpoint '{}'.", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("access_token", self.credentials.access_token.as_str())])
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(serde_json::from_str(&response.text().await?)?),
            other => Err(MapboxError::InvalidResponse {
                status_code: other,
                url,
                response: response.text().await.ok(),
            }),
        }
    }
}
