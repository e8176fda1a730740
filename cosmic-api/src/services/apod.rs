//! NASA Astronomy Picture of the Day client

use serde::{Deserialize, Serialize};

use super::{join_url, status_error, UpstreamError};

/// APOD payload as returned by NASA
#[derive(Debug, Clone, Deserialize)]
pub struct ApodResponse {
    pub copyright: Option<String>,
    pub date: String,
    pub explanation: String,
    pub hdurl: Option<String>,
    pub media_type: String,
    #[serde(default)]
    pub service_version: Option<String>,
    pub title: String,
    pub url: String,
}

/// Shaped APOD response sent to the frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApodSummary {
    pub title: String,
    pub explanation: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl From<ApodResponse> for ApodSummary {
    fn from(apod: ApodResponse) -> Self {
        Self {
            title: apod.title,
            explanation: apod.explanation,
            url: apod.url,
            hdurl: apod.hdurl,
            media_type: apod.media_type,
            date: apod.date,
            copyright: apod.copyright,
        }
    }
}

pub struct ApodClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApodClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetch today's picture
    pub async fn fetch_today(&self, api_key: &str) -> Result<ApodResponse, UpstreamError> {
        let url = join_url(&self.base_url, "planetary/apod");

        // URL logged without the query string so the key never reaches the logs
        tracing::debug!(url = %url, "Querying NASA APOD API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let apod: ApodResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        tracing::info!(date = %apod.date, title = %apod.title, "Retrieved APOD");
        Ok(apod)
    }
}
