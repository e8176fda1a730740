//! Celestial-body data API client
//!
//! `GET {base}/bodies/{name}` on le-systeme-solaire.net. The body document is
//! passed through to the caller untouched.

use super::{status_error, UpstreamError};

pub struct SolarSystemClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SolarSystemClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/bodies/{key}` with the key as one percent-encoded path segment
    fn body_url(&self, key: &str) -> Result<reqwest::Url, UpstreamError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::Parse(format!("invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Parse(format!("base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push("bodies")
            .push(key);
        Ok(url)
    }

    /// Fetch the body document for a lowercase body key
    ///
    /// A 404 from the upstream maps to [`UpstreamError::NotFound`]. The dot
    /// segments `.` and `..` name no body and are answered without a request.
    pub async fn lookup_body(&self, key: &str) -> Result<serde_json::Value, UpstreamError> {
        if matches!(key, "." | "..") {
            return Err(UpstreamError::NotFound(key.to_string()));
        }
        let url = self.body_url(key)?;

        tracing::debug!(body = %key, url = %url, "Querying celestial-body API");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
