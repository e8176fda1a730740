//! fal.ai image generation client
//!
//! Uses the synchronous runner (`POST {base}/{model_id}`), which blocks until
//! the image is ready and returns the same payload as a completed queue job.

use serde::{Deserialize, Serialize};

use super::{join_url, status_error, UpstreamError};

/// Model used for planet landscapes
pub const LANDSCAPE_MODEL: &str = "fal-ai/fast-sdxl";

/// Model used for species illustrations
pub const SPECIES_MODEL: &str = "fal-ai/flux/dev";

/// Model input
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

/// Model output; only the image list is of interest
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FalOutput {
    #[serde(default)]
    pub images: Vec<FalImage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FalImage {
    #[serde(default)]
    pub url: Option<String>,
}

impl FalOutput {
    /// URL of the first image, if the model produced one
    pub fn first_url(&self) -> Option<&str> {
        self.images
            .first()
            .and_then(|image| image.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

pub struct FalClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl FalClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Run a text-to-image model
    pub async fn generate(
        &self,
        api_key: &str,
        model_id: &str,
        input: &ImageRequest,
    ) -> Result<FalOutput, UpstreamError> {
        let url = join_url(&self.base_url, model_id);

        tracing::debug!(
            model = %model_id,
            width = input.width,
            height = input.height,
            "Submitting fal.ai request"
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Key {}", api_key))
            .json(input)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
