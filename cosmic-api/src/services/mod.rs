//! Upstream service clients
//!
//! One client per third-party API. Clients issue a single request, map HTTP
//! failures into [`UpstreamError`] and deserialize only the fields the
//! handlers shape into responses. No retries, no caching.

pub mod apod;
pub mod astrology;
pub mod fal;
pub mod nasa_images;
pub mod openai;
pub mod prompts;
pub mod solar_system;
pub mod species;
pub mod youtube;

pub use apod::{ApodClient, ApodSummary};
pub use fal::{FalClient, ImageRequest};
pub use nasa_images::{NasaImage, NasaImageClient};
pub use openai::{ChatRequest, OpenAiClient};
pub use solar_system::SolarSystemClient;
pub use species::{SpeciesCategory, SpeciesInfo};
pub use youtube::{Video, YouTubeClient};

use thiserror::Error;

const USER_AGENT: &str = concat!("CosmicJourney/", env!("CARGO_PKG_VERSION"));

/// Upstream client errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// Upstream answered 200 but reported an error in its payload
    #[error("API error: {0}")]
    Api(String),

    /// Upstream answered but without the content we asked for
    #[error("Missing content: {0}")]
    MissingContent(String),
}

/// Build the HTTP client shared by every upstream client
pub fn build_http_client() -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| UpstreamError::Network(e.to_string()))
}

/// Read a non-2xx response into [`UpstreamError::Status`]
async fn status_error(response: reqwest::Response) -> UpstreamError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    UpstreamError::Status { status, body }
}

/// Join a base URL and a path without doubling slashes
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
