//! cosmic-api library interface for testing
//!
//! Exposes the router, shared state and upstream clients for integration tests.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use cosmic_common::config::{Credentials, TomlConfig};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::{
    ApodClient, FalClient, NasaImageClient, OpenAiClient, SolarSystemClient, UpstreamError,
    YouTubeClient,
};

/// Application state shared across handlers
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Journal database pool
    pub db: SqlitePool,
    /// Server-held upstream credentials
    pub credentials: Arc<Credentials>,
    pub solar_system: Arc<SolarSystemClient>,
    pub apod: Arc<ApodClient>,
    pub nasa_images: Arc<NasaImageClient>,
    pub youtube: Arc<YouTubeClient>,
    pub openai: Arc<OpenAiClient>,
    pub fal: Arc<FalClient>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Build state with one shared HTTP client pointed at the configured endpoints
    pub fn new(
        db: SqlitePool,
        config: &TomlConfig,
        credentials: Credentials,
    ) -> Result<Self, UpstreamError> {
        let http = services::build_http_client()?;
        let endpoints = &config.endpoints;

        let mut openai = OpenAiClient::new(
            http.clone(),
            endpoints.openai.clone(),
            config.openai.model.clone(),
        );
        if let Some((resource, deployment)) = config.openai.azure() {
            tracing::info!(resource = %resource, deployment = %deployment, "Using Azure OpenAI deployment");
            openai = openai.with_azure(resource, deployment);
        }

        Ok(Self {
            db,
            credentials: Arc::new(credentials),
            solar_system: Arc::new(SolarSystemClient::new(
                http.clone(),
                endpoints.solar_system.clone(),
            )),
            apod: Arc::new(ApodClient::new(http.clone(), endpoints.nasa_api.clone())),
            nasa_images: Arc::new(NasaImageClient::new(
                http.clone(),
                endpoints.nasa_images.clone(),
            )),
            youtube: Arc::new(YouTubeClient::new(http.clone(), endpoints.youtube.clone())),
            openai: Arc::new(openai),
            fal: Arc::new(FalClient::new(http, endpoints.fal.clone())),
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::planet_routes())
        .merge(api::media_routes())
        .merge(api::generation_routes())
        .merge(api::journal_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
