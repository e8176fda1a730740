//! Service status endpoints
//!
//! - `GET /health`: liveness with uptime
//! - `GET /api`: short index of the planet endpoints
//! - `GET /api/healthCheck`: endpoint catalogue plus credential presence

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use cosmic_common::config::Credential;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::AppState;

/// Catalogue entry for one planet endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EndpointInfo {
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Planet endpoints advertised by `/api` and `/api/healthCheck`
pub const ENDPOINTS: [EndpointInfo; 8] = [
    EndpointInfo {
        name: "getPlanetInfo",
        path: "/api/getPlanetInfo?planet=mars",
        description: "Get basic information about a planet",
    },
    EndpointInfo {
        name: "getPlanetDescription",
        path: "/api/getPlanetDescription?planet=mars",
        description: "Get detailed description of a planet",
    },
    EndpointInfo {
        name: "getAstrologyInfo",
        path: "/api/getAstrologyInfo?planet=mars",
        description: "Get astrological information about a planet",
    },
    EndpointInfo {
        name: "getNasaImages",
        path: "/api/getNasaImages?planet=mars",
        description: "Get NASA images related to a planet",
    },
    EndpointInfo {
        name: "getPlanetVideos",
        path: "/api/getPlanetVideos?planet=mars",
        description: "Get YouTube videos related to a planet",
    },
    EndpointInfo {
        name: "generateSpecies",
        path: "/api/generateSpecies?planet=mars",
        description: "Generate hypothetical alien species for a planet",
    },
    EndpointInfo {
        name: "generateLandscape",
        path: "/api/generateLandscape?planet=mars",
        description: "Generate landscape image for a planet",
    },
    EndpointInfo {
        name: "getApod",
        path: "/api/getApod",
        description: "Get NASA Astronomy Picture of the Day",
    },
];

const RUNNING_MESSAGE: &str = "Cosmic Journey API is running";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Module name ("cosmic-api")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub api_endpoints: Vec<EndpointInfo>,
    /// Credential env var name → `Configured` / `Missing`
    pub environment_status: BTreeMap<&'static str, &'static str>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "cosmic-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    })
}

/// GET /api
pub async fn api_index() -> Json<IndexResponse> {
    Json(IndexResponse {
        status: "ok",
        message: RUNNING_MESSAGE,
        endpoints: ENDPOINTS
            .iter()
            .map(|e| format!("/api/{}", e.name))
            .collect(),
    })
}

/// GET /api/healthCheck
///
/// Reports whether each credential is present, never its value.
pub async fn api_health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let environment_status = Credential::ALL
        .into_iter()
        .map(|credential| {
            let status = if state.credentials.is_configured(credential) {
                "Configured"
            } else {
                "Missing"
            };
            (credential.env_var(), status)
        })
        .collect();

    Json(HealthCheckResponse {
        status: "OK",
        message: RUNNING_MESSAGE,
        timestamp: Utc::now().to_rfc3339(),
        api_endpoints: ENDPOINTS.to_vec(),
        environment_status,
    })
}

/// Build status routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api", get(api_index))
        .route("/api/healthCheck", get(api_health_check))
}
