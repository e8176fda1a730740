//! Planet facts endpoints
//!
//! - `GET /api/getPlanetInfo` passes the celestial-body document through
//! - `GET /api/getPlanetDescription` asks the language model for an overview
//! - `GET /api/getAstrologyInfo` serves the built-in astrology table

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use cosmic_common::config::Credential;
use serde::Serialize;
use tracing::{error, info};

use super::{planet_param, require_credential, PlanetQueryParams};
use crate::services::astrology::astrology_text;
use crate::services::prompts::description_prompt;
use crate::services::{ChatRequest, UpstreamError};
use crate::{ApiError, ApiResult, AppState};

const DESCRIPTION_TEMPERATURE: f32 = 0.8;
const DESCRIPTION_MAX_TOKENS: u32 = 600;

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyResponse {
    pub astrology_text: String,
}

/// GET /api/getPlanetInfo?planet=<name>
///
/// **Errors:**
/// - 404: the body is unknown upstream
/// - upstream status: any other non-2xx
/// - 500: transport or parse failure
pub async fn get_planet_info(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<serde_json::Value>> {
    let planet = planet_param(params)?;
    info!(planet = %planet, "Fetching planet info");

    match state.solar_system.lookup_body(planet.key()).await {
        Ok(body) => Ok(Json(body)),
        Err(UpstreamError::NotFound(_)) => {
            info!(planet = %planet, "Planet not found upstream");
            Err(ApiError::NotFound(format!("Data not found for {}", planet)))
        }
        Err(UpstreamError::Status { status, body }) => {
            error!(planet = %planet, status, body = %body, "Celestial-body API request failed");
            Err(ApiError::upstream_status(
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                format!("Failed to fetch data from external API for {}", planet),
                None,
            ))
        }
        Err(e) => {
            error!(planet = %planet, error = %e, "Planet info lookup failed");
            Err(ApiError::upstream("Internal Server Error"))
        }
    }
}

/// GET /api/getPlanetDescription?planet=<name>
pub async fn get_planet_description(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<DescriptionResponse>> {
    let planet = planet_param(params)?;
    let api_key = require_credential(&state, Credential::OpenAi)?;

    info!(planet = %planet, "Generating planet description");

    let request = ChatRequest {
        prompt: description_prompt(&planet),
        temperature: DESCRIPTION_TEMPERATURE,
        max_tokens: DESCRIPTION_MAX_TOKENS,
    };

    let description = state
        .openai
        .complete(api_key, &request)
        .await
        .map_err(|e| {
            error!(planet = %planet, error = %e, "Description generation failed");
            ApiError::upstream(format!("Failed to generate description for {}: {}", planet, e))
        })?;

    Ok(Json(DescriptionResponse {
        description: description.trim().to_string(),
    }))
}

/// GET /api/getAstrologyInfo?planet=<name>
///
/// Text comes from a built-in table, but the endpoint is gated on the
/// language-model credential like the other text endpoints.
pub async fn get_astrology_info(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<AstrologyResponse>> {
    let planet = planet_param(params)?;
    require_credential(&state, Credential::OpenAi)?;

    info!(planet = %planet, "Serving astrology info");

    Ok(Json(AstrologyResponse {
        astrology_text: astrology_text(&planet),
    }))
}

/// Build planet facts routes
pub fn planet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/getPlanetInfo", get(get_planet_info))
        .route("/api/getPlanetDescription", get(get_planet_description))
        .route("/api/getAstrologyInfo", get(get_astrology_info))
}
