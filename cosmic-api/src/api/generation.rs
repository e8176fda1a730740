//! Generated content endpoints
//!
//! - `GET /api/generateLandscape?planet=<name>`: one fal.ai image
//! - `GET /api/generateSpecies?planet=<name>`: one chat completion, then one
//!   fal.ai image per species in parallel

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use cosmic_common::config::Credential;
use serde::Serialize;
use tracing::{error, info};

use super::{planet_param, require_credential, PlanetQueryParams};
use crate::services::fal::LANDSCAPE_MODEL;
use crate::services::prompts::{landscape_prompt, species_prompt};
use crate::services::species::{illustrate_species, parse_species_list};
use crate::services::{ChatRequest, ImageRequest, SpeciesInfo};
use crate::{ApiError, ApiResult, AppState};

const LANDSCAPE_WIDTH: u32 = 1024;
const LANDSCAPE_HEIGHT: u32 = 576;

const SPECIES_TEMPERATURE: f32 = 0.8;
const SPECIES_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeResponse {
    /// `null` when generation was skipped for this body
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpeciesResponse {
    pub species: Vec<SpeciesInfo>,
}

/// GET /api/generateLandscape?planet=<name>
///
/// Bodies without a landscape prompt answer 200 with `imageUrl: null` and a
/// message instead of calling the image service.
pub async fn generate_landscape(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<LandscapeResponse>> {
    let planet = planet_param(params)?;
    let api_key = require_credential(&state, Credential::Fal)?;

    let Some(prompt) = landscape_prompt(&planet) else {
        info!(planet = %planet, "No landscape prompt for body, skipping generation");
        return Ok(Json(LandscapeResponse {
            image_url: None,
            message: Some(format!("Image generation skipped for {}.", planet)),
        }));
    };

    info!(planet = %planet, model = LANDSCAPE_MODEL, "Generating landscape");

    let input = ImageRequest {
        prompt,
        width: LANDSCAPE_WIDTH,
        height: LANDSCAPE_HEIGHT,
    };

    let output = state
        .fal
        .generate(api_key, LANDSCAPE_MODEL, &input)
        .await
        .map_err(|e| {
            error!(planet = %planet, error = %e, "Landscape generation failed");
            ApiError::upstream(format!("Internal Server Error generating landscape: {}", e))
        })?;

    let Some(url) = output.first_url() else {
        error!(planet = %planet, "Landscape generation returned no image URL");
        return Err(ApiError::upstream_status(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "AI image generation succeeded but no URL found in response.",
            serde_json::to_string(&output).ok(),
        ));
    };

    info!(planet = %planet, "Landscape generated");

    Ok(Json(LandscapeResponse {
        image_url: Some(url.to_string()),
        message: None,
    }))
}

/// GET /api/generateSpecies?planet=<name>
///
/// **Errors:**
/// - 500: language-model failure or a reply that is not three valid species
///
/// Image failures never fail the request; the affected entry's `imageUrl` is
/// `null`. A missing fal.ai key leaves every `imageUrl` null.
pub async fn generate_species(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<SpeciesResponse>> {
    let planet = planet_param(params)?;
    let openai_key = require_credential(&state, Credential::OpenAi)?;

    info!(planet = %planet, "Generating species descriptions");

    let request = ChatRequest {
        prompt: species_prompt(&planet),
        temperature: SPECIES_TEMPERATURE,
        max_tokens: SPECIES_MAX_TOKENS,
    };

    let mut species = state
        .openai
        .complete(openai_key, &request)
        .await
        .and_then(|content| parse_species_list(&content))
        .map_err(|e| {
            error!(planet = %planet, error = %e, "Species description generation failed");
            ApiError::upstream(format!("Failed to get species descriptions: {}", e))
        })?;

    let fal_key = state.credentials.get(Credential::Fal);
    illustrate_species(&state.fal, fal_key, &mut species, &planet).await;

    Ok(Json(SpeciesResponse { species }))
}

/// Build generated content routes
pub fn generation_routes() -> Router<AppState> {
    Router::new()
        .route("/api/generateLandscape", get(generate_landscape))
        .route("/api/generateSpecies", get(generate_species))
}
