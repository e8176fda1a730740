//! Media endpoints
//!
//! - `GET /api/getApod` (no parameters)
//! - `GET /api/getNasaImages?planet=<name>`
//! - `GET /api/getPlanetVideos?planet=<name>`

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use cosmic_common::config::Credential;
use serde::Serialize;
use tracing::{error, info};

use super::{planet_param, require_credential, PlanetQueryParams};
use crate::services::nasa_images::{select_images, MAX_IMAGES};
use crate::services::{ApodSummary, NasaImage, UpstreamError, Video};
use crate::{ApiError, ApiResult, AppState};

/// Edge caching for the picture of the day (one hour, short revalidation window)
pub const APOD_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate=59";

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<NasaImage>,
}

#[derive(Debug, Serialize)]
pub struct VideosResponse {
    pub videos: Vec<Video>,
}

/// GET /api/getApod
///
/// **Response:** `{title, explanation, url, hdurl?, media_type, date, copyright?}`
///
/// **Errors:**
/// - upstream status with the upstream body as `details` on non-2xx
/// - 500 on transport or parse failure
pub async fn get_apod(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let api_key = require_credential(&state, Credential::Nasa)?;

    info!("Fetching astronomy picture of the day");

    let apod = state.apod.fetch_today(api_key).await.map_err(|e| match e {
        UpstreamError::Status { status, body } => {
            error!(status, body = %body, "NASA APOD request failed");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            ApiError::upstream_status(
                status,
                format!(
                    "NASA APOD API request failed: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string(),
                Some(body),
            )
        }
        other => {
            error!(error = %other, "NASA APOD fetch failed");
            ApiError::upstream(format!("Failed to fetch APOD data: {}", other))
        }
    })?;

    let summary = ApodSummary::from(apod);
    info!(title = %summary.title, date = %summary.date, "APOD fetched");

    Ok((
        [(header::CACHE_CONTROL, APOD_CACHE_CONTROL)],
        Json(summary),
    ))
}

/// GET /api/getNasaImages?planet=<name>
///
/// Returns a random selection of at most ten usable images.
pub async fn get_nasa_images(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<ImagesResponse>> {
    let planet = planet_param(params)?;
    require_credential(&state, Credential::Nasa)?;

    info!(planet = %planet, "Searching NASA images");

    let images = state.nasa_images.search(planet.name()).await.map_err(|e| {
        error!(planet = %planet, error = %e, "NASA image search failed");
        ApiError::upstream(format!("Failed to fetch NASA images: {}", e))
    })?;

    let images = select_images(images, MAX_IMAGES, &mut rand::thread_rng());
    info!(planet = %planet, count = images.len(), "NASA images selected");

    Ok(Json(ImagesResponse { images }))
}

/// GET /api/getPlanetVideos?planet=<name>
pub async fn get_planet_videos(
    State(state): State<AppState>,
    params: PlanetQueryParams,
) -> ApiResult<Json<VideosResponse>> {
    let planet = planet_param(params)?;
    let api_key = require_credential(&state, Credential::YouTube)?;

    info!(planet = %planet, "Searching planet videos");

    let videos = state
        .youtube
        .search_videos(planet.name(), api_key)
        .await
        .map_err(|e| {
            error!(planet = %planet, error = %e, "YouTube search failed");
            ApiError::upstream(format!("Failed to fetch YouTube videos: {}", e))
        })?;

    info!(planet = %planet, count = videos.len(), "Planet videos fetched");

    Ok(Json(VideosResponse { videos }))
}

/// Build media routes
pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/api/getApod", get(get_apod))
        .route("/api/getNasaImages", get(get_nasa_images))
        .route("/api/getPlanetVideos", get(get_planet_videos))
}
