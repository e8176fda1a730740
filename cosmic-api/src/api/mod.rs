//! HTTP API handlers for cosmic-api
//!
//! Each planet handler validates its query, checks the credential it needs,
//! makes its upstream call(s) and shapes the answer. Handlers share no
//! mutable state.

pub mod generation;
pub mod health;
pub mod journal;
pub mod media;
pub mod planet;

pub use generation::generation_routes;
pub use health::health_routes;
pub use journal::journal_routes;
pub use media::media_routes;
pub use planet::planet_routes;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use cosmic_common::config::Credential;
use cosmic_common::PlanetQuery;
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState};

/// `?planet=<name>` query string
#[derive(Debug, Deserialize)]
pub struct PlanetParams {
    pub planet: Option<String>,
}

/// Query extraction result, kept so a malformed query still answers `{error}`
pub type PlanetQueryParams = Result<Query<PlanetParams>, QueryRejection>;

/// Validate the planet parameter
///
/// Missing, blank, repeated or otherwise undecodable values are a 400.
pub fn planet_param(params: PlanetQueryParams) -> ApiResult<PlanetQuery> {
    let Query(params) = params.map_err(|rejection| {
        tracing::warn!("Rejected planet query: {}", rejection.body_text());
        ApiError::InvalidRequest("Planet query parameter is required.".to_string())
    })?;
    PlanetQuery::parse(params.planet.as_deref()).map_err(ApiError::from)
}

/// Look up a credential or fail with a configuration error
pub(crate) fn require_credential(state: &AppState, credential: Credential) -> ApiResult<&str> {
    state.credentials.get(credential).ok_or_else(|| {
        tracing::error!("{} is not configured", credential.env_var());
        ApiError::missing_credential(credential)
    })
}
