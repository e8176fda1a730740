//! Hypothetical species generation
//!
//! Two stages:
//! 1. One chat completion yields three species descriptions as a JSON array.
//! 2. One image request per species runs concurrently. Each image succeeds or
//!    fails on its own; a failure leaves that species' `imageUrl` null and
//!    never fails the batch.

use cosmic_common::PlanetQuery;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::fal::{FalClient, ImageRequest, SPECIES_MODEL};
use super::prompts::species_image_prompt;
use super::UpstreamError;

/// Number of species requested from the language model
pub const SPECIES_COUNT: usize = 3;

const SPECIES_IMAGE_SIZE: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeciesCategory {
    #[serde(rename = "Micro-organism")]
    MicroOrganism,
    Animal,
    Humanoid,
}

impl SpeciesCategory {
    pub fn label(self) -> &'static str {
        match self {
            SpeciesCategory::MicroOrganism => "Micro-organism",
            SpeciesCategory::Animal => "Animal",
            SpeciesCategory::Humanoid => "Humanoid",
        }
    }

    /// Lenient label match; models are not consistent about hyphens or case
    fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "microorganism" => Some(SpeciesCategory::MicroOrganism),
            "animal" => Some(SpeciesCategory::Animal),
            "humanoid" => Some(SpeciesCategory::Humanoid),
            _ => None,
        }
    }
}

/// One generated species
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesInfo {
    pub category: SpeciesCategory,
    pub name: String,
    pub description: String,
    /// Always serialized; `null` when no image could be generated
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSpecies {
    category: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawSpecies {
    fn validate(self) -> Option<SpeciesInfo> {
        Some(SpeciesInfo {
            category: SpeciesCategory::from_label(&required(self.category)?)?,
            name: required(self.name)?,
            description: required(self.description)?,
            image_url: None,
        })
    }
}

/// Parse the model's reply into exactly three species
///
/// Models often wrap the array in prose or code fences, so the text between
/// the first `[` and the last `]` is parsed when both are present.
pub fn parse_species_list(content: &str) -> Result<Vec<SpeciesInfo>, UpstreamError> {
    let trimmed = content.trim();
    let json = match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        _ => {
            warn!("No JSON array brackets in species content, parsing as-is");
            trimmed
        }
    };

    let raw: Vec<RawSpecies> = serde_json::from_str(json)
        .map_err(|e| UpstreamError::Parse(format!("species content is not a JSON array: {}", e)))?;

    if raw.len() != SPECIES_COUNT {
        return Err(UpstreamError::Parse(format!(
            "expected {} species, got {}",
            SPECIES_COUNT,
            raw.len()
        )));
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, species)| {
            species.validate().ok_or_else(|| {
                UpstreamError::Parse(format!("invalid species object at index {}", index))
            })
        })
        .collect()
}

/// Generate one illustration per species concurrently
///
/// Without a fal.ai key every image is skipped; the descriptions still stand.
pub async fn illustrate_species(
    fal: &FalClient,
    api_key: Option<&str>,
    species: &mut [SpeciesInfo],
    planet: &PlanetQuery,
) {
    let Some(api_key) = api_key else {
        warn!(planet = %planet, "FAL_KEY not configured, species images skipped");
        for entry in species.iter_mut() {
            entry.image_url = None;
        }
        return;
    };

    let requests = species.iter().map(|entry| {
        let input = ImageRequest {
            prompt: species_image_prompt(entry, planet),
            width: SPECIES_IMAGE_SIZE,
            height: SPECIES_IMAGE_SIZE,
        };
        let name = entry.name.clone();
        async move {
            match fal.generate(api_key, SPECIES_MODEL, &input).await {
                Ok(output) => {
                    let url = output.first_url().map(str::to_string);
                    if url.is_none() {
                        warn!(species = %name, "fal.ai response carried no image URL");
                    }
                    url
                }
                Err(e) => {
                    warn!(species = %name, error = %e, "Species image generation failed");
                    None
                }
            }
        }
    });

    let urls = join_all(requests).await;
    let generated = urls.iter().filter(|u| u.is_some()).count();

    for (entry, url) in species.iter_mut().zip(urls) {
        entry.image_url = url;
    }

    info!(
        planet = %planet,
        generated,
        requested = species.len(),
        "Species image generation finished"
    );
}
