//! Prompt construction for generated text and images

use cosmic_common::{BodyClass, PlanetQuery};

use super::species::SpeciesInfo;

/// Landscape prompt, or `None` for bodies we do not render
pub fn landscape_prompt(planet: &PlanetQuery) -> Option<String> {
    let name = planet.name();
    let prompt = match planet.class() {
        BodyClass::Terrestrial => {
            let detail = match planet.key() {
                "mars" => "reddish rocks and soil, thin hazy atmosphere",
                "venus" => "scorching hot surface under thick yellowish clouds, crushing atmospheric pressure",
                "mercury" => "heavily cratered surface like the Moon, extreme temperature swings, no atmosphere",
                _ => "varied rocky terrain",
            };
            format!(
                "A highly detailed, photo-realistic landscape seen from the surface of the planet {name}. \
                 Based on scientific data ({detail}). Daytime, conditions appropriate for the planet. \
                 Vast perspective, wide angle view."
            )
        }
        BodyClass::GasGiant => {
            let rings = if planet.key() == "saturn" {
                " Prominent, detailed planetary rings clearly visible."
            } else {
                ""
            };
            format!(
                "A highly detailed, photo-realistic view from high orbit looking down at the turbulent, \
                 swirling cloud tops and atmospheric bands of the gas giant {name}. \
                 Dramatic lighting, deep space background.{rings}"
            )
        }
        BodyClass::IceGiant => {
            let tone = if planet.key() == "uranus" {
                "with cyan and teal tones"
            } else {
                "with deep blue tones"
            };
            format!(
                "A highly detailed, photo-realistic visualization from inside the atmosphere of {name}. \
                 Based on scientific data (hazy cloud tops {tone}, swirling gas formations, intense storms, \
                 extreme conditions). Wide angle view of the environment of an ice giant."
            )
        }
        BodyClass::Star => "Standing on the surface of the Sun in a surreal, impossible scene: molten solar \
             flares erupt like dancing infernos, the sky is a swirl of glowing plasma and golden storm clouds, \
             the ground a sea of churning lava reflecting blinding light. A figure in a futuristic heat-proof \
             exosuit glowing with blue energy stands among pillars of fire and magnetic storms. \
             Cinematic wide-angle view, extreme lighting contrast, hyperreal detail, science fiction \
             atmosphere, lens flares and volumetric light."
            .to_string(),
        BodyClass::Other => return None,
    };
    Some(prompt)
}

/// Habitat preamble placed before the species request
fn habitat_preamble(planet: &PlanetQuery) -> String {
    let name = planet.name();
    match planet.key() {
        "mercury" | "venus" | "mars" => format!(
            "Imagine that in a protected environment or under special evolutionary conditions on {name}, \
             life has evolved to survive the extreme conditions. "
        ),
        "jupiter" | "saturn" => format!(
            "Imagine that in the upper atmosphere of {name}, life has evolved to survive the gaseous environment. "
        ),
        "uranus" | "neptune" => format!(
            "Imagine that in the outer atmospheric layers of {name}, where temperatures and pressures are \
             more moderate, unique life has evolved. "
        ),
        _ => String::new(),
    }
}

/// Request for exactly three species as a JSON array
pub fn species_prompt(planet: &PlanetQuery) -> String {
    format!(
        "{preamble}Invent exactly three distinct hypothetical species that might evolve there:\n\
         1. One plausible micro-organism.\n\
         2. One plausible animal-like creature (non-sentient).\n\
         3. One plausible sentient humanoid-like species.\n\
         \n\
         For each species, provide a creative name and a detailed description (100-150 words) covering:\n\
         - Physical appearance and adaptations to the environment\n\
         - Feeding habits and diet\n\
         - Natural habitat\n\
         - Notable behaviors and social structures (if applicable)\n\
         - One interesting and unique fact\n\
         \n\
         Respond ONLY with a valid JSON array of three objects. Each object must have the keys \
         \"category\" (one of \"Micro-organism\", \"Animal\", \"Humanoid\"), \"name\" and \"description\". \
         Example object: {{\"category\": \"Animal\", \"name\": \"Rock-Skimmer\", \"description\": \"...\"}}",
        preamble = habitat_preamble(planet)
    )
}

/// Illustration prompt for one generated species
pub fn species_image_prompt(species: &SpeciesInfo, planet: &PlanetQuery) -> String {
    format!(
        "Detailed scientific illustration of a hypothetical {category} named \"{name}\" from planet {planet}. \
         Appearance based on this description: \"{description}\". \
         Neutral background, high detail, photorealistic style.",
        category = species.category.label().to_lowercase(),
        name = species.name,
        planet = planet.name(),
        description = species.description,
    )
}

/// Request for an encyclopedic overview of a body
pub fn description_prompt(planet: &PlanetQuery) -> String {
    format!(
        "Write an engaging, scientifically accurate description of {name} for a general audience in \
         two short paragraphs. Cover its physical characteristics, atmosphere, notable features, and \
         one surprising fact. Respond with plain text only.",
        name = planet.name()
    )
}
