//! Planet naming and classification
//!
//! Every planet endpoint receives the body name as a free-form query string.
//! `PlanetQuery` keeps the caller's spelling for display and a lowercase key
//! for lookups, so "Mars", "mars" and "MARS" all resolve to the same body.

use crate::{Error, Result};
use std::fmt;

/// Broad physical class of a solar-system body
///
/// Drives prompt selection for generated landscapes and species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    /// Mercury, Venus, Earth, Mars
    Terrestrial,
    /// Jupiter, Saturn
    GasGiant,
    /// Uranus, Neptune
    IceGiant,
    /// The Sun
    Star,
    /// Anything else (dwarf planets, moons, unknown names)
    Other,
}

impl BodyClass {
    /// Classify a lowercase body key
    pub fn of(key: &str) -> Self {
        match key {
            "mercury" | "venus" | "earth" | "mars" => BodyClass::Terrestrial,
            "jupiter" | "saturn" => BodyClass::GasGiant,
            "uranus" | "neptune" => BodyClass::IceGiant,
            "sun" => BodyClass::Star,
            _ => BodyClass::Other,
        }
    }
}

/// Validated `planet` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetQuery {
    name: String,
    key: String,
}

impl PlanetQuery {
    /// Validate a raw query value
    ///
    /// Missing or blank values are rejected with [`Error::InvalidInput`].
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let name = raw.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Planet query parameter is required.".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            key: name.to_lowercase(),
        })
    }

    /// Name as supplied by the caller (trimmed)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase lookup key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn class(&self) -> BodyClass {
        BodyClass::of(&self.key)
    }
}

impl fmt::Display for PlanetQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
