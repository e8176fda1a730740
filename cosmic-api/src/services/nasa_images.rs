//! NASA Image and Video Library search client

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{join_url, status_error, UpstreamError};

/// Maximum number of images returned to the frontend carousel
pub const MAX_IMAGES: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    collection: Option<Collection>,
}

#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    data: Vec<ItemData>,
    #[serde(default)]
    links: Vec<ItemLink>,
}

#[derive(Debug, Deserialize)]
struct ItemData {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemLink {
    href: Option<String>,
}

/// Shaped image entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NasaImage {
    pub url: String,
    pub title: String,
}

impl SearchItem {
    /// First link and first title; items missing either are dropped
    fn into_image(self) -> Option<NasaImage> {
        let url = self.links.into_iter().next()?.href.filter(|h| !h.is_empty())?;
        let title = self.data.into_iter().next()?.title.filter(|t| !t.is_empty())?;
        Some(NasaImage { url, title })
    }
}

pub struct NasaImageClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl NasaImageClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Search the image library and keep usable entries, in upstream order
    pub async fn search(&self, query: &str) -> Result<Vec<NasaImage>, UpstreamError> {
        let url = join_url(&self.base_url, "search");

        tracing::debug!(query = %query, url = %url, "Querying NASA image library");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("media_type", "image")])
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        let items = search.collection.map(|c| c.items).unwrap_or_default();
        let total = items.len();
        let images: Vec<NasaImage> = items.into_iter().filter_map(SearchItem::into_image).collect();

        tracing::debug!(total, usable = images.len(), "NASA image search complete");
        Ok(images)
    }
}

/// Shuffle and keep at most `limit` images
pub fn select_images<R: Rng + ?Sized>(
    mut images: Vec<NasaImage>,
    limit: usize,
    rng: &mut R,
) -> Vec<NasaImage> {
    images.shuffle(rng);
    images.truncate(limit);
    images
}
