//! YouTube Data API v3 search client

use serde::{Deserialize, Serialize};

use super::{join_url, status_error, UpstreamError};

/// Maximum number of videos requested from YouTube
pub const MAX_VIDEOS: u32 = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<ItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

/// Shaped video entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub thumbnail_url: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SearchItem {
    /// Medium thumbnail preferred, default as fallback; incomplete items dropped
    fn into_video(self) -> Option<Video> {
        let video_id = non_empty(self.id?.video_id)?;
        let snippet = self.snippet?;
        let title = non_empty(snippet.title)?;
        let thumbnails = snippet.thumbnails?;
        let thumbnail_url = non_empty(thumbnails.medium.and_then(|t| t.url))
            .or_else(|| non_empty(thumbnails.default.and_then(|t| t.url)))?;

        Some(Video {
            video_id,
            title,
            thumbnail_url,
        })
    }
}

pub struct YouTubeClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Search documentaries about a body
    pub async fn search_videos(
        &self,
        planet: &str,
        api_key: &str,
    ) -> Result<Vec<Video>, UpstreamError> {
        let url = join_url(&self.base_url, "search");
        let query = format!("{} planet documentary", planet);
        let max_results = MAX_VIDEOS.to_string();

        tracing::debug!(query = %query, url = %url, "Querying YouTube API");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("type", "video"),
                ("key", api_key),
                ("maxResults", max_results.as_str()),
            ])
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

        Ok(search
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .collect())
    }
}
