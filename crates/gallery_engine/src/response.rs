use gallery_core::ImageRecord;
use serde::Deserialize;

/// Body returned by the image-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    /// Matches reachable through the API; drives pagination.
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    pub hits: Vec<Hit>,
}

/// Partial schema for each hit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hit {
    pub id: u64,
    #[serde(rename = "pageURL", default)]
    pub page_url: String,
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "previewURL", default)]
    pub preview_url: String,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub user: String,
}

impl From<Hit> for ImageRecord {
    fn from(hit: Hit) -> Self {
        ImageRecord {
            id: hit.id,
            page_url: hit.page_url,
            tags: hit.tags,
            preview_url: hit.preview_url,
            webformat_url: hit.webformat_url,
            large_image_url: hit.large_image_url,
            likes: hit.likes,
            views: hit.views,
            comments: hit.comments,
            downloads: hit.downloads,
            user: hit.user,
        }
    }
}
