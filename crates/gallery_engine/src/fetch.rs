use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use futures_util::StreamExt;
use gallery_core::{ImageRecord, PageOutcome, PageRequest};
use url::Url;

use crate::{FailureKind, FetchError, SearchResponse};

pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

// Fixed request contract of the upstream API.
const IMAGE_TYPE: &str = "photo";
const ORIENTATION: &str = "horizontal";
const SAFESEARCH: &str = "true";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// One call to the image-search endpoint.
#[async_trait::async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search(&self, request: &PageRequest) -> Result<SearchResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestImageSearch {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestImageSearch {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Builds the GET url for `request`, query parameters included.
    pub fn request_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("key", &self.settings.api_key)
            .append_pair("q", &request.query)
            .append_pair("image_type", IMAGE_TYPE)
            .append_pair("orientation", ORIENTATION)
            .append_pair("page", &request.page.to_string())
            .append_pair("safesearch", SAFESEARCH)
            .append_pair("per_page", &request.page_size.to_string());
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ImageSearch for ReqwestImageSearch {
    async fn search(&self, request: &PageRequest) -> Result<SearchResponse, FetchError> {
        let url = self.request_url(request)?;
        engine_debug!(
            "GET {} q={:?} page={} per_page={}",
            self.settings.endpoint,
            request.query,
            request.page,
            request.page_size
        );

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Fetches one page and classifies it. Errors never escape: they are logged
/// and returned as `PageOutcome::Failure`.
pub async fn fetch_page(search: &dyn ImageSearch, request: &PageRequest) -> PageOutcome {
    match search.search(request).await {
        Ok(response) => {
            let items: Vec<ImageRecord> = response.hits.into_iter().map(ImageRecord::from).collect();
            engine_debug!(
                "Request {} page {} returned {} hits of {}",
                request.request_id,
                request.page,
                items.len(),
                response.total_hits
            );
            PageOutcome::classify(items, response.total_hits, request.page, request.page_size)
        }
        Err(err) => {
            engine_error!(
                "Error fetching page {} for {:?}: {}",
                request.page,
                request.query,
                err
            );
            PageOutcome::failure(err.to_string())
        }
    }
}

// The url carries the api key; keep it out of messages.
fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let err = err.without_url();
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
