use crate::{ImageRecord, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Remove every card from the gallery surface.
    ClearGallery,
    FetchPage(PageRequest),
    /// Append cards in order; the renderer re-indexes enlargeable cards afterwards.
    RenderItems(Vec<ImageRecord>),
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Warning(String),
    Success { total_available: u64 },
    Failure(String),
    Info(String),
}

pub const EMPTY_QUERY_WARNING: &str = "Please enter a search term.";
pub const NO_MATCHES_FAILURE: &str =
    "Sorry, there are no images matching your search query. Please try again!";
pub const NO_MORE_IMAGES_FAILURE: &str = "No more images to load.";
pub const FETCH_FAILED_FAILURE: &str =
    "Something went wrong while loading images. Please try again later.";
pub const END_OF_RESULTS_INFO: &str = "We're sorry, but you've reached the end of search results.";

impl Notification {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Notification::Warning(text) | Notification::Failure(text) | Notification::Info(text) => {
                text.clone()
            }
            Notification::Success { total_available } => {
                format!("Hooray! We found {total_available} images.")
            }
        }
    }
}
