use crate::SessionPhase;

/// Snapshot of everything the front end shows besides the cards themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryViewModel {
    pub phase: SessionPhase,
    pub query: String,
    pub page: u32,
    pub rendered_count: usize,
    pub total_available: Option<u64>,
    pub load_more_visible: bool,
    pub scroll_to_top_visible: bool,
    pub fetch_in_flight: bool,
}
