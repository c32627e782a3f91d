//! Gallery core: pure pagination state machine and view-model helpers.
mod effect;
mod msg;
mod page;
mod scroll;
mod state;
mod update;
mod view_model;

pub use effect::{
    Effect, Notification, EMPTY_QUERY_WARNING, END_OF_RESULTS_INFO, FETCH_FAILED_FAILURE,
    NO_MATCHES_FAILURE, NO_MORE_IMAGES_FAILURE,
};
pub use msg::Msg;
pub use page::{ImageRecord, PageOutcome, PageRequest, PageResult, RequestId, PAGE_SIZE};
pub use scroll::{ScrollMetrics, NEAR_END_THRESHOLD, SCROLL_TOP_THRESHOLD};
pub use state::{AppState, SearchSession, SessionPhase, Trigger};
pub use update::update;
pub use view_model::GalleryViewModel;
