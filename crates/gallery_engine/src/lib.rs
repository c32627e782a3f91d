//! Gallery engine: image-search requests and effect execution.
mod engine;
mod fetch;
mod response;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use fetch::{fetch_page, FetchSettings, ImageSearch, ReqwestImageSearch, DEFAULT_ENDPOINT};
pub use response::{Hit, SearchResponse};
pub use types::{EngineError, EngineEvent, FailureKind, FetchError};
