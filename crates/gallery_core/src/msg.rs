use crate::{PageOutcome, RequestId, ScrollMetrics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search input.
    InputChanged(String),
    /// User submitted the search form with the current input.
    SearchSubmitted,
    /// User activated the "load more" affordance.
    LoadMoreClicked,
    /// Scroll position changed.
    Scrolled(ScrollMetrics),
    /// Engine finished a page request.
    PageLoaded {
        request_id: RequestId,
        outcome: PageOutcome,
    },
}
