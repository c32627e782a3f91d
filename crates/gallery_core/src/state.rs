use crate::view_model::GalleryViewModel;
use crate::{PageRequest, RequestId, PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No query submitted yet.
    #[default]
    Idle,
    /// Pages may still be fetched.
    Active,
    /// Terminal until the next submit.
    Exhausted,
}

/// What caused a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Submit,
    LoadMore,
    Scroll,
}

/// Per-search pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
    page: u32,
    end_of_results: bool,
    end_message_shown: bool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            end_of_results: false,
            end_message_shown: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn end_of_results(&self) -> bool {
        self.end_of_results
    }

    pub fn end_message_shown(&self) -> bool {
        self.end_message_shown
    }

    pub fn phase(&self) -> SessionPhase {
        if self.query.is_empty() {
            SessionPhase::Idle
        } else if self.end_of_results {
            SessionPhase::Exhausted
        } else {
            SessionPhase::Active
        }
    }

    pub(crate) fn reset(&mut self, query: String) {
        self.query = query;
        self.page = 1;
        self.end_of_results = false;
        self.end_message_shown = false;
    }

    pub(crate) fn advance(&mut self) -> u32 {
        self.page = self.page.saturating_add(1);
        self.page
    }

    pub(crate) fn mark_end_of_results(&mut self) {
        self.end_of_results = true;
    }

    /// Returns true exactly once per exhaustion: the first time the end
    /// message is due.
    pub(crate) fn take_end_message(&mut self) -> bool {
        if self.end_message_shown {
            false
        } else {
            self.end_message_shown = true;
            true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    trigger: Trigger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    session: SearchSession,
    in_flight: Option<InFlight>,
    last_request_id: RequestId,
    rendered_count: usize,
    total_available: Option<u64>,
    load_more_visible: bool,
    scroll_to_top_visible: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            session: SearchSession::new(),
            in_flight: None,
            last_request_id: 0,
            rendered_count: 0,
            total_available: None,
            load_more_visible: false,
            scroll_to_top_visible: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> GalleryViewModel {
        GalleryViewModel {
            phase: self.session.phase(),
            query: self.session.query().to_string(),
            page: self.session.page(),
            rendered_count: self.rendered_count,
            total_available: self.total_available,
            load_more_visible: self.load_more_visible,
            scroll_to_top_visible: self.scroll_to_top_visible,
            fetch_in_flight: self.in_flight.is_some(),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    pub(crate) fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    pub(crate) fn set_load_more_visible(&mut self, visible: bool) {
        if self.load_more_visible != visible {
            self.load_more_visible = visible;
            self.dirty = true;
        }
    }

    pub(crate) fn set_scroll_to_top_visible(&mut self, visible: bool) {
        if self.scroll_to_top_visible != visible {
            self.scroll_to_top_visible = visible;
            self.dirty = true;
        }
    }

    /// Resets the session for a new query and clears rendered results.
    /// Any request still in flight is superseded.
    pub(crate) fn start_search(&mut self, query: String) {
        self.session.reset(query);
        self.rendered_count = 0;
        self.total_available = None;
        self.load_more_visible = false;
        self.in_flight = None;
        self.dirty = true;
    }

    /// Registers a request for the session's current page.
    pub(crate) fn issue_request(&mut self, trigger: Trigger) -> PageRequest {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(InFlight {
            request_id,
            trigger,
        });
        self.dirty = true;
        PageRequest {
            request_id,
            query: self.session.query().to_string(),
            page: self.session.page(),
            page_size: PAGE_SIZE,
        }
    }

    /// Clears the in-flight guard if `request_id` is the current request.
    /// Returns the trigger that issued it; `None` for stale or unknown ids.
    pub(crate) fn complete_request(&mut self, request_id: RequestId) -> Option<Trigger> {
        match self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => {
                self.in_flight = None;
                self.dirty = true;
                Some(in_flight.trigger)
            }
            _ => None,
        }
    }

    pub(crate) fn record_page(&mut self, rendered: usize, total_available: u64) {
        self.rendered_count += rendered;
        self.total_available = Some(total_available);
        self.dirty = true;
    }
}
