use crate::effect::{
    END_OF_RESULTS_INFO, EMPTY_QUERY_WARNING, FETCH_FAILED_FAILURE, NO_MATCHES_FAILURE,
    NO_MORE_IMAGES_FAILURE,
};
use crate::{AppState, Effect, Msg, Notification, PageOutcome, PageResult, SessionPhase, Trigger};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SearchSubmitted => submit(&mut state),
        Msg::LoadMoreClicked => load_more(&mut state),
        Msg::Scrolled(metrics) => {
            state.set_scroll_to_top_visible(metrics.shows_scroll_to_top());
            if metrics.is_near_end() {
                scroll_near_end(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded {
            request_id,
            outcome,
        } => match state.complete_request(request_id) {
            Some(trigger) => apply_outcome(&mut state, trigger, outcome),
            // Superseded by a newer search.
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    let query = state.input().trim().to_string();
    if query.is_empty() {
        return vec![Effect::Notify(Notification::Warning(
            EMPTY_QUERY_WARNING.to_string(),
        ))];
    }

    state.start_search(query);
    let request = state.issue_request(Trigger::Submit);
    vec![Effect::ClearGallery, Effect::FetchPage(request)]
}

fn load_more(state: &mut AppState) -> Vec<Effect> {
    if !state.load_more_visible() || state.is_fetching() || state.session().end_of_results() {
        return Vec::new();
    }
    state.session_mut().advance();
    vec![Effect::FetchPage(state.issue_request(Trigger::LoadMore))]
}

fn scroll_near_end(state: &mut AppState) -> Vec<Effect> {
    match state.session().phase() {
        SessionPhase::Idle => Vec::new(),
        // A last page delivered by submit defers its end message to here.
        SessionPhase::Exhausted => end_of_results_info(state),
        SessionPhase::Active if state.is_fetching() => Vec::new(),
        SessionPhase::Active => {
            state.session_mut().advance();
            vec![Effect::FetchPage(state.issue_request(Trigger::Scroll))]
        }
    }
}

fn apply_outcome(state: &mut AppState, trigger: Trigger, outcome: PageOutcome) -> Vec<Effect> {
    match outcome {
        PageOutcome::Page(result) => apply_page(state, trigger, result),
        PageOutcome::Failure { .. } => {
            finish_session(state);
            match trigger {
                Trigger::Submit | Trigger::LoadMore => {
                    state.session_mut().take_end_message();
                    vec![Effect::Notify(Notification::Failure(
                        FETCH_FAILED_FAILURE.to_string(),
                    ))]
                }
                // Treated as the end of results; there is no retry.
                Trigger::Scroll => end_of_results_info(state),
            }
        }
    }
}

fn apply_page(state: &mut AppState, trigger: Trigger, result: PageResult) -> Vec<Effect> {
    let PageResult {
        items,
        total_available,
        exhausted,
    } = result;
    let has_items = !items.is_empty();
    state.record_page(items.len(), total_available);

    let mut effects = Vec::new();
    match trigger {
        Trigger::Submit => {
            if !has_items {
                finish_session(state);
                state.session_mut().take_end_message();
                effects.push(Effect::Notify(Notification::Failure(
                    NO_MATCHES_FAILURE.to_string(),
                )));
                return effects;
            }
            effects.push(Effect::Notify(Notification::Success { total_available }));
            effects.push(Effect::RenderItems(items));
            if exhausted {
                finish_session(state);
            } else {
                state.set_load_more_visible(true);
            }
        }
        Trigger::LoadMore => {
            if has_items {
                effects.push(Effect::RenderItems(items));
            }
            if exhausted {
                finish_session(state);
                if state.session_mut().take_end_message() {
                    let notification = if has_items {
                        Notification::Info(END_OF_RESULTS_INFO.to_string())
                    } else {
                        Notification::Failure(NO_MORE_IMAGES_FAILURE.to_string())
                    };
                    effects.push(Effect::Notify(notification));
                }
            }
        }
        Trigger::Scroll => {
            if has_items {
                effects.push(Effect::RenderItems(items));
            }
            if exhausted {
                finish_session(state);
                effects.extend(end_of_results_info(state));
            }
        }
    }
    effects
}

/// Moves the session to its terminal state and hides "load more".
fn finish_session(state: &mut AppState) {
    state.session_mut().mark_end_of_results();
    state.set_load_more_visible(false);
    state.mark_dirty();
}

fn end_of_results_info(state: &mut AppState) -> Vec<Effect> {
    if state.session_mut().take_end_message() {
        state.mark_dirty();
        vec![Effect::Notify(Notification::Info(
            END_OF_RESULTS_INFO.to_string(),
        ))]
    } else {
        Vec::new()
    }
}
