use gallery_core::{
    update, AppState, Effect, ImageRecord, Msg, Notification, PageOutcome, PageRequest,
    SessionPhase, EMPTY_QUERY_WARNING, FETCH_FAILED_FAILURE, NO_MATCHES_FAILURE, PAGE_SIZE,
};
use pretty_assertions::assert_eq;

fn submit_query(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn fetch_request(effects: &[Effect]) -> PageRequest {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage(request) => Some(request.clone()),
            _ => None,
        })
        .expect("fetch effect")
}

fn images(first_id: u64, count: usize) -> Vec<ImageRecord> {
    (0..count as u64)
        .map(|offset| ImageRecord {
            id: first_id + offset,
            tags: format!("tag{}", first_id + offset),
            ..ImageRecord::default()
        })
        .collect()
}

fn load_page(
    state: AppState,
    request: &PageRequest,
    items: Vec<ImageRecord>,
    total: u64,
) -> (AppState, Vec<Effect>) {
    let outcome = PageOutcome::classify(items, total, request.page, request.page_size);
    update(
        state,
        Msg::PageLoaded {
            request_id: request.request_id,
            outcome,
        },
    )
}

#[test]
fn submit_trims_query_and_requests_first_page() {
    engine_logging::initialize_for_tests();
    let (mut state, effects) = submit_query(AppState::new(), "  cats  ");

    assert_eq!(
        effects,
        vec![
            Effect::ClearGallery,
            Effect::FetchPage(PageRequest {
                request_id: 1,
                query: "cats".to_string(),
                page: 1,
                page_size: PAGE_SIZE,
            }),
        ]
    );
    let view = state.view();
    assert_eq!(view.phase, SessionPhase::Active);
    assert_eq!(view.query, "cats");
    assert_eq!(view.page, 1);
    assert!(view.fetch_in_flight);
    assert!(!view.load_more_visible);
    assert!(state.consume_dirty());
}

#[test]
fn empty_or_blank_query_warns_without_fetching() {
    engine_logging::initialize_for_tests();
    for input in ["", "   ", "\t\n "] {
        let (state, effects) = submit_query(AppState::new(), input);
        assert_eq!(
            effects,
            vec![Effect::Notify(Notification::Warning(
                EMPTY_QUERY_WARNING.to_string()
            ))]
        );
        assert_eq!(state.view().phase, SessionPhase::Idle);
        assert!(!state.view().fetch_in_flight);
    }
}

#[test]
fn blank_submit_keeps_the_running_session() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "cats");
    let request = fetch_request(&effects);
    let (state, _) = load_page(state, &request, images(1, 40), 500);

    let (state, effects) = submit_query(state, "  ");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().query, "cats");
    assert_eq!(state.view().rendered_count, 40);
}

#[test]
fn new_submit_resets_page_and_clears_results() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "cats");
    let first = fetch_request(&effects);
    let (state, _) = load_page(state, &first, images(1, 40), 500);
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let second = fetch_request(&effects);
    assert_eq!(second.page, 2);
    let (state, _) = load_page(state, &second, images(41, 40), 500);
    assert_eq!(state.view().rendered_count, 80);

    let (state, effects) = submit_query(state, "dogs");
    assert_eq!(effects[0], Effect::ClearGallery);
    let request = fetch_request(&effects);
    assert_eq!(request.query, "dogs");
    assert_eq!(request.page, 1);
    let view = state.view();
    assert_eq!(view.page, 1);
    assert_eq!(view.rendered_count, 0);
    assert_eq!(view.total_available, None);
    assert!(!view.load_more_visible);
}

#[test]
fn first_page_success_notifies_total_and_renders() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "cats");
    let request = fetch_request(&effects);
    let page = images(1, 40);

    let (state, effects) = load_page(state, &request, page.clone(), 95);

    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notification::Success {
                total_available: 95
            }),
            Effect::RenderItems(page),
        ]
    );
    let view = state.view();
    assert_eq!(view.phase, SessionPhase::Active);
    assert_eq!(view.total_available, Some(95));
    assert!(view.load_more_visible);
    assert!(!view.fetch_in_flight);
}

#[test]
fn no_matches_notifies_failure_and_renders_nothing() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "zzzzqqq");
    let request = fetch_request(&effects);

    let (state, effects) = load_page(state, &request, Vec::new(), 0);

    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::Failure(
            NO_MATCHES_FAILURE.to_string()
        ))]
    );
    let view = state.view();
    assert_eq!(view.phase, SessionPhase::Exhausted);
    assert_eq!(view.rendered_count, 0);
    assert!(!view.load_more_visible);
}

#[test]
fn failed_first_page_notifies_and_ends_session() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "cats");
    let request = fetch_request(&effects);

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: request.request_id,
            outcome: PageOutcome::failure("network error: connection refused"),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::Failure(
            FETCH_FAILED_FAILURE.to_string()
        ))]
    );
    assert_eq!(state.view().phase, SessionPhase::Exhausted);
    assert!(!state.view().fetch_in_flight);
}

#[test]
fn resubmit_while_fetching_supersedes_the_old_request() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "cats");
    let stale = fetch_request(&effects);
    let (state, effects) = submit_query(state, "dogs");
    let current = fetch_request(&effects);
    assert_ne!(stale.request_id, current.request_id);

    let (state, effects) = load_page(state, &stale, images(1, 40), 500);
    assert!(effects.is_empty());
    assert!(state.view().fetch_in_flight);
    assert_eq!(state.view().rendered_count, 0);

    let (state, effects) = load_page(state, &current, images(100, 40), 500);
    assert_eq!(effects.len(), 2);
    assert_eq!(state.view().rendered_count, 40);
    assert!(!state.view().fetch_in_flight);
}

#[test]
fn submit_after_exhaustion_restarts_at_page_one() {
    engine_logging::initialize_for_tests();
    let (state, effects) = submit_query(AppState::new(), "cats");
    let request = fetch_request(&effects);
    let (state, _) = load_page(state, &request, Vec::new(), 0);
    assert_eq!(state.view().phase, SessionPhase::Exhausted);

    let (state, effects) = submit_query(state, "cats");
    let request = fetch_request(&effects);
    assert_eq!(request.page, 1);
    assert_eq!(state.view().phase, SessionPhase::Active);
    assert!(!state.session().end_of_results());
    assert!(!state.session().end_message_shown());
}
