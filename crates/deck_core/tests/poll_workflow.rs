use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use deck_core::{update, AppState, Effect, FetchPurpose, List, Msg, Page, PopulateStage};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn list(id: &str, count: u64, created_at: DateTime<Utc>) -> List {
    List {
        id: id.to_owned(),
        name: format!("List {id}"),
        search_url: "https://x/search?kw=eng".to_owned(),
        profile_count: count,
        created_at: Some(created_at),
    }
}

fn started() -> AppState {
    let (state, _effects) = update(AppState::new(), Msg::Started);
    state
}

fn refresh(state: AppState, lists: Vec<List>, now: DateTime<Utc>) -> (AppState, Vec<Effect>) {
    let generation = state.generation();
    update(
        state,
        Msg::ListsFetched {
            generation,
            purpose: FetchPurpose::Refresh,
            result: Ok(lists),
            now,
        },
    )
}

fn poll_response(state: AppState, lists: Vec<List>, now: DateTime<Utc>) -> (AppState, Vec<Effect>) {
    let generation = state.generation();
    update(
        state,
        Msg::ListsFetched {
            generation,
            purpose: FetchPurpose::Poll,
            result: Ok(lists),
            now,
        },
    )
}

#[test]
fn no_processing_lists_means_no_timer() {
    init_logging();
    let now = t0();
    let settled = vec![list("a", 12, now - Duration::hours(2))];

    let (state, effects) = refresh(started(), settled, now);

    assert!(!state.poll_active());
    assert!(!effects.contains(&Effect::StartPollTimer));

    // A stray tick with no session emits nothing.
    let (_state, effects) = update(state, Msg::PollTicked);
    assert!(effects.is_empty());
}

#[test]
fn processing_list_starts_timer_and_tick_fetches() {
    init_logging();
    let now = t0();
    let lists = vec![
        list("a", 12, now - Duration::hours(2)),
        list("b", 0, now - Duration::minutes(1)),
    ];

    let (state, effects) = refresh(started(), lists, now);
    assert!(state.poll_active());
    assert_eq!(effects, vec![Effect::StartPollTimer]);

    let (_state, effects) = update(state, Msg::PollTicked);
    assert_eq!(
        effects,
        vec![Effect::FetchLists {
            generation: 0,
            purpose: FetchPurpose::Poll,
        }]
    );
}

#[test]
fn still_processing_poll_data_is_discarded() {
    init_logging();
    let now = t0();
    let initial = vec![list("b", 0, now - Duration::minutes(1))];
    let (state, _effects) = refresh(started(), initial, now);

    // Fresh fetch still shows zero count within the window: discard.
    let later = now + Duration::seconds(5);
    let fetched = vec![list("b", 0, now - Duration::minutes(1))];
    let (state, effects) = poll_response(state, fetched, later);

    assert!(state.poll_active());
    assert!(effects.is_empty());
    let view = state.view(later);
    assert!(view.lists[0].processing);
}

#[test]
fn settles_once_count_becomes_nonzero() {
    init_logging();
    let now = t0();
    let initial = vec![list("b", 0, now - Duration::minutes(1))];
    let (state, _effects) = refresh(started(), initial, now);

    let later = now + Duration::seconds(10);
    let fetched = vec![list("b", 37, now - Duration::minutes(1))];
    let (state, effects) = poll_response(state, fetched, later);

    assert!(!state.poll_active());
    assert_eq!(effects, vec![Effect::CancelPollTimer]);
    let view = state.view(later);
    assert_eq!(view.lists[0].profile_count, 37);
    assert!(!view.lists[0].processing);

    // The loop is gone; further ticks emit nothing.
    let (_state, effects) = update(state, Msg::PollTicked);
    assert!(effects.is_empty());
}

#[test]
fn settles_when_staleness_window_elapses() {
    init_logging();
    let now = t0();
    let created = now - Duration::minutes(9);
    let (state, _effects) = refresh(started(), vec![list("b", 0, created)], now);
    assert!(state.poll_active());

    // Two minutes later the job never reported anything: settle at zero.
    let later = now + Duration::minutes(2);
    let (state, effects) = poll_response(state, vec![list("b", 0, created)], later);

    assert!(!state.poll_active());
    assert_eq!(effects, vec![Effect::CancelPollTimer]);
    let view = state.view(later);
    assert_eq!(view.lists[0].profile_count, 0);
    assert!(!view.lists[0].processing);
}

#[test]
fn vanished_list_counts_as_settled() {
    init_logging();
    let now = t0();
    let (state, _effects) = refresh(started(), vec![list("b", 0, now)], now);

    let later = now + Duration::seconds(5);
    let (state, effects) = poll_response(state, Vec::new(), later);

    assert!(!state.poll_active());
    assert_eq!(effects, vec![Effect::CancelPollTimer]);
    assert!(state.view(later).lists.is_empty());
}

#[test]
fn teardown_discards_in_flight_responses() {
    init_logging();
    let now = t0();
    let (state, _effects) = refresh(started(), vec![list("b", 0, now)], now);
    let stale_generation = state.generation();

    // Leaving the lists page drops the session and cancels the timer.
    let (state, effects) = update(state, Msg::PageSelected(Page::Senders));
    assert!(effects.contains(&Effect::CancelPollTimer));
    assert!(!state.poll_active());

    // An in-flight poll response resolving afterwards must not mutate state.
    let before = state.clone();
    let later = now + Duration::seconds(5);
    let (state, effects) = update(
        state,
        Msg::ListsFetched {
            generation: stale_generation,
            purpose: FetchPurpose::Poll,
            result: Ok(vec![list("b", 99, now)]),
            now: later,
        },
    );
    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn failed_poll_tick_is_a_noop() {
    init_logging();
    let now = t0();
    let (state, _effects) = refresh(started(), vec![list("b", 0, now)], now);

    let generation = state.generation();
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::ListsFetched {
            generation,
            purpose: FetchPurpose::Poll,
            result: Err("connection refused".to_owned()),
            now: now + Duration::seconds(5),
        },
    );

    // The session keeps its cadence and no error is surfaced.
    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn content_only_changes_never_restart_the_loop() {
    init_logging();
    let now = t0();
    let lists = vec![
        list("a", 5, now - Duration::hours(1)),
        list("b", 0, now - Duration::minutes(1)),
    ];
    let (state, _effects) = refresh(started(), lists, now);
    assert!(state.poll_active());

    // Same collection length, different content (a re-populated existing
    // list would look like this): the watch set must not be extended.
    let later = now + Duration::seconds(30);
    let changed = vec![
        list("a", 0, later),
        list("b", 0, now - Duration::minutes(1)),
    ];
    let (state, effects) = refresh(state, changed, later);
    assert!(state.poll_active());
    assert!(effects.is_empty());

    // Settling only requires the originally-watched list to finish, even
    // though "a" now classifies as processing.
    let (state, effects) = poll_response(
        state,
        vec![list("a", 0, later), list("b", 21, now)],
        later + Duration::seconds(5),
    );
    assert!(!state.poll_active());
    assert_eq!(effects, vec![Effect::CancelPollTimer]);
}

#[test]
fn count_change_reevaluates_the_session() {
    init_logging();
    let now = t0();
    let (state, _effects) = refresh(started(), vec![list("a", 5, now - Duration::hours(1))], now);
    assert!(!state.poll_active());

    // A new list appeared with a fresh zero count: a session starts.
    let later = now + Duration::minutes(1);
    let grown = vec![
        list("a", 5, now - Duration::hours(1)),
        list("b", 0, later),
    ];
    let (state, effects) = refresh(state, grown, later);
    assert!(state.poll_active());
    assert_eq!(effects, vec![Effect::StartPollTimer]);

    // Collection shrank to only settled lists: the session is dropped.
    let shrunk = vec![list("a", 5, now - Duration::hours(1))];
    let (state, effects) = refresh(state, shrunk, later + Duration::minutes(1));
    assert!(!state.poll_active());
    assert_eq!(effects, vec![Effect::CancelPollTimer]);
}

#[test]
fn refresh_resolves_submitting_into_polling_or_settled() {
    init_logging();
    let now = t0();
    let draft = deck_core::PopulateDraft {
        search_url: "https://x/search?kw=eng".to_owned(),
        ..Default::default()
    };
    let (state, _effects) = update(started(), Msg::PopulateSubmitted { draft });
    assert_eq!(state.populate_stage(), PopulateStage::Submitting);

    let (state, _effects) = update(state, Msg::PopulateAcked { result: Ok(()) });
    let (state, _effects) = refresh(state, vec![list("new", 0, now)], now);
    assert_eq!(state.populate_stage(), PopulateStage::Polling);

    let (state, _effects) = poll_response(
        state,
        vec![list("new", 8, now)],
        now + Duration::seconds(5),
    );
    assert_eq!(state.populate_stage(), PopulateStage::Settled);
}
