use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use deck_core::{
    update, AppState, Effect, FetchPurpose, List, Msg, PopulateDraft, PopulateStage,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn draft(search_url: &str) -> PopulateDraft {
    PopulateDraft {
        search_url: search_url.to_owned(),
        ..Default::default()
    }
}

#[test]
fn submission_emits_populate_and_saves_the_form() {
    init_logging();
    let state = AppState::new();
    let draft = PopulateDraft {
        search_url: "https://x/search?kw=eng".to_owned(),
        profile_limit: 50,
        collect_only: true,
        ..Default::default()
    };

    let (state, effects) = update(state, Msg::PopulateSubmitted { draft: draft.clone() });

    assert_eq!(state.populate_stage(), PopulateStage::Submitting);
    assert_eq!(
        effects,
        vec![
            Effect::SubmitPopulate {
                draft: draft.clone()
            },
            Effect::SavePreferences,
        ]
    );
    assert_eq!(state.last_populate(), &draft);
    assert_eq!(state.preferences().last_populate, Some(draft));
}

#[test]
fn empty_or_relative_search_url_is_rejected() {
    init_logging();
    for bad in ["", "   ", "search?kw=eng", "ftp://x/search"] {
        let state = AppState::new();
        let (state, effects) = update(
            state,
            Msg::PopulateSubmitted {
                draft: draft(bad),
            },
        );
        assert_eq!(state.populate_stage(), PopulateStage::Idle, "input: {bad:?}");
        assert!(effects.is_empty(), "input: {bad:?}");
        assert!(state.view(t0()).error.is_some(), "input: {bad:?}");
    }
}

#[test]
fn zero_profile_limit_is_rejected() {
    init_logging();
    let mut bad = draft("https://x/search?kw=eng");
    bad.profile_limit = 0;

    let (state, effects) = update(AppState::new(), Msg::PopulateSubmitted { draft: bad });

    assert!(effects.is_empty());
    assert_eq!(state.populate_stage(), PopulateStage::Idle);
}

#[test]
fn duplicate_submission_is_ignored_while_in_flight() {
    init_logging();
    let (state, _effects) = update(
        AppState::new(),
        Msg::PopulateSubmitted {
            draft: draft("https://x/search?kw=eng"),
        },
    );
    assert_eq!(state.populate_stage(), PopulateStage::Submitting);

    let (state, effects) = update(
        state,
        Msg::PopulateSubmitted {
            draft: draft("https://x/search?kw=other"),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.last_populate().search_url,
        "https://x/search?kw=eng"
    );
}

#[test]
fn ack_triggers_a_refresh_and_the_new_list_appears() {
    init_logging();
    let now = t0();
    let (state, _effects) = update(
        AppState::new(),
        Msg::PopulateSubmitted {
            draft: draft("https://x/search?kw=eng"),
        },
    );

    let (state, effects) = update(state, Msg::PopulateAcked { result: Ok(()) });
    assert_eq!(
        effects,
        vec![Effect::FetchLists {
            generation: state.generation(),
            purpose: FetchPurpose::Refresh,
        }]
    );

    // The backend created the list with a zero count and fresh timestamp.
    let fresh = List {
        id: "list-9".to_owned(),
        name: "kw=eng".to_owned(),
        search_url: "https://x/search?kw=eng".to_owned(),
        profile_count: 0,
        created_at: Some(now),
    };
    let generation = state.generation();
    let (state, _effects) = update(
        state,
        Msg::ListsFetched {
            generation,
            purpose: FetchPurpose::Refresh,
            result: Ok(vec![fresh]),
            now,
        },
    );

    let view = state.view(now);
    assert_eq!(view.lists.len(), 1);
    assert_eq!(view.lists[0].profile_count, 0);
    assert!(view.lists[0].processing);
    assert_eq!(state.populate_stage(), PopulateStage::Polling);
}

#[test]
fn rejected_submission_surfaces_the_backend_message() {
    init_logging();
    let (state, _effects) = update(
        AppState::new(),
        Msg::PopulateSubmitted {
            draft: draft("https://x/search?kw=eng"),
        },
    );

    let (state, effects) = update(
        state,
        Msg::PopulateAcked {
            result: Err("rate limited".to_owned()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.populate_stage(), PopulateStage::Idle);
    assert_eq!(state.view(t0()).error.as_deref(), Some("rate limited"));
}
