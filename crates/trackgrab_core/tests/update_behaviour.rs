use std::sync::Once;

use pretty_assertions::assert_eq;
use trackgrab_core::{
    update, AppState, Effect, FailureReason, HistoryEntry, Msg, RequestState, ResolveOutcome,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(trackgrab_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn resolved(label: &str, link: &str) -> Msg {
    Msg::ResolveFinished(ResolveOutcome::Resolved {
        label: label.to_string(),
        link: link.to_string(),
    })
}

#[test]
fn blank_input_fails_without_effects() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "   ");

    assert_eq!(
        state.request(),
        RequestState::Failed(FailureReason::MissingUrl)
    );
    assert!(effects.is_empty());
    assert_eq!(state.raw_input(), "");
    assert!(state.history().is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.view().error_message().as_deref(), Some("missing URL"));
}

#[test]
fn submit_trims_and_requests_resolution() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "  https://open.spotify.com/track/abc \n");

    assert_eq!(state.request(), RequestState::InFlight);
    assert!(state.view().busy);
    assert_eq!(
        effects,
        vec![Effect::Resolve {
            track_url: "https://open.spotify.com/track/abc".to_string(),
        }]
    );
}

#[test]
fn success_with_link_navigates_then_appends() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://open.spotify.com/track/abc");
    let (state, effects) = update(state, resolved("Song A", "https://dl/x.mp3"));

    assert_eq!(state.request(), RequestState::Succeeded);
    assert_eq!(state.raw_input(), "");
    assert_eq!(
        state.view().last_download,
        Some(HistoryEntry::new("Song A", "https://dl/x.mp3"))
    );
    assert_eq!(
        effects,
        vec![
            Effect::Navigate {
                link: "https://dl/x.mp3".to_string(),
            },
            Effect::AppendHistory {
                entry: HistoryEntry::new("Song A", "https://dl/x.mp3"),
            },
        ]
    );
}

#[test]
fn empty_link_is_no_link_returned() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://open.spotify.com/track/b");
    let (state, effects) = update(state, resolved("Song B", ""));

    assert_eq!(
        state.request(),
        RequestState::Failed(FailureReason::NoLinkReturned)
    );
    assert!(effects.is_empty());
    assert_eq!(state.raw_input(), "");
}

#[test]
fn fault_is_request_error() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://open.spotify.com/track/c");
    let (state, effects) = update(
        state,
        Msg::ResolveFinished(ResolveOutcome::Fault("http status 500".to_string())),
    );

    assert_eq!(
        state.request(),
        RequestState::Failed(FailureReason::RequestError)
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().error_message().as_deref(),
        Some("request error")
    );
}

#[test]
fn empty_title_falls_back_to_track_url() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://open.spotify.com/track/d");
    let (_, effects) = update(state, resolved("  ", "https://dl/d.mp3"));

    assert!(effects.contains(&Effect::AppendHistory {
        entry: HistoryEntry::new("https://open.spotify.com/track/d", "https://dl/d.mp3"),
    }));
}

#[test]
fn submit_is_refused_while_in_flight() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://open.spotify.com/track/e");
    let before = state.clone();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(state, resolved("Song", "https://dl/s.mp3"));

    assert_eq!(state.request(), RequestState::Idle);
    assert!(effects.is_empty());
    assert!(state.history().is_empty());
}

#[test]
fn terminal_state_admits_next_submission() {
    init_logging();
    let (state, _) = submit(AppState::new(), "");
    assert!(state.request().is_terminal());

    let (state, effects) = submit(state, "https://open.spotify.com/track/f");
    assert_eq!(state.request(), RequestState::InFlight);
    assert_eq!(effects.len(), 1);
}

#[test]
fn dismiss_returns_to_idle_and_clears_notice() {
    init_logging();
    let (state, _) = submit(AppState::new(), "");
    let (state, _) = update(state, Msg::ClipboardFailed("denied".to_string()));
    assert!(state.view().notice.is_some());

    let (state, _) = update(state, Msg::Dismissed);
    assert_eq!(state.request(), RequestState::Idle);
    assert_eq!(state.view().notice, None);
}

#[test]
fn dismiss_is_ignored_while_in_flight() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://open.spotify.com/track/g");
    let (state, _) = update(state, Msg::Dismissed);
    assert_eq!(state.request(), RequestState::InFlight);
}
