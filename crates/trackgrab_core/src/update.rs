use crate::{AppState, Effect, FailureReason, HistoryEntry, Msg, RequestState, ResolveOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_raw_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.request().is_busy() {
                return (state, Vec::new());
            }
            state.begin_validation();
            match validate_input(state.raw_input()) {
                Some(track_url) => {
                    state.begin_resolution(track_url.clone());
                    vec![Effect::Resolve { track_url }]
                }
                None => {
                    state.fail(FailureReason::MissingUrl);
                    Vec::new()
                }
            }
        }
        Msg::ResolveFinished(outcome) => {
            // A completion without a matching in-flight request is stale.
            if state.request() != RequestState::InFlight {
                return (state, Vec::new());
            }
            let track_url = state.take_pending_url().unwrap_or_default();
            match outcome {
                ResolveOutcome::Resolved { label, link } => {
                    let link = link.trim();
                    if link.is_empty() {
                        state.fail(FailureReason::NoLinkReturned);
                        Vec::new()
                    } else {
                        let label = match label.trim() {
                            "" => track_url,
                            title => title.to_string(),
                        };
                        let entry = HistoryEntry::new(label, link);
                        state.succeed(entry.clone());
                        vec![
                            Effect::Navigate {
                                link: link.to_string(),
                            },
                            Effect::AppendHistory { entry },
                        ]
                    }
                }
                ResolveOutcome::Fault(_) => {
                    state.fail(FailureReason::RequestError);
                    Vec::new()
                }
            }
        }
        Msg::HistoryLoaded(entries) | Msg::HistoryUpdated(entries) => {
            state.set_history(entries);
            Vec::new()
        }
        Msg::HistoryWriteFailed(reason) => {
            state.set_notice(format!("Download history was not saved: {reason}"));
            Vec::new()
        }
        Msg::ClipboardRead(text) => {
            state.clear_notice();
            state.set_raw_input(text);
            Vec::new()
        }
        Msg::ClipboardFailed(reason) => {
            state.set_notice(format!("Failed to read from clipboard: {reason}"));
            Vec::new()
        }
        Msg::NavigateFailed(reason) => {
            state.set_notice(format!("Could not open the download link: {reason}"));
            Vec::new()
        }
        Msg::Dismissed => {
            if !state.request().is_busy() {
                state.dismiss();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn validate_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
