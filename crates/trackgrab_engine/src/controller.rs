use std::collections::VecDeque;

use trackgrab_core::{
    update, AppState, AppViewModel, Effect, HistoryEntry, Msg, RequestState, ResolveOutcome,
};
use trackgrab_logging::{grab_error, grab_info, grab_warn};

use crate::clipboard::{ClipboardError, ClipboardReader};
use crate::ledger::HistoryLedger;
use crate::navigate::Navigator;
use crate::resolve::Resolver;
use crate::store::KeyValueStore;

/// Receives a fresh view after every state change.
pub trait StateSink: Send + Sync {
    fn emit(&self, view: &AppViewModel);
}

/// Drives the request lifecycle: feeds messages through the pure core and
/// executes the effects it asks for against the injected collaborators.
///
/// `submit` takes `&mut self`, so a controller never has two submissions in
/// flight.
pub struct Controller {
    state: AppState,
    resolver: Box<dyn Resolver>,
    ledger: HistoryLedger<Box<dyn KeyValueStore>>,
    navigator: Box<dyn Navigator>,
    clipboard: Box<dyn ClipboardReader>,
    sink: Option<Box<dyn StateSink>>,
}

impl Controller {
    /// Builds a controller and loads the persisted history once.
    pub fn new(
        resolver: Box<dyn Resolver>,
        store: Box<dyn KeyValueStore>,
        navigator: Box<dyn Navigator>,
        clipboard: Box<dyn ClipboardReader>,
    ) -> Self {
        let ledger = HistoryLedger::open(store);
        let history = ledger.entries().to_vec();
        let mut controller = Self {
            state: AppState::new(),
            resolver,
            ledger,
            navigator,
            clipboard,
            sink: None,
        };
        controller.dispatch(Msg::HistoryLoaded(history));
        controller
    }

    pub fn with_sink(mut self, sink: Box<dyn StateSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn request_state(&self) -> RequestState {
        self.state.request()
    }

    pub fn raw_input(&self) -> &str {
        self.state.raw_input()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.ledger.entries()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::InputChanged(text.into()));
    }

    /// Replaces the input with the clipboard text. A failure only sets a notice.
    pub fn paste(&mut self) -> Result<(), ClipboardError> {
        match self.clipboard.read_text() {
            Ok(text) => {
                self.dispatch(Msg::ClipboardRead(text));
                Ok(())
            }
            Err(err) => {
                grab_warn!("Clipboard read failed: {}", err);
                self.dispatch(Msg::ClipboardFailed(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn dismiss(&mut self) {
        self.dispatch(Msg::Dismissed);
    }

    /// Runs one lifecycle for `raw_input` and returns the terminal state.
    pub async fn submit(&mut self, raw_input: &str) -> RequestState {
        self.dispatch(Msg::InputChanged(raw_input.to_string()));
        self.submit_current().await
    }

    /// Pastes the clipboard into the input and submits it. A clipboard fault
    /// ends the run before any request, with the fault left as the notice.
    pub async fn submit_from_clipboard(&mut self) -> RequestState {
        if self.paste().is_err() {
            return self.state.request();
        }
        self.submit_current().await
    }

    /// Runs one lifecycle for the current input (typed or pasted).
    pub async fn submit_current(&mut self) -> RequestState {
        let mut queue = VecDeque::from([Msg::SubmitClicked]);
        while let Some(msg) = queue.pop_front() {
            for effect in self.dispatch(msg) {
                if let Some(follow_up) = self.execute(effect).await {
                    queue.push_back(follow_up);
                }
            }
        }
        self.state.request()
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        if state.consume_dirty() {
            if let Some(sink) = &self.sink {
                sink.emit(&view);
            }
        }
        self.state = state;
        effects
    }

    async fn execute(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Resolve { track_url } => {
                let outcome = match self.resolver.resolve(&track_url).await {
                    Ok(track) => {
                        grab_info!(
                            "Resolved track has_link={} title_len={}",
                            track.has_link(),
                            track.label.len()
                        );
                        ResolveOutcome::Resolved {
                            label: track.label,
                            link: track.link,
                        }
                    }
                    Err(err) => {
                        grab_warn!("Resolution failed: {}", err);
                        ResolveOutcome::Fault(err.to_string())
                    }
                };
                Some(Msg::ResolveFinished(outcome))
            }
            Effect::Navigate { link } => match self.navigator.open(&link) {
                Ok(()) => None,
                Err(err) => {
                    grab_warn!("Navigation failed: {}", err);
                    Some(Msg::NavigateFailed(err.to_string()))
                }
            },
            Effect::AppendHistory { entry } => match self.ledger.append(entry) {
                Ok(entries) => Some(Msg::HistoryUpdated(entries)),
                Err(err) => {
                    grab_error!("Failed to persist download history: {}", err);
                    Some(Msg::HistoryWriteFailed(err.to_string()))
                }
            },
        }
    }
}
