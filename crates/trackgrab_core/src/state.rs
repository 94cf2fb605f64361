use std::fmt;

use crate::{AppViewModel, HistoryEntry};

/// Why the last submission ended in `RequestState::Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Input was empty after trimming; no call was made.
    MissingUrl,
    /// The service answered but had no download link.
    NoLinkReturned,
    /// Network, status or body fault from the service.
    RequestError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingUrl => write!(f, "missing URL"),
            FailureReason::NoLinkReturned => write!(f, "no link returned"),
            FailureReason::RequestError => write!(f, "request error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed(FailureReason),
}

impl RequestState {
    /// True while a submission is being processed and a new one must be refused.
    pub fn is_busy(&self) -> bool {
        matches!(self, RequestState::Validating | RequestState::InFlight)
    }

    /// Succeeded and Failed are display states; they admit a new submission.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded | RequestState::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    request: RequestState,
    raw_input: String,
    pending_url: Option<String>,
    history: Vec<HistoryEntry>,
    notice: Option<String>,
    last_download: Option<HistoryEntry>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            request: self.request,
            raw_input: self.raw_input.clone(),
            busy: self.request.is_busy(),
            history: self.history.clone(),
            notice: self.notice.clone(),
            last_download: self.last_download.clone(),
            dirty: self.dirty,
        }
    }

    pub fn request(&self) -> RequestState {
        self.request
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_raw_input(&mut self, text: String) {
        if self.raw_input != text {
            self.raw_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_validation(&mut self) {
        self.request = RequestState::Validating;
        self.notice = None;
        self.dirty = true;
    }

    pub(crate) fn begin_resolution(&mut self, track_url: String) {
        self.request = RequestState::InFlight;
        self.pending_url = Some(track_url);
        self.dirty = true;
    }

    pub(crate) fn take_pending_url(&mut self) -> Option<String> {
        self.pending_url.take()
    }

    pub(crate) fn succeed(&mut self, download: HistoryEntry) {
        self.request = RequestState::Succeeded;
        self.last_download = Some(download);
        self.finish_run();
    }

    pub(crate) fn fail(&mut self, reason: FailureReason) {
        self.request = RequestState::Failed(reason);
        self.finish_run();
    }

    pub(crate) fn dismiss(&mut self) {
        if self.request != RequestState::Idle || self.notice.is_some() {
            self.request = RequestState::Idle;
            self.notice = None;
            self.dirty = true;
        }
    }

    pub(crate) fn set_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history = entries;
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    // Every run ends with an empty input so a stale URL is never resubmitted.
    fn finish_run(&mut self) {
        self.pending_url = None;
        self.raw_input.clear();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reasons_render_user_messages() {
        assert_eq!(FailureReason::MissingUrl.to_string(), "missing URL");
        assert_eq!(FailureReason::NoLinkReturned.to_string(), "no link returned");
        assert_eq!(FailureReason::RequestError.to_string(), "request error");
    }

    #[test]
    fn only_validating_and_in_flight_are_busy() {
        assert!(!RequestState::Idle.is_busy());
        assert!(RequestState::Validating.is_busy());
        assert!(RequestState::InFlight.is_busy());
        assert!(!RequestState::Succeeded.is_busy());
        assert!(!RequestState::Failed(FailureReason::RequestError).is_busy());
    }

    #[test]
    fn consume_dirty_resets_flag() {
        let mut state = AppState::new();
        state.set_raw_input("x".to_string());
        assert!(state.consume_dirty());
        assert!(!state.consume_dirty());
    }
}
