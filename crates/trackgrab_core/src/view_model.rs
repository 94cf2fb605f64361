use crate::{HistoryEntry, RequestState};

/// Snapshot handed to the display layer after each state change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub request: RequestState,
    pub raw_input: String,
    /// Submission control must be disabled while true.
    pub busy: bool,
    pub history: Vec<HistoryEntry>,
    pub notice: Option<String>,
    /// Track and link of the latest success, whether or not it reached the ledger.
    pub last_download: Option<HistoryEntry>,
    pub dirty: bool,
}

impl AppViewModel {
    /// User-facing error line for a failed run, if any.
    pub fn error_message(&self) -> Option<String> {
        match self.request {
            RequestState::Failed(reason) => Some(reason.to_string()),
            _ => None,
        }
    }
}
