use crate::HistoryEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one lookup against the resolution service.
    Resolve { track_url: String },
    /// Hand the download link to the host's URL handler.
    Navigate { link: String },
    /// Persist one more entry at the end of the history ledger.
    AppendHistory { entry: HistoryEntry },
}
