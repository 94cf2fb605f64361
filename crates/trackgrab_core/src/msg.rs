use crate::HistoryEntry;

/// Result of one resolution call as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The call completed; `link` may be empty when the service had nothing to offer.
    Resolved { label: String, link: String },
    /// Transport or server fault. The message is for logs only.
    Fault(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User asked to download the current input.
    SubmitClicked,
    /// The outbound lookup for the in-flight request completed.
    ResolveFinished(ResolveOutcome),
    /// History read from persistent storage at start-up.
    HistoryLoaded(Vec<HistoryEntry>),
    /// Ledger confirmed an append; carries the full persisted sequence.
    HistoryUpdated(Vec<HistoryEntry>),
    /// Ledger write failed; the previous sequence is still in effect.
    HistoryWriteFailed(String),
    /// Clipboard text to use as the new input.
    ClipboardRead(String),
    /// Clipboard could not be read (permission or unsupported environment).
    ClipboardFailed(String),
    /// The host could not open the download link.
    NavigateFailed(String),
    /// User acknowledged the last outcome.
    Dismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
