use std::io::Write;

use trackgrab_core::{AppViewModel, HistoryEntry, RequestState};
use trackgrab_engine::StateSink;

/// Lines describing how the last submission ended.
pub fn outcome_lines(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    match view.request {
        RequestState::Succeeded => match &view.last_download {
            Some(entry) => lines.push(format!(
                "Downloading {}: {}",
                entry.label(),
                entry.link()
            )),
            None => lines.push("Download started".to_string()),
        },
        RequestState::Failed(_) => {
            if let Some(message) = view.error_message() {
                lines.push(format!("Error: {message}"));
            }
        }
        RequestState::Idle | RequestState::Validating | RequestState::InFlight => {}
    }
    if let Some(notice) = &view.notice {
        lines.push(format!("Notice: {notice}"));
    }
    lines
}

pub fn history_lines(entries: &[HistoryEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No downloads yet.".to_string()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| format!("{:>3}. {}  {}", idx + 1, entry.label(), entry.link()))
        .collect()
}

/// Shows a progress line on stderr while a lookup is in flight.
pub struct TerminalSink;

impl StateSink for TerminalSink {
    fn emit(&self, view: &AppViewModel) {
        if view.request == RequestState::InFlight {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "Resolving {} ...", view.raw_input.trim());
        }
    }
}
