//! Trackgrab core: pure request lifecycle state machine and view-model helpers.
mod effect;
mod history;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use history::HistoryEntry;
pub use msg::{Msg, ResolveOutcome};
pub use state::{AppState, FailureReason, RequestState};
pub use update::update;
pub use view_model::AppViewModel;
