//! Trackgrab engine: IO collaborators and effect execution.
mod clipboard;
mod controller;
mod ledger;
mod navigate;
mod persist;
mod resolve;
mod store;
mod types;

pub use clipboard::{ClipboardError, ClipboardReader, SystemClipboard};
pub use controller::{Controller, StateSink};
pub use ledger::{HistoryLedger, LedgerError, HISTORY_KEY};
pub use navigate::{
    ensure_web_link, launch_command, HostPlatform, NavigateError, Navigator, SystemNavigator,
};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use resolve::{
    ReqwestResolver, Resolver, ResolverSettings, API_HOST_HEADER, API_KEY_HEADER,
    DEFAULT_API_HOST, DEFAULT_ENDPOINT, TRACK_QUERY_PARAM,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{FaultKind, ResolveError, ResolvedTrack};
