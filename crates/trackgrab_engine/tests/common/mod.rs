#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use trackgrab_core::{AppViewModel, RequestState};
use trackgrab_engine::{
    ClipboardError, ClipboardReader, KeyValueStore, MemoryStore, NavigateError, Navigator,
    ReqwestResolver, ResolverSettings, StateSink, StoreError,
};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key-0001";

pub fn init_logging() {
    trackgrab_logging::initialize_for_tests();
}

pub fn resolver_for(server: &MockServer) -> ReqwestResolver {
    ReqwestResolver::new(ResolverSettings {
        endpoint: format!("{}/downloadSong", server.uri()),
        api_key: Some(TEST_API_KEY.to_string()),
        ..ResolverSettings::default()
    })
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, link: &str) -> Result<(), NavigateError> {
        self.opened.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

pub struct BrokenNavigator;

impl Navigator for BrokenNavigator {
    fn open(&self, _link: &str) -> Result<(), NavigateError> {
        Err(NavigateError::Launch(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no url handler",
        )))
    }
}

/// Clipboard stub; `None` behaves like a denied permission.
pub struct FakeClipboard(pub Option<String>);

impl ClipboardReader for FakeClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        self.0
            .clone()
            .ok_or_else(|| ClipboardError::Unavailable("permission denied".to_string()))
    }
}

/// Memory store whose writes can be switched off to simulate a failing disk.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    views: Arc<Mutex<Vec<AppViewModel>>>,
}

impl RecordingSink {
    pub fn states(&self) -> Vec<RequestState> {
        self.views.lock().unwrap().iter().map(|v| v.request).collect()
    }

    pub fn views(&self) -> Vec<AppViewModel> {
        self.views.lock().unwrap().clone()
    }
}

impl StateSink for RecordingSink {
    fn emit(&self, view: &AppViewModel) {
        self.views.lock().unwrap().push(view.clone());
    }
}
