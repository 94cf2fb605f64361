use std::fmt;

use thiserror::Error;

/// What the resolution service returned for one track URL.
///
/// `link` is empty when the call succeeded but the service had no download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub label: String,
    pub link: String,
}

impl ResolvedTrack {
    pub fn has_link(&self) -> bool {
        !self.link.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ResolveError {
    pub kind: FaultKind,
    pub message: String,
}

impl ResolveError {
    pub(crate) fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Transport-level faults. Every variant ends the submission as a request error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultKind {
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::InvalidRequest => write!(f, "invalid request"),
            FaultKind::HttpStatus(code) => write!(f, "http status {code}"),
            FaultKind::Timeout => write!(f, "timeout"),
            FaultKind::Network => write!(f, "network error"),
            FaultKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}
