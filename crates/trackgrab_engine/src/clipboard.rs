use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard holds no text")]
    NoText,
}

/// Reads plain text from the host clipboard on demand.
pub trait ClipboardReader: Send + Sync {
    fn read_text(&self) -> Result<String, ClipboardError>;
}

/// ClipboardReader backed by arboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardReader for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        clipboard.get_text().map_err(|err| match err {
            arboard::Error::ContentNotAvailable => ClipboardError::NoText,
            other => ClipboardError::Unavailable(other.to_string()),
        })
    }
}
