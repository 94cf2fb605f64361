use std::io;
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use trackgrab_logging::{grab_debug, grab_warn};

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("refusing to open non-http link {0:?}")]
    UnsupportedLink(String),
    #[error("failed to launch url handler: {0}")]
    Launch(#[from] std::io::Error),
}

/// Opens a download link in the host environment.
pub trait Navigator: Send + Sync {
    fn open(&self, link: &str) -> Result<(), NavigateError>;
}

/// Hands links to the platform URL handler.
#[derive(Debug, Default)]
pub struct SystemNavigator;

impl SystemNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl Navigator for SystemNavigator {
    fn open(&self, link: &str) -> Result<(), NavigateError> {
        ensure_web_link(link)?;
        grab_debug!("launching url handler for link_len={}", link.len());

        let child = launch_command(HostPlatform::current(), link).spawn()?;
        reap_in_background(child);
        Ok(())
    }
}

/// URL handler family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    MacOs,
    OtherUnix,
}

impl HostPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::OtherUnix
        }
    }
}

/// Builds the handler invocation. The link is always one argv entry and never
/// passes through a shell, so `&` and friends stay part of the URL.
pub fn launch_command(platform: HostPlatform, link: &str) -> Command {
    let mut command = match platform {
        HostPlatform::Windows => {
            let mut command = Command::new("rundll32");
            command.arg("url.dll,FileProtocolHandler");
            command
        }
        HostPlatform::MacOs => Command::new("open"),
        HostPlatform::OtherUnix => Command::new("xdg-open"),
    };
    command.arg(link);
    command
}

// The handler usually exits quickly; wait on it off-thread so it is not left
// as a zombie.
fn reap_in_background(mut child: Child) -> JoinHandle<io::Result<ExitStatus>> {
    thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) if !status.success() => {
                grab_warn!("url handler exited with {}", status)
            }
            Err(err) => grab_warn!("failed to wait on url handler: {}", err),
            _ => {}
        }
        status
    })
}

/// Links come from a remote service; only http(s) reaches the URL handler.
pub fn ensure_web_link(link: &str) -> Result<(), NavigateError> {
    match reqwest::Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(NavigateError::UnsupportedLink(link.to_string())),
    }
}
