use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use trackgrab_logging::{grab_debug, grab_warn, redact_secret};

use crate::{FaultKind, ResolveError, ResolvedTrack};

pub const DEFAULT_ENDPOINT: &str = "https://spotify-downloader9.p.rapidapi.com/downloadSong";
pub const DEFAULT_API_HOST: &str = "spotify-downloader9.p.rapidapi.com";
pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";
pub const TRACK_QUERY_PARAM: &str = "songId";

#[derive(Clone)]
pub struct ResolverSettings {
    pub endpoint: String,
    pub api_host: String,
    /// Sent as-is; a missing key is left for the service to reject.
    pub api_key: Option<String>,
    /// `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_key: None,
            request_timeout: None,
        }
    }
}

impl fmt::Debug for ResolverSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverSettings")
            .field("endpoint", &self.endpoint)
            .field("api_host", &self.api_host)
            .field("api_key", &self.api_key.as_deref().map(redact_secret))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Looks up one track URL. Issues exactly one outbound request and never retries.
    async fn resolve(&self, track_url: &str) -> Result<ResolvedTrack, ResolveError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestResolver {
    settings: ResolverSettings,
}

impl ReqwestResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, ResolveError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ResolveError::new(FaultKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Resolver for ReqwestResolver {
    async fn resolve(&self, track_url: &str) -> Result<ResolvedTrack, ResolveError> {
        let url = reqwest::Url::parse_with_params(
            &self.settings.endpoint,
            &[(TRACK_QUERY_PARAM, track_url)],
        )
        .map_err(|err| ResolveError::new(FaultKind::InvalidRequest, err.to_string()))?;
        let client = self.build_client()?;

        let mut request = client
            .get(url)
            .header(API_HOST_HEADER, self.settings.api_host.as_str());
        if let Some(key) = self.settings.api_key.as_deref() {
            request = request.header(API_KEY_HEADER, key);
        }

        grab_debug!("resolving track_url_len={}", track_url.len());
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            grab_warn!("resolution service answered {}", status);
            return Err(ResolveError::new(
                FaultKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        parse_body(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Payload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    download_link: Option<String>,
}

fn parse_body(body: &[u8]) -> Result<ResolvedTrack, ResolveError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|err| ResolveError::new(FaultKind::MalformedBody, err.to_string()))?;
    let payload = envelope
        .data
        .ok_or_else(|| ResolveError::new(FaultKind::MalformedBody, "missing `data` object"))?;

    Ok(ResolvedTrack {
        label: payload.title.unwrap_or_default(),
        link: payload.download_link.unwrap_or_default(),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ResolveError {
    if err.is_timeout() {
        return ResolveError::new(FaultKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ResolveError::new(FaultKind::InvalidRequest, err.to_string());
    }
    ResolveError::new(FaultKind::Network, err.to_string())
}
