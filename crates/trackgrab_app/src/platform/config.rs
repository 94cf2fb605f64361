use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use trackgrab_engine::ResolverSettings;

use super::cli::GlobalArgs;

const DATA_DIR_NAME: &str = "trackgrab";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub resolver: ResolverSettings,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let mut resolver = ResolverSettings::default();
        if let Some(endpoint) = non_empty(args.endpoint.as_deref()) {
            resolver.endpoint = endpoint;
        }
        if let Some(api_host) = non_empty(args.api_host.as_deref()) {
            resolver.api_host = api_host;
        }
        resolver.api_key = non_empty(args.api_key.as_deref());
        resolver.request_timeout = args.timeout.map(Duration::from_secs);

        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        Ok(Self { resolver, data_dir })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .context("no per-user data directory on this system; pass --data-dir")
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
