mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

/// Loads the configuration from `CONFIG_PATH` (default `config.yaml`) and
/// applies the `BACKEND_URL` override.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let config = load_from(&config_path).await?;

    Ok(with_backend_url(config, env::var("BACKEND_URL").ok()))
}

/// Reads a YAML config file. A missing file yields the built-in defaults.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Replaces the backend base URL when an override is present. Blank values are ignored.
pub fn with_backend_url(mut config: Config, backend_url: Option<String>) -> Config {
    if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
        debug!("Backend URL overridden from environment: {}", url);
        config.backend.base_url = url.trim().to_string();
    }
    config
}
