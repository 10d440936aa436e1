//! Endpoint configuration for the webhook agent.
//!
//! Supports reading `~/.config/asesor/config.toml`:
//!
//! ```toml
//! [webhook]
//! url = "https://example.com/webhook/abc"
//! timeout_secs = 30
//! ```
//!
//! Priority: config file first, then the `ASESOR_WEBHOOK_URL` environment
//! variable. The endpoint is deployment configuration; it is never
//! hardcoded in the library.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use asesor_core::error::{AsesorError, Result};

/// Environment variable consulted when no config file is present.
pub const WEBHOOK_URL_ENV: &str = "ASESOR_WEBHOOK_URL";

/// Root structure of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigRoot {
    #[serde(default)]
    webhook: Option<WebhookConfig>,
}

/// Webhook endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint URL the agent posts to.
    pub url: String,
    /// Optional client-level request timeout in seconds.
    ///
    /// Absent by default: failure signaling is otherwise left entirely to
    /// the transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Loads the webhook configuration.
///
/// # Errors
///
/// Returns a `Config` error when neither the config file nor the
/// environment variable provides an endpoint, and an `Io`/`Serialization`
/// error when the config file exists but cannot be read or parsed.
pub fn load_webhook_config() -> Result<WebhookConfig> {
    let config_path = default_config_path()?;
    if let Some(config) = load_config_file(&config_path)? {
        return Ok(config);
    }

    if let Ok(url) = env::var(WEBHOOK_URL_ENV) {
        return Ok(WebhookConfig {
            url,
            timeout_secs: None,
        });
    }

    Err(AsesorError::config(format!(
        "webhook endpoint not configured: add [webhook] url to {} or set {}",
        config_path.display(),
        WEBHOOK_URL_ENV
    )))
}

/// Reads a config file and returns its `[webhook]` table, if any.
///
/// A missing file is not an error; the caller falls through to the
/// environment variable.
pub fn load_config_file(path: &Path) -> Result<Option<WebhookConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|err| {
        AsesorError::io(format!(
            "failed to read configuration file at {}: {}",
            path.display(),
            err
        ))
    })?;

    let root: ConfigRoot = toml::from_str(&content)?;
    Ok(root.webhook)
}

/// Returns the path to the configuration file: ~/.config/asesor/config.toml
fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AsesorError::config("could not determine home directory"))?;
    Ok(home.join(".config").join("asesor").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(load_config_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_parses_webhook_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[webhook]\nurl = \"https://example.com/webhook/abc\"\ntimeout_secs = 30"
        )
        .unwrap();

        let config = load_config_file(&path).unwrap().unwrap();
        assert_eq!(config.url, "https://example.com/webhook/abc");
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_file_without_webhook_table_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# empty\n").unwrap();
        assert!(load_config_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[webhook\nurl =").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, AsesorError::Serialization { .. }));
    }
}
