// SPDX-License-Identifier: MIT

//! Mail settings loaded from a `key=value` environment file.
//!
//! The file lives outside the repository (by default under `/etc/upkeep`) and
//! is expected to be readable only by the account running the tool. A missing
//! file or missing required key aborts the run before any command executes.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/upkeep/env";

pub const SENDER_KEY: &str = "FROM_EMAIL";
pub const RECIPIENT_KEY: &str = "TO_EMAIL";
pub const RELAY_KEY: &str = "SMTP_SERVER";
pub const CREDENTIAL_KEY: &str = "EMAIL_PASSWORD";

/// Everything needed to deliver one notification email.
#[derive(Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub sender: String,
    pub recipient: String,
    pub relay_host: String,
    pub credential: String,
}

/// Fatal problems with the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings file {} not found", .path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required settings key {key}")]
    MissingKey { key: &'static str },
}

impl MailSettings {
    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        #[cfg(unix)]
        warn_if_world_readable(path);

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "mail settings loaded");
        Ok(settings)
    }

    /// Parse `key=value` lines.
    ///
    /// Blank lines are ignored. Lines without `=` are skipped with a warning.
    /// A later entry for the same key overrides an earlier one, and an empty
    /// value counts as missing.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values: HashMap<&str, &str> = HashMap::new();
        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    values.insert(key, value);
                }
                None => tracing::warn!(line, "skipping invalid settings line"),
            }
        }

        let require = |key: &'static str| -> Result<String, ConfigError> {
            values
                .get(key)
                .filter(|v| !v.is_empty())
                .map(|v| (*v).to_string())
                .ok_or(ConfigError::MissingKey { key })
        };

        Ok(Self {
            sender: require(SENDER_KEY)?,
            recipient: require(RECIPIENT_KEY)?,
            relay_host: require(RELAY_KEY)?,
            credential: require(CREDENTIAL_KEY)?,
        })
    }
}

// Keeps the credential out of logs and error chains.
impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("relay_host", &self.relay_host)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[cfg(unix)]
fn warn_if_world_readable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(meta) = std::fs::metadata(path) {
        let mode = meta.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            let mode = format!("{mode:o}");
            tracing::warn!(path = %path.display(), %mode, "settings file is readable by group/other");
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
