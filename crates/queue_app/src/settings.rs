use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use queue_client::ClientSettings;
use queue_core::{
    Control, EntrySnapshot, FailurePolicy, QueueConfig, DEFAULT_IDENTIFIER_FIELD,
    SUCCESS_MESSAGE_TTL,
};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid base_url {url:?}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum FailurePolicySetting {
    Retain,
    #[default]
    Restore,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListedEntry {
    pub identifier: String,
    pub ingest_href: String,
    pub ignore_href: String,
    /// Extra controls rendered alongside ingest/ignore, as `(class, label, href)`.
    #[serde(default)]
    pub extra_controls: Vec<(String, String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    pub csrf_token: String,
    #[serde(default = "default_identifier_field")]
    pub identifier_field: String,
    #[serde(default = "default_success_message_ms")]
    pub success_message_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub failure_policy: FailurePolicySetting,
    #[serde(default)]
    pub entries: Vec<ListedEntry>,
}

fn default_identifier_field() -> String {
    DEFAULT_IDENTIFIER_FIELD.to_string()
}

fn default_success_message_ms() -> u64 {
    SUCCESS_MESSAGE_TTL.as_millis() as u64
}

fn default_request_timeout_secs() -> u64 {
    ClientSettings::default().request_timeout.as_secs()
}

impl AppSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            csrf_token: self.csrf_token.clone(),
            identifier_field: self.identifier_field.clone(),
            success_message_ttl: Duration::from_millis(self.success_message_ms),
            failure_policy: match self.failure_policy {
                FailurePolicySetting::Retain => FailurePolicy::Retain,
                FailurePolicySetting::Restore => FailurePolicy::Restore,
            },
            ..QueueConfig::default()
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings, SettingsError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|source| SettingsError::BaseUrl {
                    url: raw.to_string(),
                    source,
                })
            })
            .transpose()?;
        Ok(ClientSettings {
            base_url,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        })
    }

    pub fn listing(&self) -> Vec<EntrySnapshot> {
        self.entries
            .iter()
            .map(|entry| {
                let mut snapshot = EntrySnapshot::with_actions(
                    entry.identifier.clone(),
                    entry.ingest_href.clone(),
                    entry.ignore_href.clone(),
                );
                snapshot.controls.extend(
                    entry
                        .extra_controls
                        .iter()
                        .map(|(class, label, href)| Control::new(class, label, href)),
                );
                snapshot
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_settings(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_settings_file_is_loaded() {
        let file = write_settings(
            r#"(
                base_url: Some("https://openemory.example.edu/"),
                csrf_token: "abc",
                identifier_field: "pmcid",
                success_message_ms: 500,
                request_timeout_secs: 5,
                failure_policy: Retain,
                entries: [
                    (
                        identifier: "PMC42",
                        ingest_href: "/publications/new/",
                        ignore_href: "/harvest/records/1/",
                    ),
                ],
            )"#,
        );

        let settings = AppSettings::load(file.path()).unwrap();
        let config = settings.queue_config();
        assert_eq!(config.csrf_token, "abc");
        assert_eq!(config.success_message_ttl, Duration::from_millis(500));
        assert_eq!(config.failure_policy, FailurePolicy::Retain);

        let client = settings.client_settings().unwrap();
        assert_eq!(
            client.base_url.unwrap().as_str(),
            "https://openemory.example.edu/"
        );
        assert_eq!(client.request_timeout, Duration::from_secs(5));

        let listing = settings.listing();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].identifier, "PMC42");
        assert_eq!(listing[0].controls[0].href, "/publications/new/");
        assert_eq!(listing[0].controls[1].class, "ignore");
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let file = write_settings(r#"(base_url: None, csrf_token: "t")"#);

        let settings = AppSettings::load(file.path()).unwrap();
        let config = settings.queue_config();
        assert_eq!(config.identifier_field, "pmcid");
        assert_eq!(config.success_message_ttl, Duration::from_millis(1500));
        assert_eq!(config.failure_policy, FailurePolicy::Restore);
        assert!(settings.entries.is_empty());
        assert_eq!(
            settings.client_settings().unwrap().request_timeout,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn extra_controls_are_appended() {
        let file = write_settings(
            r#"(
                base_url: None,
                csrf_token: "t",
                entries: [(
                    identifier: "PMC1",
                    ingest_href: "/i/",
                    ignore_href: "/d/",
                    extra_controls: [("pmc", "PubMed Central", "https://pmc.example/PMC1")],
                )],
            )"#,
        );

        let listing = AppSettings::load(file.path()).unwrap().listing();
        assert_eq!(listing[0].controls.len(), 3);
        assert_eq!(
            listing[0].controls[2],
            Control::new("pmc", "PubMed Central", "https://pmc.example/PMC1")
        );
    }

    #[test]
    fn malformed_file_reports_path() {
        let file = write_settings("(csrf_token: ");
        let err = AppSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse settings"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppSettings::load(Path::new("/nonexistent/queue.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let file = write_settings(r#"(base_url: Some("not a url"), csrf_token: "t")"#);
        let settings = AppSettings::load(file.path()).unwrap();
        assert!(matches!(
            settings.client_settings(),
            Err(SettingsError::BaseUrl { .. })
        ));
    }
}
