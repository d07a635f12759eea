use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::credentials::Credentials;
use crate::error::{Result, YouTrackError};

pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
const TOKEN_ENV: &str = "YOUTRACK_TOKEN";
const URL_ENV: &str = "YOUTRACK_URL";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_path(&Self::config_path()?)
    }

    /// Like [`Config::load`], but a file that fails to parse is reported and
    /// replaced by the defaults. Read errors still fail.
    pub fn load_or_default() -> Result<Self> {
        Self::from_path_or_default(&Self::config_path()?)
    }

    fn from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| YouTrackError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| YouTrackError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    fn from_path_or_default(config_path: &Path) -> Result<Self> {
        match Self::from_path(config_path) {
            Err(YouTrackError::ConfigParse { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "ignoring malformed config file"
                );
                Ok(Config::default())
            }
            other => other,
        }
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "youtrack")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(YouTrackError::NoConfigDir)
    }

    /// Token precedence: explicit flag, then `YOUTRACK_TOKEN`, then the file.
    pub fn credentials(&self, explicit: Option<&str>) -> Result<Credentials> {
        explicit
            .map(String::from)
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .or_else(|| self.token.clone())
            .filter(|t| !t.trim().is_empty())
            .map(Credentials::bearer)
            .ok_or(YouTrackError::MissingToken)
    }

    /// Base URL precedence: explicit flag, then `YOUTRACK_URL`, then the file.
    pub fn base_url(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| std::env::var(URL_ENV).ok())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Download directory, preferring an explicit argument over the file.
    pub fn resolve_download_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.download_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = Config::parse(
            r#"
base_url = "https://example.youtrack.cloud"
token = "perm:abc"
download_dir = "/tmp/att"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://example.youtrack.cloud"));
        assert_eq!(config.resolve_download_dir(None), PathBuf::from("/tmp/att"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_for_empty_file() {
        let config = Config::parse("").unwrap();
        assert_eq!(
            config.resolve_download_dir(None),
            PathBuf::from(DEFAULT_DOWNLOAD_DIR)
        );
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_explicit_values_win() {
        let config = Config {
            base_url: Some("https://file.example".into()),
            download_dir: Some("from-file".into()),
            ..Config::default()
        };
        assert_eq!(config.base_url(Some("https://flag.example")), "https://flag.example");
        assert_eq!(
            config.resolve_download_dir(Some("from-flag".into())),
            PathBuf::from("from-flag")
        );
        assert!(config.credentials(Some("flag-token")).is_ok());
    }

    #[test]
    fn test_blank_explicit_token_is_missing() {
        let config = Config::default();
        // An explicit blank token must not fall through to the environment.
        assert!(matches!(
            config.credentials(Some("  ")),
            Err(YouTrackError::MissingToken)
        ));
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(Config::parse("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_malformed_file_fails_strict_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "token = \"unterminated").unwrap();

        assert!(matches!(
            Config::from_path(&path),
            Err(YouTrackError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "token = \"unterminated").unwrap();

        let config = Config::from_path_or_default(&path).unwrap();
        assert!(config.token.is_none());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_path(&dir.path().join("absent.toml")).unwrap();
        assert!(config.base_url.is_none());
    }
}
