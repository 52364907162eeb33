//! Dashboard configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `AGENCY_DATASET` | `dataset` |
//! | `AGENCY_CURRENT_USER` | `current_user` |
//! | `AGENCY_UTC_OFFSET_MINUTES` | `utc_offset_minutes` |

use crate::error::ConfigError;
use agency_view::{offset_from_minutes, SystemClock};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dataset path override
pub const ENV_DATASET: &str = "AGENCY_DATASET";
/// Signed-in staff id override
pub const ENV_CURRENT_USER: &str = "AGENCY_CURRENT_USER";
/// Calendar-day offset override
pub const ENV_UTC_OFFSET: &str = "AGENCY_UTC_OFFSET_MINUTES";

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    /// JSON dataset to seed the store from
    pub dataset: Option<PathBuf>,
    /// Offset east of UTC for calendar-day boundaries
    pub utc_offset_minutes: i32,
    /// Staff id the `"me"` assignee criterion resolves to
    pub current_user: Option<String>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Window for "recent" uploads
    pub recent_window_hours: u32,
    /// Window for "this week" uploads
    pub week_window_hours: u32,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            utc_offset_minutes: 0,
            current_user: None,
            log_level: "info".to_string(),
            recent_window_hours: 24,
            week_window_hours: 168,
        }
    }
}

impl AgencyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::InvalidOffset`]
    /// for an offset beyond ±24 hours.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file; a missing file yields defaults
    ///
    /// # Errors
    /// Unreadable or malformed file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!("Loaded config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Config file (if any) plus environment overrides
    ///
    /// # Errors
    /// As [`AgencyConfig::from_file`], plus unparseable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// # Errors
    /// [`ConfigError::InvalidEnv`] when the offset is not an integer.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(ENV_DATASET).filter(|v| !v.is_empty()) {
            self.dataset = Some(PathBuf::from(path));
        }
        if let Some(user) = lookup(ENV_CURRENT_USER).filter(|v| !v.is_empty()) {
            self.current_user = Some(user);
        }
        if let Some(raw) = lookup(ENV_UTC_OFFSET) {
            self.utc_offset_minutes = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_UTC_OFFSET,
                value: raw.clone(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::InvalidOffset`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        offset_from_minutes(self.utc_offset_minutes)
            .map(|_| ())
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))
    }

    /// With dataset path
    #[inline]
    #[must_use]
    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }

    /// With UTC offset in minutes
    #[inline]
    #[must_use]
    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// With signed-in staff id
    #[inline]
    #[must_use]
    pub fn with_current_user(mut self, user: impl Into<String>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    /// With default log filter
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Dataset path
    ///
    /// # Errors
    /// [`ConfigError::MissingDataset`].
    pub fn dataset_path(&self) -> Result<&Path, ConfigError> {
        self.dataset.as_deref().ok_or(ConfigError::MissingDataset)
    }

    /// Wall clock in the configured offset
    ///
    /// # Errors
    /// [`ConfigError::InvalidOffset`].
    pub fn clock(&self) -> Result<SystemClock, ConfigError> {
        offset_from_minutes(self.utc_offset_minutes)
            .map(SystemClock::with_offset)
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))
    }

    /// Recent-upload window
    #[inline]
    #[must_use]
    pub fn recent_window(&self) -> Duration {
        Duration::hours(i64::from(self.recent_window_hours))
    }

    /// This-week upload window
    #[inline]
    #[must_use]
    pub fn week_window(&self) -> Duration {
        Duration::hours(i64::from(self.week_window_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_view::Clock;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AgencyConfig::default();
        assert_eq!(config.utc_offset_minutes, 0);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.recent_window(), Duration::hours(24));
        assert_eq!(config.week_window(), Duration::days(7));
        assert!(matches!(config.dataset_path(), Err(ConfigError::MissingDataset)));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AgencyConfig::from_toml("dataset = \"data/sample.json\"\nutc_offset_minutes = 120\n").unwrap();
        assert_eq!(config.dataset_path().unwrap(), Path::new("data/sample.json"));
        assert_eq!(config.utc_offset_minutes, 120);
        assert_eq!(config.week_window_hours, 168);
        assert_eq!(config.clock().unwrap().offset().local_minus_utc(), 7200);
    }

    #[test]
    fn malformed_and_out_of_range() {
        assert!(matches!(AgencyConfig::from_toml("dataset = ["), Err(ConfigError::Parse(_))));
        assert!(matches!(
            AgencyConfig::from_toml("utc_offset_minutes = 1500"),
            Err(ConfigError::InvalidOffset(1500))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgencyConfig::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AgencyConfig::default());
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "current_user = \"staff-alice\"\nlog_level = \"debug\"").unwrap();
        let config = AgencyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.current_user.as_deref(), Some("staff-alice"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn environment_overrides() {
        let env = |var: &str| match var {
            ENV_DATASET => Some("/srv/agency.json".to_string()),
            ENV_CURRENT_USER => Some("staff-bob".to_string()),
            ENV_UTC_OFFSET => Some("-300".to_string()),
            _ => None,
        };
        let config = AgencyConfig::new().with_current_user("staff-admin").with_env_from(env).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("/srv/agency.json")));
        assert_eq!(config.current_user.as_deref(), Some("staff-bob"));
        assert_eq!(config.utc_offset_minutes, -300);
    }

    #[test]
    fn bad_environment_offset() {
        let env = |var: &str| (var == ENV_UTC_OFFSET).then(|| "east".to_string());
        assert!(matches!(
            AgencyConfig::new().with_env_from(env),
            Err(ConfigError::InvalidEnv { var: ENV_UTC_OFFSET, .. })
        ));
    }
}
