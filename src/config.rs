use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::DashboardError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SHOPSY_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub auth: Auth,
}

#[derive(Debug, Deserialize)]
pub struct General {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            title: default_title(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_title() -> String {
    "Shopsy Dashboard".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct Auth {
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// A dashboard user. Only the SHA-256 digest of the secret is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub id: String,
    pub secret_sha256: String,
}

impl Config {
    /// Path from `SHOPSY_DASHBOARD_CONFIG`, else `config/dashboard.toml`.
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, DashboardError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_users_and_general() {
        let cfg = Config::from_toml_str(
            r#"
            [general]
            log_level = "debug"
            title = "Hub KPIs"

            [[auth.users]]
            id = "analyst@example.com"
            secret_sha256 = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.general.log_level, "debug");
        assert_eq!(cfg.general.title, "Hub KPIs");
        assert_eq!(cfg.auth.users.len(), 1);
        assert_eq!(cfg.auth.users[0].id, "analyst@example.com");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.general.title, "Shopsy Dashboard");
        assert!(cfg.auth.users.is_empty());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[general\nlog_level = 1").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigParse(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ntitle = \"From disk\"").unwrap();
        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.general.title, "From disk");

        let missing = Config::load(Path::new("/nonexistent/dashboard.toml")).unwrap_err();
        assert!(matches!(missing, DashboardError::ConfigRead { .. }));
    }
}
