use crate::constants::{
    DEFAULT_BASE_DN, DEFAULT_LDAP_URL, DEFAULT_MAX_CONCURRENCY, DEFAULT_SEARCH_URL,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_VCARD_URL_TEMPLATE,
};
use crate::error::{LookupError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ldap: LdapConfig,
    pub web: WebConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LdapConfig {
    pub url: String,
    pub base_dn: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub search_url: String,
    pub vcard_url_template: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub timeout_seconds: u64,
    pub max_concurrency: usize,
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_LDAP_URL.to_string(),
            base_dn: DEFAULT_BASE_DN.to_string(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            vcard_url_template: DEFAULT_VCARD_URL_TEMPLATE.to_string(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from `path`, or from `config.toml` in the working directory.
    ///
    /// An explicitly named file must exist. When no path is given and the default file is
    /// absent, the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        if !explicit && !config_path.exists() {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            LookupError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::from_toml(&config_content)?;
        info!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.lookup.max_concurrency == 0 {
            return Err(LookupError::Config(
                "lookup.max_concurrency must be at least 1".into(),
            ));
        }
        if !self.web.vcard_url_template.contains("{id}") {
            return Err(LookupError::Config(
                "web.vcard_url_template must contain an {id} placeholder".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.ldap.url, DEFAULT_LDAP_URL);
        assert_eq!(config.ldap.base_dn, DEFAULT_BASE_DN);
        assert_eq!(config.lookup.max_concurrency, DEFAULT_MAX_CONCURRENCY);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            r#"
            [ldap]
            url = "ldap://localhost:3389"

            [lookup]
            timeout_seconds = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.ldap.url, "ldap://localhost:3389");
        assert_eq!(config.ldap.base_dn, DEFAULT_BASE_DN);
        assert_eq!(config.lookup.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = Config::from_toml("[lookup]\nmax_concurrency = 0\n").unwrap_err();
        assert!(matches!(err, LookupError::Config(_)));
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let err = Config::from_toml("[web]\nvcard_url_template = \"https://x/card\"\n").unwrap_err();
        assert!(matches!(err, LookupError::Config(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ldap]\nbase_dn = \"dc=example,dc=edu\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.ldap.base_dn, "dc=example,dc=edu");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
