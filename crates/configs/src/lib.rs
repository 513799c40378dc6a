use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Directive used when `RUST_LOG` is unset, e.g. `info,service=debug`.
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://mailing_list.db?mode=rwc";
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Loads the configured file, falling back to defaults when it does not exist.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self { url: IN_MEMORY_DATABASE_URL.to_string(), ..Self::default() }
    }

    /// Fills an empty URL from `DATABASE_URL`, then from the built-in default.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn is_in_memory(&self) -> bool {
        self.is_sqlite() && self.url.contains(":memory:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("sqlite:") || lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with sqlite:, postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be a positive number of seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg = load_from_str(
            r#"
            [database]
            url = "postgres://localhost/mailing"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.url, "postgres://localhost/mailing");
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert!(cfg.logging.filter.is_none());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = load_from_str("").unwrap();
        assert!(cfg.database.url.is_empty());
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn in_memory_passes_validation() {
        let cfg = DatabaseConfig::in_memory();
        assert!(cfg.is_sqlite());
        assert!(cfg.is_in_memory());
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_unsupported_scheme() {
        let cfg = DatabaseConfig { url: "mysql://localhost/db".into(), ..DatabaseConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_url() {
        let cfg = DatabaseConfig::default();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let cfg = DatabaseConfig {
            url: DEFAULT_DATABASE_URL.into(),
            min_connections: 4,
            max_connections: 2,
            ..DatabaseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let cfg = DatabaseConfig {
            url: DEFAULT_DATABASE_URL.into(),
            acquire_timeout_secs: 0,
            ..DatabaseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn file_database_is_not_in_memory() {
        let cfg = DatabaseConfig { url: DEFAULT_DATABASE_URL.into(), ..DatabaseConfig::default() };
        assert!(cfg.is_sqlite());
        assert!(!cfg.is_in_memory());
    }
}
