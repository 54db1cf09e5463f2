use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "./client/dist";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid u16 number, got `{0}`")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub production: bool,
    pub host: String,
    pub port: u16,
    /// Postgres connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if env::var("ENV").as_deref() != Ok("production") {
            dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            production: var("ENV").as_deref() == Some("production"),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: var("DATABASE_URL"),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Client assets are only served in production.
    pub fn static_dir(&self) -> Option<&std::path::Path> {
        self.production.then_some(self.static_dir.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:5000");
        assert!(!config.production);
        assert_eq!(config.database_url, None);
        assert_eq!(config.static_dir(), None);
    }

    #[test]
    fn reads_port_and_database_url() {
        let config = config(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("DATABASE_URL", "postgres://localhost/todos"),
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/todos")
        );
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        assert_eq!(config(&[("PORT", "")]).unwrap().port, 5000);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(raw) if raw == "http"));
    }

    #[test]
    fn production_serves_static_dir() {
        let config = config(&[("ENV", "production"), ("STATIC_DIR", "/srv/client")]).unwrap();
        assert_eq!(
            config.static_dir(),
            Some(std::path::Path::new("/srv/client"))
        );
    }
}
