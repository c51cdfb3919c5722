use confique::Config as _;
use std::{path::PathBuf, sync::OnceLock};

#[derive(Debug, Clone, PartialEq, Eq, confique::Config)]
pub struct Config {
    /// Keyword naming an include directive, as in `/* Include: path.sql */`.
    #[config(env = "UTILITRON_INCLUDE_KEYWORD", default = "Include")]
    pub include_keyword: String,
    /// Maximum number of entries held by each of a catalog's caches.
    #[config(env = "UTILITRON_CACHE_CAPACITY", default = 1024)]
    pub cache_capacity: u64,
    /// Directory served by `DirectoryProvider::from_config`.
    #[config(env = "UTILITRON_QUERY_ROOT")]
    pub query_root: Option<PathBuf>,
    /// Identifier prefix for the files under `query_root`.
    #[config(env = "UTILITRON_QUERY_NAMESPACE")]
    pub query_namespace: Option<String>,
}

impl Config {
    /// Load a fresh configuration from the current environment.
    pub fn load() -> crate::Result<Self> {
        Config::builder()
            .env()
            .load()
            .map_err(|e| crate::Error::Config(e.to_string()))
    }
}

impl Default for Config {
    /// The declared defaults, ignoring the environment.
    fn default() -> Self {
        Config::builder()
            .load()
            .expect("every required field declares a default")
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::load().unwrap_or_else(|e| {
            crate::warn!("Falling back to default configuration: {e}");
            Config::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.include_keyword, "Include");
        assert_eq!(config.cache_capacity, 1024);
        assert!(config.query_root.is_none());
        assert!(config.query_namespace.is_none());
    }

    #[test]
    fn load_reads_the_environment() {
        // Nothing reading `config()` looks at these two.
        unsafe {
            std::env::set_var("UTILITRON_QUERY_ROOT", "/srv/queries");
            std::env::set_var("UTILITRON_QUERY_NAMESPACE", "Acme.Data");
        }
        let loaded = Config::load();
        unsafe {
            std::env::remove_var("UTILITRON_QUERY_ROOT");
            std::env::remove_var("UTILITRON_QUERY_NAMESPACE");
        }

        let loaded = loaded.unwrap();
        assert_eq!(loaded.query_root, Some(PathBuf::from("/srv/queries")));
        assert_eq!(loaded.query_namespace.as_deref(), Some("Acme.Data"));
    }
}
