// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub redirects: RedirectsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Redirect chain configuration
///
/// Sources are applied in order: each wraps the chain built so far, so a
/// later source wins when two sources map the same path.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedirectsConfig {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// One redirect source
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Inline path→URL pairs from the config file itself.
    Map { entries: HashMap<String, String> },
    /// YAML file holding a sequence of `{path, url}` records.
    YamlFile { path: String },
    /// JSON file holding an array of `{path, url}` objects.
    JsonFile { path: String },
    /// Named collection in an LMDB store. `seed` rows, when present, are
    /// written before the store is read.
    Store {
        path: String,
        collection: String,
        #[serde(default)]
        seed: HashMap<String, String>,
    },
}

impl SourceConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Map { .. } => "map",
            Self::YamlFile { .. } => "yaml_file",
            Self::JsonFile { .. } => "json_file",
            Self::Store { .. } => "store",
        }
    }
}

/// Terminal handler at the end of the redirect chain
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FallbackConfig {
    /// Serve an HTML page; the built-in page when `file` is unset.
    Page {
        #[serde(default)]
        file: Option<String>,
    },
    /// Plain 404 for anything unmapped.
    NotFound,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self::Page { file: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirects_config_from_toml() {
        let toml = r#"
            [[sources]]
            type = "map"
            [sources.entries]
            "/wiki" = "https://www.wikipedia.org/"

            [[sources]]
            type = "yaml_file"
            path = "redirects.yaml"

            [[sources]]
            type = "store"
            path = "data/redirects"
            collection = "redirects"
            [sources.seed]
            "/urlshort" = "https://github.com/gophercises/urlshort"

            [fallback]
            type = "not_found"
        "#;
        let cfg: RedirectsConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.sources.len(), 3);
        assert_eq!(cfg.sources[0].kind(), "map");
        assert_eq!(
            cfg.sources[1],
            SourceConfig::YamlFile {
                path: "redirects.yaml".to_string()
            }
        );
        match &cfg.sources[2] {
            SourceConfig::Store {
                collection, seed, ..
            } => {
                assert_eq!(collection, "redirects");
                assert_eq!(
                    seed.get("/urlshort").map(String::as_str),
                    Some("https://github.com/gophercises/urlshort")
                );
            }
            other => panic!("unexpected source: {other:?}"),
        }
        assert_eq!(cfg.fallback, FallbackConfig::NotFound);
    }

    #[test]
    fn test_fallback_defaults_to_builtin_page() {
        assert_eq!(FallbackConfig::default(), FallbackConfig::Page { file: None });
    }
}
