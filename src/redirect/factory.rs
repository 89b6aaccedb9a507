//! Handler factory module
//!
//! Composes source loading with handler construction: decode or read a
//! source, collapse its entries into a [`PathMap`], wrap the result around
//! a fallback handler. Errors are returned as-is to the caller; no
//! partially built handler ever escapes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{FallbackConfig, RedirectsConfig, SourceConfig};
use crate::logger;

use super::decode::{decode_json, decode_yaml, DecodeError};
use super::handler::RequestHandler;
use super::map::PathMap;
use super::store::{RedirectStore, StoreError};

/// Failure while assembling the handler chain from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("redirect source #{index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },
    #[error("redirect source #{index}: {source}")]
    Store {
        index: usize,
        #[source]
        source: StoreError,
    },
    #[error("redirect source #{index}: cannot read {path}: {source}")]
    SourceFile {
        index: usize,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("fallback page {path}: {source}")]
    FallbackFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Wrap a literal path→URL map around `fallback`. Cannot fail.
pub fn map_handler(
    paths: HashMap<String, String>,
    fallback: Arc<RequestHandler>,
) -> RequestHandler {
    RequestHandler::Redirect {
        map: PathMap::from(paths),
        fallback,
    }
}

/// Decode a YAML payload into a redirect handler wrapping `fallback`.
pub fn yaml_handler(
    payload: &[u8],
    fallback: Arc<RequestHandler>,
) -> Result<RequestHandler, DecodeError> {
    let entries = decode_yaml(payload)?;
    Ok(RequestHandler::Redirect {
        map: PathMap::from_entries(entries),
        fallback,
    })
}

/// Decode a JSON payload into a redirect handler wrapping `fallback`.
pub fn json_handler(
    payload: &[u8],
    fallback: Arc<RequestHandler>,
) -> Result<RequestHandler, DecodeError> {
    let entries = decode_json(payload)?;
    Ok(RequestHandler::Redirect {
        map: PathMap::from_entries(entries),
        fallback,
    })
}

/// Read every row of `store` into a redirect handler wrapping `fallback`.
pub fn store_handler(
    store: &RedirectStore,
    fallback: Arc<RequestHandler>,
) -> Result<RequestHandler, StoreError> {
    let entries = store.read_all()?;
    Ok(RequestHandler::Redirect {
        map: PathMap::from_entries(entries),
        fallback,
    })
}

/// Assemble the full handler chain from configuration.
///
/// Sources are applied in order, each new handler wrapping the chain built
/// so far, so a later source takes precedence when two sources map the same
/// path. The first failing source aborts the whole build and no handler is
/// produced.
pub fn build_from_config(cfg: &RedirectsConfig) -> Result<RequestHandler, BuildError> {
    let mut handler = terminal_handler(&cfg.fallback)?;

    for (index, source) in cfg.sources.iter().enumerate() {
        let fallback = Arc::new(handler);
        handler = match source {
            SourceConfig::Map { entries } => map_handler(entries.clone(), fallback),
            SourceConfig::YamlFile { path } => {
                let payload = read_source_file(index, path)?;
                yaml_handler(&payload, fallback)
                    .map_err(|source| BuildError::Decode { index, source })?
            }
            SourceConfig::JsonFile { path } => {
                let payload = read_source_file(index, path)?;
                json_handler(&payload, fallback)
                    .map_err(|source| BuildError::Decode { index, source })?
            }
            SourceConfig::Store {
                path,
                collection,
                seed,
            } => {
                let store = open_store(Path::new(path), collection, seed)
                    .map_err(|source| BuildError::Store { index, source })?;
                store_handler(&store, fallback)
                    .map_err(|source| BuildError::Store { index, source })?
            }
        };

        if let RequestHandler::Redirect { ref map, .. } = handler {
            if map.is_empty() {
                logger::log_warning(&format!(
                    "Redirect source #{index} ({}) produced no rules",
                    source.kind()
                ));
            } else {
                logger::log_source_loaded(index, source.kind(), map.len());
            }
        }
    }

    Ok(handler)
}

/// Open a store source, seeding it first when seed rows are configured.
fn open_store(
    root: &Path,
    collection: &str,
    seed: &HashMap<String, String>,
) -> Result<RedirectStore, StoreError> {
    if seed.is_empty() {
        return RedirectStore::open(root, collection);
    }
    let store = RedirectStore::create(root, collection)?;
    for (path, url) in seed {
        store.put(path, url)?;
    }
    Ok(store)
}

fn terminal_handler(cfg: &FallbackConfig) -> Result<RequestHandler, BuildError> {
    match cfg {
        FallbackConfig::Page { file: Some(path) } => {
            let html = fs::read_to_string(path).map_err(|source| BuildError::FallbackFile {
                path: path.clone(),
                source,
            })?;
            Ok(RequestHandler::Page { html })
        }
        FallbackConfig::Page { file: None } => Ok(RequestHandler::Page {
            html: default_page(),
        }),
        FallbackConfig::NotFound => Ok(RequestHandler::NotFound),
    }
}

fn read_source_file(index: usize, path: &str) -> Result<Vec<u8>, BuildError> {
    fs::read(path).map_err(|source| BuildError::SourceFile {
        index,
        path: path.to_string(),
        source,
    })
}

/// Built-in page served when no fallback file is configured.
fn default_page() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>reroute</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            min-height: 100vh;
            margin: 0;
            display: flex;
            align-items: center;
            justify-content: center;
            background: #1f2430;
            color: #eaeaea;
        }
        .container {
            text-align: center;
            padding: 40px;
            border-radius: 12px;
            background: #2a3040;
            max-width: 540px;
        }
        h1 { margin-bottom: 12px; }
        p { color: #9aa4b5; }
    </style>
</head>
<body>
    <div class="container">
        <h1>reroute</h1>
        <p>No redirect is configured for this path.</p>
    </div>
</body>
</html>
"#,
    )
}
