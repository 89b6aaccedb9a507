//! Redirect core module
//!
//! Turns path→URL sources into a chain of request handlers: a source is
//! decoded into an ordered sequence of (path, url) entries, collapsed into
//! an exact-match [`PathMap`], and wrapped around a fallback handler.
//! Everything here is built once at startup and read-only afterwards.

mod decode;
mod factory;
mod handler;
mod map;
mod store;

pub use decode::{decode_json, decode_yaml, DecodeError};
pub use factory::{
    build_from_config, json_handler, map_handler, store_handler, yaml_handler, BuildError,
};
pub use handler::RequestHandler;
pub use map::{PathEntry, PathMap};
pub use store::{RedirectStore, StoreError};
