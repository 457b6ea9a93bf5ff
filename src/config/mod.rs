//! Configuration loading.
//!
//! Configuration lives in a TOML file with two optional sections:
//! `[scope]` (options applied when a scope is created) and `[replay]`
//! (settings for the `scope-replay` binary).

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ReplayConfig, ScopeConfig};
