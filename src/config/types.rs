use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Options recognized when a scope is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// When true, reading a disposed or missing scope fails fast instead
    /// of returning an absent value (default: true).
    #[serde(default = "default_strict_provider_check")]
    pub strict_provider_check: bool,
    /// Human-readable name used in logs.
    #[serde(default)]
    pub label: Option<String>,
}

/// Settings for the `scope-replay` counter scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Counter value before the first event (default: 0).
    #[serde(default)]
    pub initial_count: i64,
    /// Amount added per increment (default: 1).
    #[serde(default = "default_step")]
    pub step: i64,
}

fn default_strict_provider_check() -> bool {
    true
}

fn default_step() -> i64 {
    1
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            strict_provider_check: default_strict_provider_check(),
            label: None,
        }
    }
}

impl ScopeConfig {
    /// Config with the strict provider check turned off.
    pub fn lenient() -> Self {
        Self {
            strict_provider_check: false,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            initial_count: 0,
            step: default_step(),
        }
    }
}
