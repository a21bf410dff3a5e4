//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Filter directive string, e.g. `"info,claritycodec_rpc=debug"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("invalid log filter {directives:?}: {reason}")]
    InvalidFilter { directives: String, reason: String },

    #[error("a global subscriber is already installed")]
    AlreadyInitialised,
}

/// Initialise tracing with the given log config.
/// Should be called once at application startup. Output goes to stderr so
/// command results on stdout stay machine-readable.
pub fn init_tracing(config: &LogConfig) -> Result<(), LogInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => {
            let directives = config.directives();
            EnvFilter::try_new(&directives).map_err(|e| LogInitError::InvalidFilter {
                directives: directives.clone(),
                reason: e.to_string(),
            })?
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|_| LogInitError::AlreadyInitialised)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_include_components() {
        let mut cfg = LogConfig::default();
        cfg.components.insert("claritycodec-rpc".into(), "debug".into());
        cfg.components.insert("claritycodec-pox".into(), "warn".into());
        assert_eq!(
            cfg.directives(),
            "info,claritycodec_pox=warn,claritycodec_rpc=debug"
        );
    }

    #[test]
    fn config_from_partial_json() {
        let cfg: LogConfig = serde_json::from_str(r#"{"json":true}"#).unwrap();
        assert_eq!(cfg.level, "info");
        assert!(cfg.json);
        assert!(cfg.components.is_empty());
    }

    #[test]
    fn second_init_is_reported() {
        let cfg = LogConfig {
            level: "warn".into(),
            ..LogConfig::default()
        };
        // Whichever call loses the race for the global subscriber reports it.
        let first = init_tracing(&cfg);
        let second = init_tracing(&cfg);
        assert!(first.is_ok() || matches!(first, Err(LogInitError::AlreadyInitialised)));
        assert!(matches!(second, Err(LogInitError::AlreadyInitialised)));
    }
}
