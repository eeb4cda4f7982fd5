//! Environment variable utilities and environment-driven render config.
//!
//! # Variables
//!
//! - `STACKERR_MODE=prod` - trim source paths in long frames (anything else is dev)
//! - `STACKERR_PROJECT=<marker>` - project root marker used when trimming
//!
//! # Usage
//!
//! ```ignore
//! use stackerr::env::{env_get, env_get_str};
//!
//! let retries: u32 = env_get("APP_RETRIES", 3);
//! let name = env_get_str("APP_NAME", "shop");
//!
//! // Read once at startup, then pass the config around explicitly.
//! let cfg = stackerr::RenderConfig::from_env();
//! ```

use std::str::FromStr;

use crate::render::{Mode, RenderConfig};

/// Mode flag variable.
pub const MODE_VAR: &str = "STACKERR_MODE";

/// Project marker variable.
pub const PROJECT_VAR: &str = "STACKERR_PROJECT";

/// Get environment variable parsed as type T, or return default
///
/// Works with any type that implements `FromStr`.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Get environment variable as optional value
///
/// Returns `Some(T)` if the variable is set and parses successfully,
/// `None` otherwise.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Get environment variable as string, or return default
#[inline]
pub fn env_get_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Check if environment variable is set (regardless of value)
#[inline]
pub fn env_is_set(key: &str) -> bool {
    std::env::var(key).is_ok()
}

impl RenderConfig {
    /// Build a configuration from `STACKERR_MODE` and `STACKERR_PROJECT`.
    ///
    /// Unset variables keep the compiled-in defaults. The environment is
    /// read on every call; nothing is cached.
    pub fn from_env() -> RenderConfig {
        let mut cfg = RenderConfig::default();

        if env_is_set(MODE_VAR) {
            let flag = env_get_str(MODE_VAR, "");
            cfg.mode = Mode::from_flag(&flag);
            if !cfg.mode.is_prod() && !flag.trim().is_empty() && flag.trim() != "dev" {
                tracing::warn!(flag = %flag, "unrecognized {}, using dev", MODE_VAR);
            }
        }

        if let Some(marker) = env_get_opt::<String>(PROJECT_VAR) {
            cfg = cfg.project_root(marker);
        }

        tracing::debug!(
            mode = %cfg.mode,
            project = cfg.project_root.as_deref().unwrap_or("-"),
            "render config loaded from environment"
        );

        cfg
    }
}

// ============================================================================
// Tests
// ============================================================================
