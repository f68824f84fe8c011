//! # Runtime Configuration Module
//!
//! Environment-driven settings for the router's matching behavior.
//!
//! ## Environment Variables
//!
//! ### `SROUTER_ENFORCE_METHOD`
//!
//! When `true`, a route only matches requests whose method equals the
//! route's method. When `false` (the default) matching is purely structural
//! and the first route whose template matches the path wins regardless of
//! method.
//!
//! ### `SROUTER_SLOW_MATCH_US`
//!
//! Threshold in microseconds above which a match is logged at `warn`.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use simple_router::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("Method filtering: {}", config.enforce_method);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;

/// Router configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Require `request.method == route.method` in addition to the path match
    pub enforce_method: bool,
    /// Matches slower than this are logged at `warn`
    pub slow_match_threshold: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            enforce_method: false,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let enforce_method = lookup("SROUTER_ENFORCE_METHOD")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.enforce_method);
        let slow_match_threshold = lookup("SROUTER_SLOW_MATCH_US")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_micros)
            .unwrap_or(defaults.slow_match_threshold);
        RouterConfig {
            enforce_method,
            slow_match_threshold,
        }
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
