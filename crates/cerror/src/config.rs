//! Process-wide capture settings.
//!
//! Read once from the environment on first use, read-only afterwards.
//!
//! # Environment Variables
//!
//! - `CERROR_BACKTRACE=0` - Disable stack capture (errors still record their call site)
//! - `CERROR_MAX_FRAMES=<n>` - Maximum frames kept per stack trace (default 32, 1..=256)
//!
//! # Usage
//!
//! ```
//! use cerror::Config;
//!
//! // Optional: pin the settings before the first error is built.
//! let _ = Config::default().max_frames(16).install();
//! assert!(cerror::config().max_frames <= 256);
//! ```

use std::str::FromStr;
use std::sync::OnceLock;

/// Default stack depth bound.
pub const DEFAULT_MAX_FRAMES: usize = 32;

/// Upper clamp for `CERROR_MAX_FRAMES`.
pub const MAX_FRAMES_LIMIT: usize = 256;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Capture settings shared by every constructor in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Capture call stacks on construction.
    pub capture: bool,
    /// Maximum frames kept per trace.
    pub max_frames: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: true,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl Config {
    /// Build from `CERROR_BACKTRACE` / `CERROR_MAX_FRAMES`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capture: env_get_bool("CERROR_BACKTRACE", defaults.capture),
            max_frames: env_get("CERROR_MAX_FRAMES", defaults.max_frames),
        }
        .clamped()
    }

    pub fn capture(mut self, enabled: bool) -> Self {
        self.capture = enabled;
        self
    }

    pub fn max_frames(mut self, n: usize) -> Self {
        self.max_frames = n;
        self.clamped()
    }

    fn clamped(mut self) -> Self {
        self.max_frames = self.max_frames.clamp(1, MAX_FRAMES_LIMIT);
        self
    }

    /// Make this the process-wide configuration.
    ///
    /// Succeeds only before anything has read the configuration; otherwise
    /// hands `self` back unchanged.
    pub fn install(self) -> Result<(), Config> {
        CONFIG.set(self.clamped())
    }
}

/// The active configuration, initialized from the environment on first call.
#[inline]
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Environment variable parsed as `T`, or `default` when unset or unparsable.
fn env_get<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Boolean environment variable.
///
/// "1", "true", "yes", "on" are true and "0", "false", "no", "off" are false
/// (case-insensitive). Anything else, including unset, yields `default`.
fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert!(cfg.capture);
        assert_eq!(cfg.max_frames, DEFAULT_MAX_FRAMES);
    }

    #[test]
    fn builder_clamps() {
        assert_eq!(Config::default().max_frames(0).max_frames, 1);
        assert_eq!(Config::default().max_frames(10_000).max_frames, MAX_FRAMES_LIMIT);
        assert_eq!(Config::default().max_frames(8).max_frames, 8);
        assert!(!Config::default().capture(false).capture);
    }

    #[test]
    fn env_get_unset_returns_default() {
        let val: usize = env_get("__CERROR_TEST_UNSET_VAR__", 42);
        assert_eq!(val, 42);
        assert!(env_get_bool("__CERROR_TEST_UNSET_VAR__", true));
        assert!(!env_get_bool("__CERROR_TEST_UNSET_VAR__", false));
    }

    #[test]
    fn env_get_parses_and_falls_back() {
        std::env::set_var("__CERROR_TEST_NUM__", " 12 ");
        assert_eq!(env_get::<usize>("__CERROR_TEST_NUM__", 0), 12);
        std::env::set_var("__CERROR_TEST_NUM__", "twelve");
        assert_eq!(env_get::<usize>("__CERROR_TEST_NUM__", 7), 7);
        std::env::remove_var("__CERROR_TEST_NUM__");
    }

    #[test]
    fn env_get_bool_variants() {
        for (raw, expected) in [("1", true), ("TRUE", true), ("on", true), ("0", false), ("off", false), ("No", false)] {
            std::env::set_var("__CERROR_TEST_BOOL__", raw);
            assert_eq!(env_get_bool("__CERROR_TEST_BOOL__", !expected), expected, "value {raw:?}");
        }
        std::env::set_var("__CERROR_TEST_BOOL__", "garbage");
        assert!(env_get_bool("__CERROR_TEST_BOOL__", true));
        std::env::remove_var("__CERROR_TEST_BOOL__");
    }

    #[test]
    fn active_config_is_stable() {
        let a = config();
        let b = config();
        assert!(std::ptr::eq(a, b));
        assert!((1..=MAX_FRAMES_LIMIT).contains(&a.max_frames));
    }
}
