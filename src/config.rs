//! Per-engine behavioral switches.
//!
//! A [`Config`] is owned by one [`crate::Sh`] and shared with every
//! [`crate::Binding`] created from it. Invocations read it when they run, so a
//! change is seen by bindings created earlier. Changing it while another
//! thread is mid-invocation is memory-safe but unordered: that invocation may
//! see either value.

use crate::error::ShError;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variable that sets `throw_at_error` in [`Config::from_env`].
pub const THROW_AT_ERROR_ENV: &str = "SHCALL_THROW_AT_ERROR";
/// Environment variable that sets `ignore_output` in [`Config::from_env`].
pub const IGNORE_OUTPUT_ENV: &str = "SHCALL_IGNORE_OUTPUT";

/// The recognized configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Turn a nonzero exit code into [`ShError::Invocation`].
    ThrowAtError,
    /// Discard the child's output instead of capturing it.
    IgnoreOutput,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::ThrowAtError, ConfigKey::IgnoreOutput];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThrowAtError => "throw_at_error",
            Self::IgnoreOutput => "ignore_output",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ShError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ShError::UnknownConfigKey(s.to_string()))
    }
}

/// Behavioral switches read by every invocation. Both default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub throw_at_error: bool,
    pub ignore_output: bool,
}

impl Config {
    /// Build a configuration from `SHCALL_THROW_AT_ERROR` and
    /// `SHCALL_IGNORE_OUTPUT`. Unset variables leave the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            throw_at_error: env_flag(THROW_AT_ERROR_ENV),
            ignore_output: env_flag(IGNORE_OUTPUT_ENV),
        }
    }

    #[must_use]
    pub fn get(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::ThrowAtError => self.throw_at_error,
            ConfigKey::IgnoreOutput => self.ignore_output,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: bool) {
        match key {
            ConfigKey::ThrowAtError => self.throw_at_error = value,
            ConfigKey::IgnoreOutput => self.ignore_output = value,
        }
    }
}

/// Check whether an environment variable holds a truthy value
/// (`1`, `true`, `yes` or `on`, any case).
fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| is_truthy(&value))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Handle to a [`Config`] shared between an engine and its bindings.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig(Arc<RwLock<Config>>);

impl SharedConfig {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Copy of the current configuration.
    #[must_use]
    pub fn snapshot(&self) -> Config {
        // Config is plain data, so a poisoned lock still holds a usable value.
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, f: impl FnOnce(&mut Config)) {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    #[must_use]
    pub fn get(&self, key: ConfigKey) -> bool {
        self.snapshot().get(key)
    }

    pub fn set(&self, key: ConfigKey, value: bool) {
        self.update(|config| config.set(key, value));
    }

    /// Whether both handles point at the same configuration.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
