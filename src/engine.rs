//! The entry point: an engine owning one configuration.

use crate::binding::Binding;
use crate::config::{Config, ConfigKey, SharedConfig};
use std::sync::LazyLock;

/// Creates [`Binding`]s that share this engine's configuration.
///
/// ```no_run
/// use shcall::Sh;
///
/// let sh = Sh::new();
/// let result = sh.cmd("git").sub("log").call(["HEAD"], [("n", "5")])?;
/// assert_eq!(result.command, ["git", "log", "-n", "5", "HEAD"]);
/// # Ok::<(), shcall::ShError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sh {
    config: SharedConfig,
}

impl Sh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config: SharedConfig::new(config),
        }
    }

    /// An engine configured from `SHCALL_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(Config::from_env())
    }

    /// Root binding for `program`. `__` in the name becomes `-`.
    #[must_use]
    pub fn cmd(&self, program: &str) -> Binding {
        Binding::new(program, self.config.clone())
    }

    #[must_use]
    pub fn config(&self) -> Config {
        self.config.snapshot()
    }

    #[must_use]
    pub fn get(&self, key: ConfigKey) -> bool {
        self.config.get(key)
    }

    /// Change an option. Bindings already created see the new value on
    /// their next call.
    pub fn set(&self, key: ConfigKey, value: bool) {
        self.config.set(key, value);
    }

    pub fn set_throw_at_error(&self, value: bool) {
        self.set(ConfigKey::ThrowAtError, value);
    }

    pub fn set_ignore_output(&self, value: bool) {
        self.set(ConfigKey::IgnoreOutput, value);
    }
}

static DEFAULT_SH: LazyLock<Sh> = LazyLock::new(Sh::new);

/// Process-wide engine with default configuration.
///
/// Its configuration is shared by every caller in the process; prefer an
/// owned [`Sh`] when changing options.
#[must_use]
pub fn sh() -> &'static Sh {
    &DEFAULT_SH
}
