//! Process environment helpers
//!
//! The process environment is how resolved values reach clusterctl and the
//! template substitution done by the test framework. Every write made through
//! this module is serialized by one process-wide guard, so "already set" is
//! always judged against the latest state.

use parking_lot::Mutex;
use tracing::debug;

const MASKED_VALUE: &str = "*******";

static ENV_GUARD: Mutex<()> = parking_lot::const_mutex(());

/// One variable to export
#[derive(Debug, Clone, Copy)]
pub struct EnvVar<'a> {
    /// Variable name
    pub key: &'a str,
    /// Value to write if the variable is unset
    pub value: &'a str,
    /// Mask the value in logs
    pub private: bool,
}

impl<'a> EnvVar<'a> {
    /// A variable whose value may be logged
    pub fn public(key: &'a str, value: &'a str) -> Self {
        Self {
            key,
            value,
            private: false,
        }
    }
}

/// Set an environment variable unless it already has a value
///
/// An existing value wins, so repeated setup calls are idempotent. When
/// `private` is true the value is masked in the log line. Returns whether the
/// variable was written.
pub fn set_env_var_if_unset(key: &str, value: &str, private: bool) -> bool {
    let _guard = ENV_GUARD.lock();
    write_if_unset(key, value, private)
}

/// Set a group of variables under a single hold of the guard
///
/// A concurrent caller exporting the same keys either runs entirely before or
/// entirely after this one, so a group is never interleaved with another.
/// Returns how many variables were written.
pub fn set_env_vars_if_unset(vars: &[EnvVar<'_>]) -> usize {
    let _guard = ENV_GUARD.lock();
    vars.iter()
        .filter(|var| write_if_unset(var.key, var.value, var.private))
        .count()
}

fn write_if_unset(key: &str, value: &str, private: bool) -> bool {
    let printable = if private { MASKED_VALUE } else { value };

    if std::env::var_os(key).is_some() {
        debug!(key, "Environment variable already set, keeping existing value");
        return false;
    }

    debug!(key, value = printable, "Setting environment variable");
    std::env::set_var(key, value);
    true
}
