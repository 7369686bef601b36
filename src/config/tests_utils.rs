//! Shared test utilities for config module tests.

use std::sync::Mutex;

use super::env_parser;

/// Mutex to serialize environment variable tests and prevent race conditions.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clean up environment variables read by nav2contacts config.
pub fn cleanup_env_vars() {
    for var in [
        env_parser::DATABASE_PATH,
        env_parser::GEOCODER_URL,
        env_parser::GEOCODER_TIMEOUT_SECS,
        env_parser::LOG_LEVEL,
    ] {
        // SAFETY: callers hold ENV_MUTEX.
        unsafe {
            std::env::remove_var(var);
        }
    }
}
