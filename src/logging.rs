//! Process-wide logging bootstrap.
//!
//! # Invariants
//! - Logging is started at most once per process.
//! - Re-initialization with the same level is a no-op; with another level it
//!   is rejected.
//! - Initialization never panics.

use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

use crate::errors::Error;

const SUPPORTED_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Normalize a level name; `None` for unsupported names.
pub fn normalize_level(level: &str) -> Option<&'static str> {
    let wanted = level.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS.iter().copied().find(|l| *l == wanted)
}

/// Start logging to stderr at `level`.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// # Errors
/// - Returns `Error::Logging` when `level` is unsupported.
/// - Returns `Error::Logging` when logging already runs at another level.
/// - Returns `Error::Logging` when the backend fails to start.
pub fn init_logging(level: &str) -> Result<(), Error> {
    let normalized = normalize_level(level)
        .ok_or_else(|| Error::Logging(format!("unsupported log level `{level}`")))?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, Error> {
        let logger = Logger::try_with_env_or_str(normalized)
            .map_err(|e| Error::Logging(format!("invalid log level `{normalized}`: {e}")))?
            .log_to_stderr()
            .write_mode(WriteMode::Direct)
            .format(flexi_logger::default_format)
            .start()
            .map_err(|e| Error::Logging(format!("failed to start logger: {e}")))?;

        info!(
            "event=app_start status=ok version={} level={normalized}",
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level: normalized,
            _logger: logger,
        })
    })?;

    if state.level != normalized {
        return Err(Error::Logging(format!(
            "logging already initialized with level `{}`; refusing to switch to `{normalized}`",
            state.level
        )));
    }
    Ok(())
}

/// Active log level, or `None` before [`init_logging`] succeeded.
pub fn logging_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("INFO"), Some("info"));
        assert_eq!(normalize_level(" warn "), Some("warn"));
        assert_eq!(normalize_level("verbose"), None);
    }

    #[test]
    fn test_init_rejects_unknown_level() {
        assert!(matches!(init_logging("loud"), Err(Error::Logging(_))));
    }

    #[test]
    fn test_init_is_idempotent_and_pins_level() {
        init_logging("warn").unwrap();
        init_logging("warn").unwrap();
        assert_eq!(logging_level(), Some("warn"));
        assert!(matches!(init_logging("debug"), Err(Error::Logging(_))));
    }
}
