//! Emitting errors through the `log` facade.
//!
//! Nothing in this crate logs by itself. These helpers are for the layer
//! that finally handles an error (a request handler, a CLI `main`) and
//! wants one consistent log line for it.
//!
//! The level follows the outermost coder's HTTP status:
//!
//! | Status         | Level   |
//! |----------------|---------|
//! | no coder, 5xx  | `Error` |
//! | 4xx            | `Warn`  |
//! | anything else  | `Info`  |
//!
//! ```ignore
//! use cerror::report;
//!
//! if let Err(err) = handle(req) {
//!     report::log_error("GET /users/42", &err);
//! }
//! ```

use std::error::Error;

use log::Level;

use crate::chain::get_coder;

/// Log target used by every helper here.
pub const TARGET: &str = "cerror";

/// The level an error should be logged at.
pub fn level_for(err: &(dyn Error + 'static)) -> Level {
    match get_coder(err).map(|c| c.http_status()) {
        None => Level::Error,
        Some(status) if status >= 500 => Level::Error,
        Some(status) if status >= 400 => Level::Warn,
        Some(_) => Level::Info,
    }
}

/// One line: context, plain message and classification.
pub fn log_error(context: &str, err: &(dyn Error + 'static)) {
    log_at(level_for(err), context, err, false);
}

/// Like [`log_error`], followed by the verbose rendering (stack included).
pub fn log_error_verbose(context: &str, err: &(dyn Error + 'static)) {
    log_at(level_for(err), context, err, true);
}

/// Log `err` at an explicit level.
pub fn log_at(level: Level, context: &str, err: &(dyn Error + 'static), verbose: bool) {
    if !log::log_enabled!(target: TARGET, level) {
        return;
    }
    match (get_coder(err), verbose) {
        (Some(c), false) => log::log!(
            target: TARGET, level,
            "{context}: {err} (code={}, status={})", c.code(), c.http_status()
        ),
        (Some(c), true) => log::log!(
            target: TARGET, level,
            "{context}: {err:#}\n(code={}, status={})", c.code(), c.http_status()
        ),
        (None, false) => log::log!(target: TARGET, level, "{context}: {err}"),
        (None, true) => log::log!(target: TARGET, level, "{context}: {err:#}"),
    }
}
