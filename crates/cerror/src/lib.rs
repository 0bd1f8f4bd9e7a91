//! # cerror: Coded Error
//!
//! Errors that remember where they were built, carry an optional numeric
//! classification with an HTTP status, and aggregate.
//!
//! ## Design
//!
//! Three concrete error types, each a plain `std::error::Error`:
//!
//! - **[`Fundamental`]**: a message and a captured stack. The root of a chain.
//! - **[`Wrapped`]**: a message plus a cause. Renders as `"msg: cause"`.
//! - **[`Coded`]**: a [`Coder`] plus a cause. Renders as `"description: cause"`.
//!
//! Causes are stored as [`BoxError`], so chains freely mix these types with
//! `io::Error` or anything else implementing `Error`. The chain walkers
//! ([`cause`], [`get_coder`], [`is_code`], [`is`], [`find`]) probe each node
//! for what it can do instead of requiring a shared base type.
//!
//! [`ErrorGroup`] collects independent errors and is itself an error.
//!
//! ## Rendering
//!
//! `{}` gives the one-line chain message. `{:#}` appends the stack captured
//! by this node; causes are still rendered plainly:
//!
//! ```text
//! loading config: open failed
//! app::load
//! 	src/app.rs:42
//! ...
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use cerror::codes::{NOT_FOUND, INTERNAL_SERVER};
//! use cerror::{CResult, ResultExt};
//!
//! fn find_user(id: u32) -> CResult<String> {
//!     Err(cerror::errorf_with_code!(NOT_FOUND, "user {}", id).into())
//! }
//!
//! fn handler(id: u32) -> u16 {
//!     match find_user(id).wrap("GET /users") {
//!         Ok(_) => 200,
//!         Err(err) => cerror::get_coder(&err)
//!             .map_or(INTERNAL_SERVER.http_status(), |c| c.http_status()),
//!     }
//! }
//!
//! assert_eq!(handler(42), 404);
//! ```
//!
//! ## Feature Flags
//!
//! | Flag        | Effect |
//! |-------------|--------|
//! | `backtrace` | Capture call stacks on construction (default) |
//! | `log`       | [`report`] helpers on top of the `log` facade (default) |
//!
//! Without `backtrace`, errors still record their call site and `{:#}`
//! renders that single location.
//!
//! ## Environment
//!
//! See [`Config`]: `CERROR_BACKTRACE` and `CERROR_MAX_FRAMES`.

mod config;
pub mod stack;
mod coder;
pub mod codes;
mod error;
mod chain;
mod group;
#[macro_use]
mod macros;
mod convert;

#[cfg(feature = "log")]
pub mod report;

// ── Public API ────────────────────────────────────────────────────

pub use config::{config, Config, DEFAULT_MAX_FRAMES, MAX_FRAMES_LIMIT};
pub use stack::{capture, Frame, ResolvedFrame, StackTrace};
pub use coder::Coder;
pub use codes::{is_unknown_coder, lookup, unknown_coder};
pub use error::{
    errorf, errorf_with_code, new, new_with_code, with_code, with_code_opt, with_message,
    with_messagef, wrap, wrap_opt, wrapf, BoxError, Coded, Fundamental, Wrapped,
};
pub use chain::{cause, find, get_coder, is, is_code, sources, Sources};
pub use group::{join, ErrorGroup};
pub use convert::{coder_for_io_kind, ResultExt};

/// Convenience Result alias.
pub type CResult<T> = Result<T, BoxError>;
