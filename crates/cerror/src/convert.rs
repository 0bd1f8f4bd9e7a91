use std::io;
use std::panic::Location;

use crate::codes::{
    BAD_REQUEST, CONFLICT, FORBIDDEN, INTERNAL_SERVER, NOT_FOUND, TIMEOUT, UNAUTHORIZED,
    UNAVAILABLE,
};
use crate::error::{BoxError, Coded, Wrapped};
use crate::Coder;

// ── io::ErrorKind <-> Coder ───────────────────────────────────────

/// Map an `io::ErrorKind` to the closest catalog coder.
pub fn coder_for_io_kind(kind: io::ErrorKind) -> Coder {
    match kind {
        io::ErrorKind::NotFound          => NOT_FOUND,
        io::ErrorKind::PermissionDenied  => FORBIDDEN,
        io::ErrorKind::AlreadyExists     => CONFLICT,
        io::ErrorKind::InvalidInput      => BAD_REQUEST,
        io::ErrorKind::InvalidData       => BAD_REQUEST,
        io::ErrorKind::TimedOut          => TIMEOUT,
        io::ErrorKind::WouldBlock        => UNAVAILABLE,
        io::ErrorKind::ConnectionRefused => UNAVAILABLE,
        io::ErrorKind::ConnectionReset   => UNAVAILABLE,
        io::ErrorKind::ConnectionAborted => UNAVAILABLE,
        io::ErrorKind::NotConnected      => UNAVAILABLE,
        _                                => INTERNAL_SERVER,
    }
}

/// Map a coder back to an `io::ErrorKind`, by code.
fn io_kind_for_coder(coder: &Coder) -> io::ErrorKind {
    match coder.code() {
        c if c == NOT_FOUND.code()    => io::ErrorKind::NotFound,
        c if c == FORBIDDEN.code()    => io::ErrorKind::PermissionDenied,
        c if c == UNAUTHORIZED.code() => io::ErrorKind::PermissionDenied,
        c if c == CONFLICT.code()     => io::ErrorKind::AlreadyExists,
        c if c == BAD_REQUEST.code()  => io::ErrorKind::InvalidInput,
        c if c == TIMEOUT.code()      => io::ErrorKind::TimedOut,
        _                             => io::ErrorKind::Other,
    }
}

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for Coded {
    /// Classify an `io::Error` by its kind, keeping it as the cause.
    #[track_caller]
    fn from(err: io::Error) -> Self {
        let coder = coder_for_io_kind(err.kind());
        Coded::build(Box::new(err), Some(coder), Location::caller())
    }
}

// ── Into<io::Error> ───────────────────────────────────────────────

impl From<Coded> for io::Error {
    /// Wrap the coded error as a custom `io::Error` whose kind follows the coder.
    fn from(err: Coded) -> Self {
        io::Error::new(io_kind_for_coder(err.coder()), err)
    }
}

// ── ResultExt: annotation on Results ─────────────────────────────

/// Extension trait for wrapping and classifying the error of a `Result`.
///
/// `Ok` values pass through untouched and nothing is captured for them.
///
/// ```
/// use cerror::ResultExt;
/// use cerror::codes::NOT_FOUND;
///
/// fn read() -> Result<String, std::io::Error> {
///     Err(std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml"))
/// }
///
/// let err = read().wrap("loading config").with_code(NOT_FOUND).unwrap_err();
/// assert_eq!(err.to_string(), "resource not found: loading config: config.toml");
///
/// let ok: Result<u8, std::io::Error> = Ok(1);
/// assert_eq!(ok.wrap("unused").ok(), Some(1));
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with a message.
    fn wrap(self, message: impl Into<String>) -> Result<T, Wrapped>;

    /// Wrap the error with a lazily built message.
    fn wrap_with<M, F>(self, message: F) -> Result<T, Wrapped>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Alias of [`ResultExt::wrap`].
    fn with_message(self, message: impl Into<String>) -> Result<T, Wrapped>;

    /// Attach a coder to the error; `None` selects the unknown coder.
    fn with_code(self, coder: impl Into<Option<Coder>>) -> Result<T, Coded>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn wrap(self, message: impl Into<String>) -> Result<T, Wrapped> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Wrapped::build(err.into(), message.into(), Location::caller())),
        }
    }

    #[track_caller]
    fn wrap_with<M, F>(self, message: F) -> Result<T, Wrapped>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Wrapped::build(err.into(), message().into(), Location::caller())),
        }
    }

    #[track_caller]
    fn with_message(self, message: impl Into<String>) -> Result<T, Wrapped> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Wrapped::build(err.into(), message.into(), Location::caller())),
        }
    }

    #[track_caller]
    fn with_code(self, coder: impl Into<Option<Coder>>) -> Result<T, Coded> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Coded::build(err.into(), coder.into(), Location::caller())),
        }
    }
}
