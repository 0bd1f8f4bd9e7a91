use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::chain::{coder_of, node_is};
use crate::codes::UNKNOWN;
use crate::stack::StackTrace;
use crate::Coder;

/// Owned, thread-safe type-erased error. Every cause in a chain is one of these.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A terminal error: a message and the stack where it was created.
///
/// Built by [`new`], [`errorf`] and the `errorf!` macro.
pub struct Fundamental {
    message: String,
    stack: StackTrace,
    location: &'static Location<'static>,
}

/// An error annotated with a message, keeping the original as its cause.
///
/// The stack is captured where the wrap happened, not inherited from the
/// cause. Renders as `"{message}: {cause}"`.
pub struct Wrapped {
    message: String,
    cause: BoxError,
    stack: StackTrace,
    location: &'static Location<'static>,
}

/// An error classified by a [`Coder`].
///
/// The coder is always present: building one without a coder substitutes
/// [`codes::UNKNOWN`](crate::codes::UNKNOWN).
pub struct Coded {
    cause: BoxError,
    coder: Coder,
    stack: StackTrace,
    location: &'static Location<'static>,
}

// ── Constructors ──────────────────────────────────────────────────

/// Create a [`Fundamental`] error, capturing the stack here.
///
/// ```
/// let err = cerror::new("x");
/// assert_eq!(format!("{}", err), "x");
/// assert!(format!("{:#}", err).starts_with("x\n"));
/// ```
#[track_caller]
pub fn new(message: impl Into<String>) -> Fundamental {
    Fundamental::build(message.into(), Location::caller())
}

/// [`new`] with a formatted message. See also `errorf!`.
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) -> Fundamental {
    Fundamental::build(fmt::format(args), Location::caller())
}

/// Annotate `err` with `message`, capturing the stack here.
///
/// An empty message still renders the separator: `wrap(e, "")` displays
/// as `": {e}"`.
///
/// ```
/// let err = cerror::wrap(cerror::new("db down"), "lookup failed");
/// assert_eq!(err.to_string(), "lookup failed: db down");
/// ```
#[track_caller]
pub fn wrap<E>(err: E, message: impl Into<String>) -> Wrapped
where
    E: Into<BoxError>,
{
    Wrapped::build(err.into(), message.into(), Location::caller())
}

/// [`wrap`] with a formatted message. See also `wrapf!`.
#[track_caller]
pub fn wrapf<E>(err: E, args: fmt::Arguments<'_>) -> Wrapped
where
    E: Into<BoxError>,
{
    Wrapped::build(err.into(), fmt::format(args), Location::caller())
}

/// Alias of [`wrap`].
#[track_caller]
pub fn with_message<E>(err: E, message: impl Into<String>) -> Wrapped
where
    E: Into<BoxError>,
{
    Wrapped::build(err.into(), message.into(), Location::caller())
}

/// Alias of [`wrapf`].
#[track_caller]
pub fn with_messagef<E>(err: E, args: fmt::Arguments<'_>) -> Wrapped
where
    E: Into<BoxError>,
{
    Wrapped::build(err.into(), fmt::format(args), Location::caller())
}

/// [`wrap`] for an optional error: `None` stays `None`.
#[track_caller]
pub fn wrap_opt<E>(err: Option<E>, message: impl Into<String>) -> Option<Wrapped>
where
    E: Into<BoxError>,
{
    let location = Location::caller();
    err.map(|e| Wrapped::build(e.into(), message.into(), location))
}

/// Create a [`Coded`] error around a fresh message.
///
/// The inner message node carries no stack of its own; the coded error's
/// stack is the one that counts. `None` selects the unknown coder.
///
/// ```
/// use cerror::codes::NOT_FOUND;
/// let err = cerror::new_with_code(NOT_FOUND, "user 42");
/// assert_eq!(err.to_string(), "resource not found: user 42");
/// ```
#[track_caller]
pub fn new_with_code(coder: impl Into<Option<Coder>>, text: impl Into<String>) -> Coded {
    let location = Location::caller();
    let inner = Fundamental::bare(text.into(), location);
    Coded::build(Box::new(inner), coder.into(), location)
}

/// [`new_with_code`] with a formatted message. See also `errorf_with_code!`.
#[track_caller]
pub fn errorf_with_code(coder: impl Into<Option<Coder>>, args: fmt::Arguments<'_>) -> Coded {
    let location = Location::caller();
    let inner = Fundamental::bare(fmt::format(args), location);
    Coded::build(Box::new(inner), coder.into(), location)
}

/// Attach `coder` to `err` directly, capturing the stack here.
///
/// `None` selects the unknown coder.
#[track_caller]
pub fn with_code<E>(err: E, coder: impl Into<Option<Coder>>) -> Coded
where
    E: Into<BoxError>,
{
    Coded::build(err.into(), coder.into(), Location::caller())
}

/// [`with_code`] for an optional error: `None` stays `None`.
#[track_caller]
pub fn with_code_opt<E>(err: Option<E>, coder: impl Into<Option<Coder>>) -> Option<Coded>
where
    E: Into<BoxError>,
{
    let location = Location::caller();
    err.map(|e| Coded::build(e.into(), coder.into(), location))
}

// ── Fundamental ───────────────────────────────────────────────────

impl Fundamental {
    pub(crate) fn build(message: String, location: &'static Location<'static>) -> Self {
        Self {
            message,
            stack: StackTrace::capture(0),
            location,
        }
    }

    /// No stack: the enclosing coded error owns the trace.
    fn bare(message: String, location: &'static Location<'static>) -> Self {
        Self {
            message,
            stack: StackTrace::empty(),
            location,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }

    /// Where this error was built.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub(crate) fn matches(&self, target: &(dyn Error + 'static)) -> bool {
        target
            .downcast_ref::<Fundamental>()
            .is_some_and(|t| t.message == self.message)
    }
}

impl Error for Fundamental {}

impl fmt::Display for Fundamental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if f.alternate() {
            write_trace(f, &self.stack, self.location)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fundamental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fundamental")
            .field("message", &self.message)
            .field("location", &format_args!("{}:{}", self.location.file(), self.location.line()))
            .field("stack", &self.stack)
            .finish()
    }
}

// ── Wrapped ───────────────────────────────────────────────────────

impl Wrapped {
    pub(crate) fn build(cause: BoxError, message: String, location: &'static Location<'static>) -> Self {
        Self {
            message,
            cause,
            stack: StackTrace::capture(0),
            location,
        }
    }

    /// The annotation added by this layer, without the cause.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }

    #[inline]
    pub fn into_cause(self) -> BoxError {
        self.cause
    }

    #[inline]
    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }

    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Only a structurally identical wrapper matches: same message and an
    /// immediate cause that matches the target's immediate cause.
    pub(crate) fn matches(&self, target: &(dyn Error + 'static)) -> bool {
        target
            .downcast_ref::<Wrapped>()
            .is_some_and(|t| t.message == self.message && node_is(&*self.cause, &*t.cause))
    }
}

impl Error for Wrapped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.cause)
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.cause)?;
        if f.alternate() {
            write_trace(f, &self.stack, self.location)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("message", &self.message)
            .field("cause", &self.cause)
            .field("location", &format_args!("{}:{}", self.location.file(), self.location.line()))
            .field("stack", &self.stack)
            .finish()
    }
}

// ── Coded ─────────────────────────────────────────────────────────

impl Coded {
    pub(crate) fn build(
        cause: BoxError,
        coder: Option<Coder>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            cause,
            coder: coder.unwrap_or(UNKNOWN),
            stack: StackTrace::capture(0),
            location,
        }
    }

    #[inline]
    pub fn coder(&self) -> &Coder {
        &self.coder
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.coder.code()
    }

    #[inline]
    pub fn http_status(&self) -> u16 {
        self.coder.http_status()
    }

    #[inline]
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }

    #[inline]
    pub fn into_cause(self) -> BoxError {
        self.cause
    }

    #[inline]
    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }

    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// A coder target, or anything carrying a coder, matches on code alone.
    pub(crate) fn matches(&self, target: &(dyn Error + 'static)) -> bool {
        coder_of(target).is_some_and(|c| c.code() == self.coder.code())
    }
}

impl Error for Coded {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.cause)
    }
}

impl fmt::Display for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self.coder.description();
        if description.is_empty() {
            write!(f, "{}", self.cause)?;
        } else {
            write!(f, "{}: {}", description, self.cause)?;
        }
        if f.alternate() {
            write_trace(f, &self.stack, self.location)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coded")
            .field("coder", &self.coder)
            .field("cause", &self.cause)
            .field("location", &format_args!("{}:{}", self.location.file(), self.location.line()))
            .field("stack", &self.stack)
            .finish()
    }
}

/// Verbose tail shared by all three variants. Falls back to the call site
/// when no source-mapped frame is available (capture disabled, stripped
/// binary).
fn write_trace(
    f: &mut fmt::Formatter<'_>,
    stack: &StackTrace,
    location: &'static Location<'static>,
) -> fmt::Result {
    if stack.resolved().is_empty() {
        write!(f, "\n\t{}:{}", location.file(), location.line())
    } else {
        write!(f, "{:#}", stack)
    }
}
