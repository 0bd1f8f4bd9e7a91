//! Aggregation of independent errors under one optional message.
//!
//! A group is append-only: members are never removed or reordered. `add`
//! takes `&mut self`, so concurrent writers have to go through a lock of
//! the caller's choosing; shared reads of a group nobody is mutating are
//! free.

use std::error::Error;
use std::fmt;

use crate::error::BoxError;

/// An ordered collection of errors, itself usable as an error.
///
/// ```
/// let mut eg = cerror::ErrorGroup::with_message("m");
/// eg.add(cerror::new("e1"));
/// eg.add_opt(None::<cerror::Fundamental>);
/// eg.add(cerror::new("e2"));
/// assert_eq!(eg.len(), 2);
/// assert_eq!(eg.to_string(), "m: e1; e2");
/// ```
#[derive(Default)]
pub struct ErrorGroup {
    errors: Vec<BoxError>,
    message: Option<String>,
}

impl ErrorGroup {
    /// An empty group without a message.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty group with an overarching message. An empty string counts
    /// as no message.
    pub fn with_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: Vec::new(),
            message: (!message.is_empty()).then_some(message),
        }
    }

    /// Append `err`.
    pub fn add<E>(&mut self, err: E)
    where
        E: Into<BoxError>,
    {
        self.errors.push(err.into());
    }

    /// Append `err` if there is one.
    pub fn add_opt<E>(&mut self, err: Option<E>)
    where
        E: Into<BoxError>,
    {
        if let Some(err) = err {
            self.add(err);
        }
    }

    /// Append the error of a failed result; hand back the value of a
    /// successful one.
    pub fn add_result<T, E>(&mut self, result: Result<T, E>) -> Option<T>
    where
        E: Into<BoxError>,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add(err);
                None
            }
        }
    }

    /// Members in insertion order.
    #[inline]
    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Error + Send + Sync + 'static)> + '_ {
        self.errors.iter().map(|e| &**e)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// `Ok(())` for an empty group, the group itself otherwise.
    pub fn into_result(self) -> Result<(), ErrorGroup> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_errors(self) -> Vec<BoxError> {
        self.errors
    }

    fn write_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.errors.len()) {
            (None, 0) => return f.write_str("no errors in group"),
            (Some(message), 0) => return f.write_str(message),
            (Some(message), _) => write!(f, "{message}: ")?,
            (None, 1) => f.write_str("an error occurred: ")?,
            (None, _) => f.write_str("multiple errors occurred: ")?,
        }
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }

    fn write_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{message}")?;
        } else if self.errors.is_empty() {
            return f.write_str("empty error group");
        }
        let n = self.errors.len();
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "Error {} of {}: {:#}", i + 1, n, err)?;
        }
        Ok(())
    }
}

/// Collect the errors of `errs` into a group, or `None` when there are none.
///
/// ```
/// assert!(cerror::join(Vec::<cerror::Fundamental>::new()).is_none());
/// let joined = cerror::join([cerror::new("a"), cerror::new("b")]);
/// assert_eq!(joined.map(|g| g.len()), Some(2));
/// ```
pub fn join<I, E>(errs: I) -> Option<ErrorGroup>
where
    I: IntoIterator<Item = E>,
    E: Into<BoxError>,
{
    let group: ErrorGroup = errs.into_iter().collect();
    (!group.is_empty()).then_some(group)
}

impl<E> Extend<E> for ErrorGroup
where
    E: Into<BoxError>,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.errors.extend(iter.into_iter().map(Into::into));
    }
}

impl<E> FromIterator<E> for ErrorGroup
where
    E: Into<BoxError>,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut group = ErrorGroup::new();
        group.extend(iter);
        group
    }
}

impl<'a> IntoIterator for &'a ErrorGroup {
    type Item = &'a BoxError;
    type IntoIter = std::slice::Iter<'a, BoxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Members are reached through [`ErrorGroup::errors`], not `source()`:
/// a group has no single cause.
impl Error for ErrorGroup {}

impl fmt::Display for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_verbose(f)
        } else {
            self.write_plain(f)
        }
    }
}

impl fmt::Debug for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("ErrorGroup");
        if let Some(message) = &self.message {
            d.field("message", message);
        }
        d.field("errors", &self.errors).finish()
    }
}
