//! Chain traversal.
//!
//! Every walker here probes nodes for capabilities instead of requiring a
//! common base type:
//!
//! | Capability  | Probe                                   |
//! |-------------|-----------------------------------------|
//! | cause       | `Error::source()`                       |
//! | coder       | node is a [`Coded`] or a bare [`Coder`] |
//! | multi-cause | node is an [`ErrorGroup`]               |
//!
//! `cause` and `get_coder` follow single causes only. `is`, `find` and
//! `is_code` also descend into every member of a group, depth first, in
//! insertion order.

use std::any::Any;
use std::error::Error;

use crate::error::{Coded, Fundamental, Wrapped};
use crate::group::ErrorGroup;
use crate::Coder;

/// The deepest error reachable through `source()`, or `err` itself.
///
/// ```
/// let chain = cerror::wrap(cerror::wrap(cerror::new("root"), "mid"), "top");
/// assert_eq!(cerror::cause(&chain).to_string(), "root");
/// ```
pub fn cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// Iterate `err` and its sources, outermost first.
pub fn sources<'a>(err: &'a (dyn Error + 'static)) -> Sources<'a> {
    Sources { next: Some(err) }
}

/// Iterator returned by [`sources`].
#[derive(Clone)]
pub struct Sources<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Sources<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// The outermost coder in the chain.
///
/// ```
/// use cerror::codes::{NOT_FOUND, FORBIDDEN};
/// let err = cerror::with_code(cerror::with_code(cerror::new("e"), NOT_FOUND), FORBIDDEN);
/// assert_eq!(cerror::get_coder(&err), Some(&FORBIDDEN));
/// ```
pub fn get_coder<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Coder> {
    sources(err).find_map(coder_of)
}

/// True if any node, group members included, carries a coder with the same
/// numeric code as `coder`. Instance identity is irrelevant.
pub fn is_code(err: &(dyn Error + 'static), coder: &Coder) -> bool {
    visit(err, &mut |node| {
        coder_of(node)
            .filter(|c| c.code() == coder.code())
            .map(|_| ())
    })
    .is_some()
}

/// Chain equality against `target`.
///
/// A node matches when it is `target` itself, or by the rules of its
/// shape: a [`Fundamental`] with the same message, a structurally equal
/// [`Wrapped`], a [`Coded`] or [`Coder`] with the same code.
///
/// ```
/// use cerror::codes::NOT_FOUND;
/// let err = cerror::wrap(cerror::new_with_code(NOT_FOUND, "user 42"), "load profile");
/// assert!(cerror::is(&err, &NOT_FOUND));
/// ```
pub fn is(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    visit(err, &mut |node| node_is(node, target).then_some(())).is_some()
}

/// The first node of type `T`, group members included.
///
/// A [`Coded`] node also yields its [`Coder`] when `T` is `Coder`.
///
/// ```
/// use cerror::{Coder, Fundamental};
/// use cerror::codes::TIMEOUT;
/// let err = cerror::wrap(cerror::with_code(cerror::new("slow"), TIMEOUT), "fetch");
/// assert_eq!(cerror::find::<Coder>(&err), Some(&TIMEOUT));
/// assert_eq!(cerror::find::<Fundamental>(&err).map(|f| f.message()), Some("slow"));
/// ```
pub fn find<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    visit(err, &mut |node| {
        node.downcast_ref::<T>().or_else(|| {
            node.downcast_ref::<Coded>()
                .and_then(|coded| (coded.coder() as &dyn Any).downcast_ref::<T>())
        })
    })
}

/// The coder a single node exposes, if any.
pub(crate) fn coder_of<'a>(node: &'a (dyn Error + 'static)) -> Option<&'a Coder> {
    match node.downcast_ref::<Coded>() {
        Some(coded) => Some(coded.coder()),
        None => node.downcast_ref::<Coder>(),
    }
}

/// Match a single node against `target`, without walking further.
pub(crate) fn node_is(node: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    if std::ptr::addr_eq(node as *const dyn Error, target as *const dyn Error) {
        return true;
    }
    if let Some(f) = node.downcast_ref::<Fundamental>() {
        return f.matches(target);
    }
    if let Some(w) = node.downcast_ref::<Wrapped>() {
        return w.matches(target);
    }
    if let Some(c) = node.downcast_ref::<Coded>() {
        return c.matches(target);
    }
    if let Some(c) = node.downcast_ref::<Coder>() {
        return coder_of(target).is_some_and(|t| t.code() == c.code());
    }
    false
}

/// Depth-first walk: the node, then either every group member or the
/// node's source. Stops at the first `Some`.
fn visit<'a, R, F>(err: &'a (dyn Error + 'static), f: &mut F) -> Option<R>
where
    F: FnMut(&'a (dyn Error + 'static)) -> Option<R>,
{
    let mut current = Some(err);
    while let Some(node) = current {
        if let Some(found) = f(node) {
            return Some(found);
        }
        if let Some(group) = node.downcast_ref::<ErrorGroup>() {
            return group.iter().find_map(|member| visit(member, &mut *f));
        }
        current = node.source();
    }
    None
}
