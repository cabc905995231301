// vim: tw=80
//! Argument patterns
//!
//! A [`Pattern`] decides whether one declared argument matches one actual
//! argument of a recorded call.

use std::{
    any::type_name,
    borrow::Cow,
    fmt,
    marker::PhantomData,
    sync::Arc
};

use predicates::prelude::*;
use predicates_tree::CaseTreeExt;

use crate::value::{Arg, Nil, Value};

/// Type-erased matching logic for patterns that inspect the value.
trait ArgMatcher: fmt::Display {
    fn matches(&self, actual: &dyn Value) -> bool;

    /// Say why `actual` was rejected.
    fn explain(&self, actual: &dyn Value) -> String;
}

/// Equality through the value's own `PartialEq`
struct EqualTo<T>(T);

impl<T: PartialEq + Value> ArgMatcher for EqualTo<T> {
    fn matches(&self, actual: &dyn Value) -> bool {
        actual.downcast_ref::<T>()
            .map_or(false, |a| self.0 == *a)
    }

    fn explain(&self, actual: &dyn Value) -> String {
        if actual.downcast_ref::<T>().is_ok() {
            format!("{actual:?} != {:?}", self.0)
        } else {
            mismatch::<T>(actual)
        }
    }
}

impl<T: fmt::Debug> fmt::Display for EqualTo<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Pointer identity of a shared value
struct SameAs<T: ?Sized>(Arc<T>);

impl<T: fmt::Debug + ?Sized + 'static> ArgMatcher for SameAs<T> {
    fn matches(&self, actual: &dyn Value) -> bool {
        actual.downcast_ref::<Arc<T>>()
            .map_or(false, |a| Arc::ptr_eq(&self.0, a))
    }

    fn explain(&self, actual: &dyn Value) -> String {
        if actual.downcast_ref::<Arc<T>>().is_ok() {
            format!("{actual:?} is not the same allocation")
        } else {
            mismatch::<Arc<T>>(actual)
        }
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Display for SameAs<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "same as {:?}", self.0)
    }
}

/// Adapts a `Predicate<T>` to type-erased arguments
struct Satisfies<T, P> {
    predicate: P,
    description: Option<String>,
    _t: PhantomData<fn(&T)>
}

impl<T: Value, P: Predicate<T>> ArgMatcher for Satisfies<T, P> {
    fn matches(&self, actual: &dyn Value) -> bool {
        actual.downcast_ref::<T>()
            .map_or(false, |a| self.predicate.eval(a))
    }

    fn explain(&self, actual: &dyn Value) -> String {
        match actual.downcast_ref::<T>() {
            Ok(a) => match self.predicate.find_case(false, a) {
                Some(case) => case.tree().to_string(),
                None => format!("{actual:?} does not satisfy {self}")
            },
            Err(_) => mismatch::<T>(actual)
        }
    }
}

impl<T, P: fmt::Display> fmt::Display for Satisfies<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.description {
            Some(d) => f.write_str(d),
            None => fmt::Display::fmt(&self.predicate, f)
        }
    }
}

fn mismatch<T: ?Sized>(actual: &dyn Value) -> String {
    format!("expected a {}, found {actual:?} of type {}",
            type_name::<T>(), actual.value_type())
}

/// The matching rule for one positional argument.
pub enum Pattern {
    /// Matches anything, nil included.
    Wildcard,
    /// Matches any value whose type name is exactly this string.  A writable
    /// argument's type name is `&mut` followed by its pointee's.
    OfType(Cow<'static, str>),
    /// Matches only the absence value.
    Nil,
    /// Matches one specific value.
    Exact(Matcher),
    /// Matches values satisfying a predicate.
    Predicate(Matcher),
}

/// Opaque matcher stored inside [`Pattern::Exact`] and
/// [`Pattern::Predicate`].  Build one with [`eq`], [`same`], [`matching`] or
/// [`any_if`].
pub struct Matcher(Box<dyn ArgMatcher>);

impl Pattern {
    /// Does this pattern accept `actual`?
    pub fn matches(&self, actual: &Arg) -> bool {
        match (self, actual.value()) {
            (Pattern::Wildcard, _) => true,
            (Pattern::Nil, _) => actual.is_nil(),
            (_, None) => false,
            (Pattern::OfType(t), Some(_)) =>
                actual.value_type().is_some_and(|n| n == *t),
            (Pattern::Exact(m), Some(v)) | (Pattern::Predicate(m), Some(v)) =>
                m.0.matches(v)
        }
    }

    /// Describe why `actual` does not match.  Only meaningful when
    /// [`matches`](Self::matches) returned false.
    pub(crate) fn explain(&self, actual: &Arg) -> String {
        match (self, actual.value()) {
            (Pattern::Wildcard, _) => String::new(),
            (Pattern::Nil, _) => format!("expected nil, found {actual}"),
            (_, None) => format!("expected {self}, found nil"),
            (Pattern::OfType(t), Some(_)) => format!(
                "expected a {t}, found a {}",
                actual.value_type().unwrap_or_default()
            ),
            (Pattern::Exact(m), Some(v)) | (Pattern::Predicate(m), Some(v)) =>
                m.0.explain(v)
        }
    }

    fn exact<M: ArgMatcher + 'static>(m: M) -> Self {
        Pattern::Exact(Matcher(Box::new(m)))
    }

    fn predicate<M: ArgMatcher + 'static>(m: M) -> Self {
        Pattern::Predicate(Matcher(Box::new(m)))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str("any"),
            Pattern::OfType(t) => f.write_str(t),
            Pattern::Nil => f.write_str("nil"),
            Pattern::Exact(m) | Pattern::Predicate(m) =>
                fmt::Display::fmt(&*m.0, f)
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Plain values become exact patterns.
impl<T: PartialEq + Value> From<T> for Pattern {
    fn from(v: T) -> Self {
        eq(v)
    }
}

impl From<Nil> for Pattern {
    fn from(_: Nil) -> Self {
        Pattern::Nil
    }
}

/// Match any argument.
pub fn any() -> Pattern {
    Pattern::Wildcard
}

/// Match any argument whose type name, as given by
/// [`std::any::type_name`], equals `name`.
///
/// A writable argument is named as its reference type, so a `&mut String`
/// needs `"&mut alloc::string::String"` or `any_of::<&mut String>()`.
///
/// ```
/// # use dynmock::*;
/// let mut mock = Mock::new();
/// mock.when("len", params![any_of_type("alloc::string::String")])
///     .return_value(3usize);
/// assert_eq!(3, mock.called("len", args![&"abc".to_string()]).usize(0));
/// ```
pub fn any_of_type<S: Into<Cow<'static, str>>>(name: S) -> Pattern {
    Pattern::OfType(name.into())
}

/// Match any argument of type `T`.  Shorthand for
/// `any_of_type(std::any::type_name::<T>())`.
pub fn any_of<T: ?Sized>() -> Pattern {
    Pattern::OfType(Cow::Borrowed(type_name::<T>()))
}

/// Match only the absence value: a nil argument, or a reference to an
/// `Option` that is `None`.
pub fn nil() -> Pattern {
    Pattern::Nil
}

/// Match arguments equal to `v`.
///
/// Equality is `PartialEq`: derived implementations compare structurally,
/// hand-written ones let a type supply its own notion of equality.  An
/// argument of a different type never matches.
pub fn eq<T: PartialEq + Value>(v: T) -> Pattern {
    Pattern::exact(EqualTo(v))
}

/// Match an `Arc` pointing to the same allocation as `v`.  Useful for values
/// that have no meaningful equality, like channels or handles.
pub fn same<T: fmt::Debug + ?Sized + 'static>(v: &Arc<T>) -> Pattern {
    Pattern::exact(SameAs(Arc::clone(v)))
}

/// Match arguments of type `T` that satisfy a
/// [`Predicate`](predicates::Predicate).
///
/// ```
/// # use dynmock::*;
/// let mut mock = Mock::new();
/// mock.when("sqrt", params![matching::<f64, _>(predicate::ge(0.0))])
///     .return_value(2.0f64);
/// assert_eq!(2.0, mock.called("sqrt", args![&4.0f64]).f64(0));
/// ```
pub fn matching<T, P>(predicate: P) -> Pattern
    where T: Value, P: Predicate<T> + 'static
{
    Pattern::predicate(Satisfies {
        predicate,
        description: None,
        _t: PhantomData
    })
}

/// Match arguments of type `T` for which `f` returns true.  `description`
/// stands for the pattern in diagnostic messages.
pub fn any_if<T, F>(description: &str, f: F) -> Pattern
    where T: Value, F: Fn(&T) -> bool + 'static
{
    Pattern::predicate(Satisfies {
        predicate: predicate::function(f),
        description: Some(description.to_owned()),
        _t: PhantomData
    })
}

/// Build the pattern list for [`Mock::when`](crate::Mock::when).
///
/// Each element is converted with `Pattern::from`: plain values become
/// exact-value patterns, [`Nil`] becomes [`nil()`], and pattern constructors
/// like [`any()`] pass through.
#[macro_export]
macro_rules! params {
    ($($p:expr),* $(,)?) => {
        ::std::vec![$($crate::Pattern::from($p)),*]
    };
}
