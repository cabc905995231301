// vim: tw=80
//! Type-erased values: call arguments, return values and mutation payloads.

use std::{
    any::type_name,
    borrow::Cow,
    fmt
};

use downcast::{downcast, Any};

/// Any value that can flow through a [`Mock`](crate::Mock).
///
/// Implemented for every `'static` type that implements `Debug`.  The
/// `Debug` output is used in diagnostic messages.
pub trait Value: Any + fmt::Debug + 'static {
    /// The fully qualified name of the concrete type, as reported by
    /// [`std::any::type_name`].
    fn value_type(&self) -> &'static str;

    /// Is this an `Option` holding `None`?
    fn value_is_none(&self) -> bool;
}

impl<T: Any + fmt::Debug> Value for T {
    fn value_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn value_is_none(&self) -> bool {
        // Option's Debug renders None the same way for every T
        type_name::<T>().starts_with("core::option::Option<") &&
            format!("{self:?}") == "None"
    }
}

downcast!(dyn Value);

/// The absence value.
///
/// As an argument it stands for a null pointer; as a return value it reads
/// as "not set".  It deliberately does not implement `PartialEq`: matching a
/// nil argument is done with [`nil`](crate::nil).
#[derive(Clone, Copy, Debug, Default)]
pub struct Nil;

/// One actual argument of a recorded call.
///
/// Usually built with [`args!`](crate::args) from references:
/// `&x` becomes [`Arg::Ref`], `&mut x` becomes [`Arg::Mut`] and an
/// `Option<&T>` that is `None` becomes [`Arg::Nil`].
pub enum Arg<'a> {
    /// Passed by shared reference.  Matched, never written.
    Ref(&'a dyn Value),
    /// A writable out-parameter.  Expectations may splice values into it.
    Mut(&'a mut dyn Value),
    /// A null argument.
    Nil,
}

impl<'a> Arg<'a> {
    /// The argument's value, or `None` for a nil argument.  For a writable
    /// argument this is the current value of the pointee.
    pub fn value(&self) -> Option<&dyn Value> {
        match self {
            Arg::Ref(v) => Some(*v),
            Arg::Mut(v) => Some(&**v),
            Arg::Nil => None,
        }
    }

    /// Downcast the argument to a concrete type.
    pub fn get<T: Value>(&self) -> Option<&T> {
        self.value()?.downcast_ref::<T>().ok()
    }

    /// Is this the absence value: a nil argument, or a shared reference to
    /// an `Option` that is `None`?
    pub fn is_nil(&self) -> bool {
        match self {
            Arg::Ref(v) => (**v).value_is_none(),
            Arg::Mut(_) => false,
            Arg::Nil => true,
        }
    }

    /// Was this argument passed as `&mut`?
    pub fn is_writable(&self) -> bool {
        matches!(self, Arg::Mut(_))
    }

    /// The argument's type name, or `None` for a nil argument.  A writable
    /// argument is named as the reference, like `&mut alloc::string::String`,
    /// so it never passes for a value of its pointee's type.
    pub fn value_type(&self) -> Option<Cow<'static, str>> {
        match self {
            Arg::Ref(v) => Some(Cow::Borrowed((**v).value_type())),
            Arg::Mut(v) => Some(Cow::Owned(format!("&mut {}",
                                                   (**v).value_type()))),
            Arg::Nil => None,
        }
    }

    /// The storage behind a writable argument.
    pub(crate) fn slot(&mut self) -> Option<&mut dyn Value> {
        match self {
            Arg::Mut(v) => Some(&mut **v),
            _ => None,
        }
    }
}

impl<'a, T: Value> From<&'a T> for Arg<'a> {
    fn from(v: &'a T) -> Self {
        Arg::Ref(v)
    }
}

impl<'a, T: Value> From<&'a mut T> for Arg<'a> {
    fn from(v: &'a mut T) -> Self {
        Arg::Mut(v)
    }
}

impl<'a, T: Value> From<Option<&'a T>> for Arg<'a> {
    fn from(v: Option<&'a T>) -> Self {
        match v {
            Some(v) => Arg::Ref(v),
            None => Arg::Nil,
        }
    }
}

impl<'a> From<Nil> for Arg<'a> {
    fn from(_: Nil) -> Self {
        Arg::Nil
    }
}

impl<'a> fmt::Display for Arg<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arg::Ref(v) => write!(f, "{v:?}"),
            Arg::Mut(v) => write!(f, "&mut {v:?}"),
            Arg::Nil => f.write_str("nil"),
        }
    }
}

impl<'a> fmt::Debug for Arg<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Build the argument list for [`Mock::called`](crate::Mock::called).
///
/// Each argument must be a reference to a [`Value`], an `Option` of one, or
/// [`Nil`].
///
/// ```
/// # use dynmock::*;
/// let x = 5u32;
/// let mut out = String::new();
/// let args = args![&x, &mut out, Nil];
/// assert_eq!(3, args.len());
/// assert!(args[1].is_writable());
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),*]
    };
}

/// Box a list of return values for
/// [`Expectation::return_values`](crate::Expectation::return_values) or a
/// [`returning`](crate::Expectation::returning) closure.
#[macro_export]
macro_rules! values {
    ($($v:expr),* $(,)?) => {
        ::std::vec![$(
            ::std::boxed::Box::new($v) as ::std::boxed::Box<dyn $crate::Value>
        ),*]
    };
}
