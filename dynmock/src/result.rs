// vim: tw=80
//! Typed access to the results of a matched call

use std::any::type_name;

use crate::{
    error::Fault,
    value::{Nil, Value},
};

enum Values<'e> {
    Declared(&'e [Box<dyn Value>]),
    Computed(Vec<Box<dyn Value>>),
}

/// The results of a matched call, as configured on its
/// [`Expectation`](crate::Expectation).
///
/// Positions that were never set, or that hold [`Nil`], read as the type's
/// zero value.  Reading a position that holds a value of another type is a
/// fatal error.
///
/// ```
/// # use dynmock::*;
/// let mut mock = Mock::new();
/// mock.when("compute", params![5])
///     .return_value(10)
///     .return_nil();
/// let r = mock.called("compute", args![&5]);
/// assert_eq!(10, r.i32(0));
/// assert_eq!(None, r.error::<String>(1));
/// assert_eq!(0, r.i32(2));
/// ```
pub struct ResultView<'e> {
    name: &'e str,
    values: Values<'e>,
}

impl<'e> ResultView<'e> {
    pub(crate) fn declared(name: &'e str, values: &'e [Box<dyn Value>])
        -> Self
    {
        ResultView { name, values: Values::Declared(values) }
    }

    pub(crate) fn computed(name: &'e str, values: Vec<Box<dyn Value>>)
        -> Self
    {
        ResultView { name, values: Values::Computed(values) }
    }

    fn as_slice(&self) -> &[Box<dyn Value>] {
        match &self.values {
            Values::Declared(v) => *v,
            Values::Computed(v) => v.as_slice()
        }
    }

    /// Number of configured results, nil included.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if no results were configured.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Was a result configured at position `i`?  True even if it is [`Nil`].
    pub fn contains(&self, i: usize) -> bool {
        i < self.len()
    }

    /// The result at position `i`, or `None` if it is absent or [`Nil`].
    pub fn get(&self, i: usize) -> Option<&dyn Value> {
        let v = &**self.as_slice().get(i)?;
        if v.downcast_ref::<Nil>().is_ok() {
            None
        } else {
            Some(v)
        }
    }

    /// Downcast the result at position `i`.
    fn typed<T: Value>(&self, i: usize) -> Option<&T> {
        let v = self.get(i)?;
        match v.downcast_ref::<T>() {
            Ok(t) => Some(t),
            Err(_) => self.mismatch::<T>(i, v)
        }
    }

    fn mismatch<T>(&self, index: usize, v: &dyn Value) -> ! {
        Fault::TypeMismatch {
            name: self.name.to_owned(),
            index,
            expected: type_name::<T>(),
            found: v.value_type()
        }.raise()
    }

    /// The result at position `i` as a `T`, or `T::default()` if absent.
    pub fn value<T: Value + Clone + Default>(&self, i: usize) -> T {
        self.typed::<T>(i).cloned().unwrap_or_default()
    }

    /// The result at position `i` as an `Option<T>`.  Accepts a stored `T` or
    /// `Option<T>`.
    pub fn option<T: Value + Clone>(&self, i: usize) -> Option<T> {
        let v = self.get(i)?;
        if let Ok(o) = v.downcast_ref::<Option<T>>() {
            o.clone()
        } else if let Ok(t) = v.downcast_ref::<T>() {
            Some(t.clone())
        } else {
            self.mismatch::<T>(i, v)
        }
    }

    /// The result at position `i` as an error, `None` if it is absent.
    pub fn error<E: Value + Clone>(&self, i: usize) -> Option<E> {
        self.option::<E>(i)
    }

    /// The result at position `i` as a `String`.  Accepts a stored `String`
    /// or `&'static str`.
    pub fn string(&self, i: usize) -> String {
        let Some(v) = self.get(i) else {
            return String::new();
        };
        if let Ok(s) = v.downcast_ref::<String>() {
            s.clone()
        } else if let Ok(s) = v.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else {
            self.mismatch::<String>(i, v)
        }
    }

    /// The result at position `i` as a `bool`, `false` if absent.
    pub fn bool(&self, i: usize) -> bool {
        self.value(i)
    }

    /// The result at position `i` as an `i8`, zero if absent.
    pub fn i8(&self, i: usize) -> i8 {
        self.value(i)
    }

    /// The result at position `i` as an `i16`, zero if absent.
    pub fn i16(&self, i: usize) -> i16 {
        self.value(i)
    }

    /// The result at position `i` as an `i32`, zero if absent.
    pub fn i32(&self, i: usize) -> i32 {
        self.value(i)
    }

    /// The result at position `i` as an `i64`, zero if absent.
    pub fn i64(&self, i: usize) -> i64 {
        self.value(i)
    }

    /// The result at position `i` as a `u8`, zero if absent.
    pub fn u8(&self, i: usize) -> u8 {
        self.value(i)
    }

    /// The result at position `i` as a `u16`, zero if absent.
    pub fn u16(&self, i: usize) -> u16 {
        self.value(i)
    }

    /// The result at position `i` as a `u32`, zero if absent.
    pub fn u32(&self, i: usize) -> u32 {
        self.value(i)
    }

    /// The result at position `i` as a `u64`, zero if absent.
    pub fn u64(&self, i: usize) -> u64 {
        self.value(i)
    }

    /// The result at position `i` as a `usize`, zero if absent.
    pub fn usize(&self, i: usize) -> usize {
        self.value(i)
    }

    /// The result at position `i` as an `f32`, zero if absent.
    pub fn f32(&self, i: usize) -> f32 {
        self.value(i)
    }

    /// The result at position `i` as an `f64`, zero if absent.
    pub fn f64(&self, i: usize) -> f64 {
        self.value(i)
    }
}

impl<'e> std::fmt::Debug for ResultView<'e> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("ResultView")
            .field(&self.as_slice())
            .finish()
    }
}
