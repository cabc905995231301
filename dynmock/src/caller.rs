// vim: tw=80
//! Caller identity
//!
//! Recovers the name of the mocked method from inside its own body, so a
//! forwarding method doesn't have to spell out its name.  The name comes from
//! the [`type_name`](std::any::type_name) of an item nested in the method,
//! which looks like `my_crate::MockFoo::bar::f` or
//! `<my_crate::MockFoo as my_crate::Foo>::bar::{{closure}}::f`.

use crate::error::Fault;

/// Extract the method name from the path of an item nested inside it.
fn parse(path: &str) -> Option<&str> {
    let mut path = path.strip_suffix("::f")?;
    while let Some(p) = path.strip_suffix("::{{closure}}") {
        path = p;
    }
    let name = path.rsplit("::").next()?;
    if name.is_empty() || name.ends_with('>') {
        None
    } else {
        Some(name)
    }
}

/// Used by [`caller!`](crate::caller).  Panics if the path doesn't name a
/// method.
#[doc(hidden)]
pub fn method_name(path: &'static str) -> &'static str {
    match parse(path) {
        Some(name) => name,
        None => Fault::CallerUnknown(path).raise()
    }
}

/// The name of the enclosing function.
///
/// ```
/// fn greet() -> &'static str {
///     dynmock::caller!()
/// }
/// assert_eq!("greet", greet());
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::caller::method_name(type_name_of(f))
    }};
}

/// Record a call to the enclosing method on a [`Mock`](crate::Mock).
///
/// Equivalent to `mock.called(caller!(), args![...])`: the expectation name
/// is the name of the method that expands this macro.
///
/// ```
/// # use dynmock::*;
/// struct MockGreeter {
///     mock: Mock
/// }
///
/// impl MockGreeter {
///     fn greet(&self, who: &String) -> String {
///         called!(self.mock, who).string(0)
///     }
/// }
///
/// let mut greeter = MockGreeter { mock: Mock::new() };
/// greeter.mock.when("greet", params![any()])
///     .return_value("hi");
/// assert_eq!("hi", greeter.greet(&"alice".to_string()));
/// ```
#[macro_export]
macro_rules! called {
    ($mock:expr $(, $arg:expr)* $(,)?) => {
        $mock.called($crate::caller!(), $crate::args![$($arg),*])
    };
}
