// vim: tw=80
//! A runtime mock object engine for Rust.
//!
//! Dynmock lets a test declare the calls it expects a collaborator to
//! receive, what those calls should return, and how many times they should
//! happen.  The test double is an ordinary struct holding a [`Mock`], with one
//! hand-written forwarding method per mocked operation.  Nothing is
//! generated: argument and return values are type-erased [`Value`]s, matched
//! at runtime.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Return values`](#return-values)
//! * [`Writable arguments`](#writable-arguments)
//! * [`Panics`](#panics)
//! * [`Call counts`](#call-counts)
//! * [`Checkpoints`](#checkpoints)
//! * [`Threads`](#threads)
//! * [`Crate features`](#crate-features)
//!
//! ## Getting Started
//! ```
//! use dynmock::*;
//!
//! trait Greeter {
//!     fn greet(&self, who: &String) -> String;
//! }
//!
//! #[derive(Default)]
//! struct MockGreeter {
//!     mock: Mock
//! }
//!
//! impl Greeter for MockGreeter {
//!     fn greet(&self, who: &String) -> String {
//!         called!(self.mock, who).string(0)
//!     }
//! }
//!
//! fn welcome(g: &dyn Greeter) -> String {
//!     g.greet(&"alice".to_string())
//! }
//!
//! let mut greeter = MockGreeter::default();
//! greeter.mock.when("greet", params![any()])
//!     .return_value("hi")
//!     .times(1);
//! assert_eq!("hi", welcome(&greeter));
//! assert!(greeter.mock.verify().is_ok());
//! ```
//!
//! [`called!`] takes the expectation name from the method it is expanded in.
//! When that isn't convenient, call [`Mock::called`] with an explicit name.
//!
//! ## Matching arguments
//!
//! [`Mock::when`] takes one [`Pattern`] per argument.  [`params!`] converts
//! plain values into exact-value patterns, and passes pattern constructors
//! through:
//!
//! * a value, or [`eq`]: equal according to `PartialEq`.
//! * [`any`]: anything, nil included.
//! * [`any_of_type`] / [`any_of`]: any value of one exact type.  A `&mut T`
//!   argument has the type `&mut T`, not `T`.
//! * [`nil`], or [`Nil`]: only a nil argument, or a `&None`.
//! * [`same`]: the same `Arc` allocation, for values without equality.
//! * [`matching`]: any [`Predicate`] from the [`predicate`] module.
//! * [`any_if`]: a closure, with a description for diagnostics.
//!
//! On every call, expectations are evaluated in declaration order and the
//! first one whose name, arity and patterns all match is used.  So the more
//! specific expectations should be declared first.
//!
//! ```
//! # use dynmock::*;
//! let mut mock = Mock::new();
//! mock.when("open", params!["secret.txt".to_string()])
//!     .return_value(Some(5u32));
//! mock.when("open", params![any()])
//!     .return_value(None::<u32>);
//!
//! let open = |path: &str| mock.called("open", args![&path.to_string()])
//!     .option::<u32>(0);
//! assert_eq!(Some(5), open("secret.txt"));
//! assert_eq!(None, open("public.txt"));
//! ```
//!
//! A call that matches no expectation panics.  The message lists every
//! expectation declared under the same name, and why it didn't match:
//!
//! ```should_panic
//! # use dynmock::*;
//! let mut mock = Mock::new();
//! mock.when("open", params![any_of::<u32>()]);
//! mock.called("open", args![&"x"]);
//! ```
//!
//! ## Return values
//!
//! Return values are positional.  Each [`return_value`] appends one, and the
//! forwarding method reads them back by index from the [`ResultView`].
//! Missing positions read as zero values, so an error result can simply be
//! left unset.
//!
//! ```
//! # use dynmock::*;
//! #[derive(Clone, Debug, PartialEq)]
//! struct Error(&'static str);
//!
//! struct MockStore {
//!     mock: Mock
//! }
//!
//! impl MockStore {
//!     fn load(&self, key: &u32) -> Result<String, Error> {
//!         let r = called!(self.mock, key);
//!         match r.error::<Error>(1) {
//!             Some(e) => Err(e),
//!             None => Ok(r.string(0))
//!         }
//!     }
//! }
//!
//! let mut store = MockStore { mock: Mock::new() };
//! store.mock.when("load", params![1u32])
//!     .return_value("one".to_string());
//! store.mock.when("load", params![2u32])
//!     .return_nil()
//!     .return_value(Error("missing"));
//! assert_eq!(Ok("one".to_string()), store.load(&1));
//! assert_eq!(Err(Error("missing")), store.load(&2));
//! ```
//!
//! Results can also be computed from the arguments with [`returning`].
//!
//! ## Writable arguments
//!
//! An argument passed as `&mut` is writable, and an expectation can store a
//! value through it with [`mutate_arg`].
//!
//! ```
//! # use dynmock::*;
//! let mut mock = Mock::new();
//! mock.when("read", params![any()])
//!     .mutate_arg(0, "hello".to_string());
//!
//! let mut buf = String::new();
//! mock.called("read", args![&mut buf]);
//! assert_eq!("hello", buf);
//! ```
//!
//! ## Panics
//!
//! [`panics`] simulates a failure inside the collaborator.  The payload is
//! raised unchanged.
//!
//! ```should_panic
//! # use dynmock::*;
//! let mut mock = Mock::new();
//! mock.when("send", params![any()])
//!     .panics("connection reset");
//! mock.called("send", args![&42]);
//! ```
//!
//! ## Call counts
//!
//! By default an expectation may be matched any number of times.  A count
//! constraint set with [`times`], [`once`], [`never`], [`at_least`],
//! [`at_most`] or [`between`] is checked by [`Mock::verify`], which returns
//! the first violation instead of panicking.
//!
//! ```
//! # use dynmock::*;
//! let mut mock = Mock::new();
//! mock.when("greet", params![any()])
//!     .return_value("hi")
//!     .times(2);
//!
//! mock.called("greet", args![&"alice"]);
//! let e = mock.verify().unwrap_err();
//! assert_eq!("Function greet executed 1 times, expected: 2", e.to_string());
//!
//! mock.called("greet", args![&"alice"]);
//! assert!(mock.verify().is_ok());
//! ```
//!
//! ## Checkpoints
//!
//! [`Mock::checkpoint`] verifies all expectations and then clears them, so
//! the test can declare new ones.
//!
//! ## Threads
//!
//! A [`Mock`] is meant to be driven by a single test on a single thread.  It
//! is neither `Send` nor `Sync`.
//!
//! ## Crate features
//!
//! * `tracing` (default): emit [`tracing`](https://docs.rs/tracing) events
//!   when expectations are declared, matched and verified.
//!
//! [`Predicate`]: trait.Predicate.html
//! [`at_least`]: struct.Expectation.html#method.at_least
//! [`at_most`]: struct.Expectation.html#method.at_most
//! [`between`]: struct.Expectation.html#method.between
//! [`mutate_arg`]: struct.Expectation.html#method.mutate_arg
//! [`never`]: struct.Expectation.html#method.never
//! [`once`]: struct.Expectation.html#method.once
//! [`panics`]: struct.Expectation.html#method.panics
//! [`return_value`]: struct.Expectation.html#method.return_value
//! [`returning`]: struct.Expectation.html#method.returning
//! [`times`]: struct.Expectation.html#method.times

use cfg_if::cfg_if;
use std::fmt;

cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! debug {
            ($($arg:tt)*) => { ::tracing::debug!($($arg)*) }
        }
        macro_rules! trace {
            ($($arg:tt)*) => { ::tracing::trace!($($arg)*) }
        }
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {}
        }
        macro_rules! trace {
            ($($arg:tt)*) => {}
        }
    }
}

#[doc(hidden)]
pub mod caller;
mod error;
mod expectation;
mod pattern;
mod render;
mod result;
mod times;
mod value;

pub use error::VerificationFailure;
pub use expectation::Expectation;
pub use pattern::{
    Matcher,
    Pattern,
    any,
    any_if,
    any_of,
    any_of_type,
    eq,
    matching,
    nil,
    same
};
pub use predicates::prelude::{Predicate, predicate};
pub use result::ResultView;
pub use times::Times;
pub use value::{Arg, Nil, Value};

use error::Fault;

/// The state of one test double: its declared expectations, in declaration
/// order.
///
/// Embed a `Mock` in the struct that stands in for the real collaborator, and
/// forward each mocked method to it with [`called!`].
#[derive(Default)]
pub struct Mock {
    expectations: Vec<Expectation>,
}

impl Mock {
    /// Create a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an expectation for the method `name`.
    ///
    /// `patterns` holds one [`Pattern`] per argument; build it with
    /// [`params!`].  Returns the new [`Expectation`] for further
    /// configuration.
    pub fn when<P>(&mut self, name: &str, patterns: P) -> &mut Expectation
        where P: IntoIterator<Item = Pattern>
    {
        let e = Expectation::new(name, patterns.into_iter().collect());
        debug!(method = name, declaration = %render::declaration(&e),
               "declared expectation");
        self.expectations.push(e);
        let l = self.expectations.len();
        &mut self.expectations[l - 1]
    }

    /// Simulate calling the real method `name` with `args`.
    ///
    /// Every expectation is checked in declaration order and the first one
    /// with a matching name and arguments is used: its call count goes up,
    /// its configured panic is raised, or its argument mutations are applied
    /// and its results returned.
    ///
    /// # Panics
    ///
    /// If `name` is empty, if no expectation matches, or if a matching
    /// expectation can't apply its effects.
    pub fn called<'m>(&'m self, name: &str, mut args: Vec<Arg<'_>>)
        -> ResultView<'m>
    {
        if name.is_empty() {
            Fault::CallerUnknown("").raise()
        }
        let Some(e) = self.expectations.iter().find(|e| e.matches(name, &args))
        else {
            Fault::UnmatchedCall {
                call: render::call(name, &args),
                candidates: render::candidates(&self.expectations, name, &args)
            }.raise()
        };
        trace!(method = name, call = %render::call(name, &args),
               count = e.count() + 1, "matched expectation");
        e.call(&mut args)
    }

    /// Check every expectation's call-count constraint, in declaration
    /// order, and return the first violation.
    pub fn verify(&self) -> Result<(), VerificationFailure> {
        for e in self.expectations.iter() {
            if let Err(failure) = e.verify() {
                debug!(%failure, "verification failed");
                return Err(failure);
            }
        }
        Ok(())
    }

    /// Verify all current expectations and clear them.
    ///
    /// The expectations are cleared even if verification fails.
    pub fn checkpoint(&mut self) -> Result<(), VerificationFailure> {
        let r = self.verify();
        self.expectations.clear();
        r
    }

    /// The declared expectations, in declaration order.
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mock")
            .field("expectations", &self.expectations)
            .finish()
    }
}
