// vim: tw=80
//! A mock belongs to the single test thread that drives it
#![deny(warnings)]

use dynmock::*;
use static_assertions::{assert_impl_all, assert_not_impl_any};

assert_not_impl_any!(Mock: Send, Sync);
assert_not_impl_any!(Expectation: Send, Sync);
assert_not_impl_any!(ResultView<'static>: Send, Sync);
assert_impl_all!(VerificationFailure: std::error::Error, Clone, Send, Sync);
assert_impl_all!(Times: Copy, Send, Sync);
