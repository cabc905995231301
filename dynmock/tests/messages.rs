// vim: tw=80
//! Diagnostic messages for calls that match no expectation
#![deny(warnings)]

use std::panic::{AssertUnwindSafe, catch_unwind};

use dynmock::*;
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq)]
struct Thing {
    v: &'static str
}

fn panic_message<F: FnOnce()>(f: F) -> String {
    let e = catch_unwind(AssertUnwindSafe(f)).unwrap_err();
    e.downcast_ref::<String>().cloned().unwrap()
}

#[test]
fn type_name() {
    let mut mock = Mock::new();
    mock.when("some_func", params![any(), any_of::<String>()]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&1i32, &2i32]);
    });
    assert_eq!(
        "No matching expectation found for some_func(1, 2)\n  \
        expected some_func(any, alloc::string::String)\n    \
        argument 1: expected a alloc::string::String, found a i32",
        msg
    );
}

#[test]
fn nil_pattern() {
    let mut mock = Mock::new();
    mock.when("some_func", params![any(), nil()]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&"x", Some(&1i32)]);
    });
    assert_eq!(
        "No matching expectation found for some_func(\"x\", 1)\n  \
        expected some_func(any, nil)\n    \
        argument 1: expected nil, found 1",
        msg
    );
}

#[test]
fn nil_argument() {
    let mut mock = Mock::new();
    mock.when("some_func", params![5i32]);
    let msg = panic_message(|| {
        mock.called("some_func", args![Nil]);
    });
    assert_eq!(
        "No matching expectation found for some_func(nil)\n  \
        expected some_func(5)\n    \
        argument 0: expected 5, found nil",
        msg
    );
}

#[test]
fn exact_struct() {
    let mut mock = Mock::new();
    mock.when("some_func", params![Thing { v: "foo" }]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&Thing { v: "bar" }]);
    });
    assert_eq!(
        "No matching expectation found for some_func(Thing { v: \"bar\" })\n  \
        expected some_func(Thing { v: \"foo\" })\n    \
        argument 0: Thing { v: \"bar\" } != Thing { v: \"foo\" }",
        msg
    );
}

#[test]
fn exact_wrong_type() {
    let mut mock = Mock::new();
    mock.when("some_func", params![5i32]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&"x"]);
    });
    assert!(msg.ends_with(
        "argument 0: expected a i32, found \"x\" of type &str"), "{msg}");
}

#[test]
fn any_if_description() {
    let mut mock = Mock::new();
    mock.when("check", params![any_if("a positive number", |x: &i32| *x > 0)]);
    let msg = panic_message(|| {
        mock.called("check", args![&-1i32]);
    });
    assert!(msg.starts_with(
        "No matching expectation found for check(-1)\n  \
        expected check(a positive number)\n    \
        argument 0: "), "{msg}");
}

#[test]
fn predicate_description() {
    let mut mock = Mock::new();
    mock.when("check", params![matching::<u32, _>(predicate::gt(3))]);
    let msg = panic_message(|| {
        mock.called("check", args![&1u32]);
    });
    assert!(msg.contains("expected check(var > 3)"), "{msg}");
}

#[test]
fn arity() {
    let mut mock = Mock::new();
    mock.when("some_func", params![any()]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&1u8, &2u8]);
    });
    assert_eq!(
        "No matching expectation found for some_func(1, 2)\n  \
        expected some_func(any)\n    \
        takes 1 arguments, called with 2",
        msg
    );
}

/// Every declaration with the same name is listed, others are not
#[test]
fn candidates() {
    let mut mock = Mock::new();
    mock.when("some_func", params![1u8]);
    mock.when("other_func", params![any()]);
    mock.when("some_func", params![2u8]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&3u8]);
    });
    assert_eq!(
        "No matching expectation found for some_func(3)\n  \
        expected some_func(1)\n    \
        argument 0: 3 != 1\n  \
        expected some_func(2)\n    \
        argument 0: 3 != 2",
        msg
    );
}

#[test]
fn undeclared() {
    let mut mock = Mock::new();
    mock.when("some_func", params![]);
    let msg = panic_message(|| {
        mock.called("other_func", args![&1u8]);
    });
    assert_eq!(
        "No matching expectation found for other_func(1)\n  \
        no expectations declared for other_func",
        msg
    );
}

#[test]
fn writable_argument() {
    let mock = Mock::new();
    let mut s = "abc".to_string();
    let msg = panic_message(|| {
        mock.called("some_func", args![&mut s]);
    });
    assert!(msg.starts_with(
        "No matching expectation found for some_func(&mut \"abc\")"), "{msg}");
}

#[test]
fn writable_type_name() {
    let mut mock = Mock::new();
    mock.when("some_func", params![any_of::<String>()]);
    let mut s = String::new();
    let msg = panic_message(|| {
        mock.called("some_func", args![&mut s]);
    });
    assert!(msg.ends_with("argument 0: expected a alloc::string::String, \
                           found a &mut alloc::string::String"), "{msg}");
}

#[test]
fn nil_by_ref() {
    let mut mock = Mock::new();
    mock.when("some_func", params![nil()]);
    let msg = panic_message(|| {
        mock.called("some_func", args![&Some(3u8)]);
    });
    assert!(msg.ends_with("argument 0: expected nil, found Some(3)"), "{msg}");
}

#[test]
#[should_panic(expected = "Couldn't get the caller information")]
fn empty_name() {
    let mut mock = Mock::new();
    mock.when("", params![]);
    mock.called("", args![]);
}

#[test]
fn pattern_display() {
    assert_eq!("any", any().to_string());
    assert_eq!("nil", nil().to_string());
    assert_eq!("u8", any_of::<u8>().to_string());
    assert_eq!("\"foo\"", eq("foo").to_string());
    assert_eq!("big", any_if("big", |x: &u64| *x > 1000).to_string());
}
