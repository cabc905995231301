// vim: tw=80
//! Selecting an expectation by its argument patterns
#![deny(warnings)]

use std::sync::{Arc, Mutex};

use dynmock::*;

#[derive(Debug)]
struct Wrapper(#[allow(dead_code)] String);

/// Equality supplied by the type itself
#[derive(Debug)]
struct Name(&'static str);

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(other.0)
    }
}

#[test]
fn wildcard_matches_anything() {
    let mut mock = Mock::new();
    mock.when("foo", params![any(), any()])
        .return_value(1u32);
    assert_eq!(1, mock.called("foo", args![&5i32, &"x"]).u32(0));
    assert_eq!(1, mock.called("foo", args![&vec![1u8], Nil]).u32(0));
}

mod exact {
    use super::*;

    #[test]
    fn ok() {
        let mut mock = Mock::new();
        mock.when("foo", params![5i32, "bar".to_string()])
            .return_value(true);
        assert!(mock.called("foo", args![&5i32, &"bar".to_string()]).bool(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn different_value() {
        let mut mock = Mock::new();
        mock.when("foo", params![5i32]);
        mock.called("foo", args![&6i32]);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn different_type() {
        let mut mock = Mock::new();
        mock.when("foo", params![5i64]);
        mock.called("foo", args![&5i32]);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn nil_argument() {
        let mut mock = Mock::new();
        mock.when("foo", params![5i32]);
        mock.called("foo", args![None::<&i32>]);
    }

    #[test]
    fn custom_equality() {
        let mut mock = Mock::new();
        mock.when("greet", params![Name("Alice")])
            .return_value("hi");
        let r = mock.called("greet", args![&Name("ALICE")]);
        assert_eq!("hi", r.string(0));
    }

    #[test]
    fn eq_is_the_same_as_a_plain_value() {
        let mut mock = Mock::new();
        mock.when("foo", params![eq(vec![1u8, 2])])
            .return_value(3usize);
        assert_eq!(3, mock.called("foo", args![&vec![1u8, 2]]).usize(0));
    }
}

mod of_type {
    use super::*;

    #[test]
    fn ok() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of_type("alloc::string::String")])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![&"abc".to_string()]).u8(0));
    }

    #[test]
    fn generic() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of::<Vec<u32>>()])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![&Vec::<u32>::new()]).u8(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn boxed() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of_type("alloc::string::String")]);
        mock.called("foo", args![&Box::new("abc".to_string())]);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn newtype() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of_type("alloc::string::String")]);
        mock.called("foo", args![&Wrapper("abc".to_string())]);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn nil_argument() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of::<String>()]);
        mock.called("foo", args![Nil]);
    }

    /// A writable argument is not a value of its pointee's type
    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn writable() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of_type("alloc::string::String")]);
        let mut s = String::new();
        mock.called("foo", args![&mut s]);
    }

    #[test]
    fn writable_reference_type() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of::<&mut String>()])
            .return_value(1u8);
        mock.when("bar", params![any_of_type("&mut alloc::string::String")])
            .return_value(2u8);
        let mut s = String::new();
        assert_eq!(1, mock.called("foo", args![&mut s]).u8(0));
        assert_eq!(2, mock.called("bar", args![&mut s]).u8(0));
    }
}

mod nil {
    use super::*;

    #[test]
    fn none() {
        let mut mock = Mock::new();
        mock.when("foo", params![nil()])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![None::<&String>]).u8(0));
    }

    #[test]
    fn option_by_ref() {
        let mut mock = Mock::new();
        mock.when("foo", params![nil()])
            .return_value(1u8);
        let opt: Option<String> = None;
        assert_eq!(1, mock.called("foo", args![&opt]).u8(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn some_by_ref() {
        let mut mock = Mock::new();
        mock.when("foo", params![nil()]);
        mock.called("foo", args![&Some("x".to_string())]);
    }

    /// A reference to `None` is still a value of its own type
    #[test]
    fn none_by_ref_is_typed() {
        let mut mock = Mock::new();
        mock.when("foo", params![any_of::<Option<u8>>()])
            .return_value(1u8);
        mock.when("bar", params![None::<u8>])
            .return_value(2u8);
        assert_eq!(1, mock.called("foo", args![&None::<u8>]).u8(0));
        assert_eq!(2, mock.called("bar", args![&None::<u8>]).u8(0));
    }

    /// A writable `Option` is an out-parameter, not a nil argument
    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn writable_none() {
        let mut mock = Mock::new();
        mock.when("foo", params![nil()]);
        let mut opt: Option<u8> = None;
        mock.called("foo", args![&mut opt]);
    }

    #[test]
    fn marker() {
        let mut mock = Mock::new();
        mock.when("foo", params![Nil])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![Nil]).u8(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn some() {
        let mut mock = Mock::new();
        mock.when("foo", params![nil()]);
        let x = 0u32;
        mock.called("foo", args![Some(&x)]);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn zero_value() {
        let mut mock = Mock::new();
        mock.when("foo", params![nil()]);
        mock.called("foo", args![&0u32]);
    }
}

mod predicate_patterns {
    use super::*;

    #[test]
    fn ok() {
        let mut mock = Mock::new();
        mock.when("foo", params![matching::<u32, _>(predicate::gt(3))])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![&4u32]).u8(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn fail() {
        let mut mock = Mock::new();
        mock.when("foo", params![matching::<u32, _>(predicate::gt(3))]);
        mock.called("foo", args![&3u32]);
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn wrong_type() {
        let mut mock = Mock::new();
        mock.when("foo", params![matching::<u32, _>(predicate::gt(3))]);
        mock.called("foo", args![&4i64]);
    }

    #[test]
    fn any_if_ok() {
        let mut mock = Mock::new();
        let short = any_if("a short string", |s: &String| s.len() < 4);
        mock.when("foo", params![short])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![&"abc".to_string()]).u8(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn any_if_fail() {
        let mut mock = Mock::new();
        let short = any_if("a short string", |s: &String| s.len() < 4);
        mock.when("foo", params![short]);
        mock.called("foo", args![&"abcdef".to_string()]);
    }
}

mod same {
    use super::*;

    #[test]
    fn ok() {
        let lock = Arc::new(Mutex::new(()));
        let mut mock = Mock::new();
        mock.when("foo", params![same(&lock)])
            .return_value(1u8);
        assert_eq!(1, mock.called("foo", args![&Arc::clone(&lock)]).u8(0));
    }

    #[test]
    #[should_panic(expected = "No matching expectation found")]
    fn different_allocation() {
        let lock = Arc::new(Mutex::new(()));
        let other = Arc::new(Mutex::new(()));
        let mut mock = Mock::new();
        mock.when("foo", params![same(&lock)]);
        mock.called("foo", args![&other]);
    }
}

/// When several expectations match, the first one declared wins.
mod declaration_order {
    use super::*;

    #[test]
    fn exact_first() {
        let mut mock = Mock::new();
        mock.when("foo", params![5i32])
            .return_value(1u8);
        mock.when("foo", params![any()])
            .return_value(2u8);
        assert_eq!(1, mock.called("foo", args![&5i32]).u8(0));
        assert_eq!(2, mock.called("foo", args![&6i32]).u8(0));
        assert_eq!(1, mock.expectations()[0].count());
        assert_eq!(1, mock.expectations()[1].count());
    }

    #[test]
    fn wildcard_first() {
        let mut mock = Mock::new();
        mock.when("foo", params![any()])
            .return_value(2u8);
        mock.when("foo", params![5i32])
            .return_value(1u8);
        assert_eq!(2, mock.called("foo", args![&5i32]).u8(0));
        assert_eq!(0, mock.expectations()[1].count());
    }
}

#[test]
#[should_panic(expected = "No matching expectation found")]
fn wrong_arity() {
    let mut mock = Mock::new();
    mock.when("foo", params![any()]);
    mock.called("foo", args![&1i32, &2i32]);
}

#[test]
#[should_panic(expected = "No matching expectation found")]
fn wrong_name() {
    let mut mock = Mock::new();
    mock.when("foo", params![any()]);
    mock.called("bar", args![&1i32]);
}

#[test]
#[should_panic(expected = "No matching expectation found for foo()")]
fn no_expectations() {
    let mock = Mock::new();
    mock.called("foo", args![]);
}
