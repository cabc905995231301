// vim: tw=80
//! Diagnostic rendering of calls and declarations

use std::fmt::Write;

use crate::{
    expectation::Expectation,
    value::Arg,
};

/// Render an actual call, like `greet("bob", &mut 0)`.
pub(crate) fn call(name: &str, args: &[Arg]) -> String {
    let args = args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name}({args})")
}

/// Render a declaration by its patterns, like `greet(any, "bob")`.
pub(crate) fn declaration(e: &Expectation) -> String {
    let patterns = e.patterns().iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({patterns})", e.name())
}

/// List the expectations declared under `name` and why each one rejected
/// `args`.  Each entry starts on a new line.
pub(crate) fn candidates(expectations: &[Expectation], name: &str,
                         args: &[Arg]) -> String
{
    let mut out = String::new();
    let mut declared = false;
    for e in expectations.iter().filter(|e| e.name() == name) {
        declared = true;
        let _ = write!(out, "\n  expected {}", declaration(e));
        let patterns = e.patterns();
        if patterns.len() != args.len() {
            let _ = write!(out, "\n    takes {} arguments, called with {}",
                           patterns.len(), args.len());
            continue;
        }
        if let Some((i, (p, a))) = patterns.iter()
            .zip(args)
            .enumerate()
            .find(|(_, (p, a))| !p.matches(a))
        {
            let _ = write!(out, "\n    argument {i}: {}", p.explain(a));
        }
    }
    if !declared {
        let _ = write!(out, "\n  no expectations declared for {name}");
    }
    out
}
