// vim: tw=80
//! Failure types

use thiserror::Error;

/// A call-count constraint was violated.
///
/// Returned by [`Mock::verify`](crate::Mock::verify) rather than raised, so
/// the test decides how to report it.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum VerificationFailure {
    #[error("Function {name} executed {observed} times, expected: {expected}")]
    Exactly {
        name: String,
        observed: usize,
        expected: usize
    },
    #[error("Function {name} executed {observed} times, expected at least: {min}")]
    AtLeast {
        name: String,
        observed: usize,
        min: usize
    },
    #[error("Function {name} executed {observed} times, expected at most: {max}")]
    AtMost {
        name: String,
        observed: usize,
        max: usize
    },
    #[error("Function {name} executed {observed} times, expected between: [{min}, {max}]")]
    Between {
        name: String,
        observed: usize,
        min: usize,
        max: usize
    },
}

impl VerificationFailure {
    /// Name of the expectation that failed
    pub fn name(&self) -> &str {
        match self {
            VerificationFailure::Exactly { name, .. } |
            VerificationFailure::AtLeast { name, .. } |
            VerificationFailure::AtMost { name, .. } |
            VerificationFailure::Between { name, .. } => name
        }
    }

    /// How many times the expectation was actually matched
    pub fn observed(&self) -> usize {
        match self {
            VerificationFailure::Exactly { observed, .. } |
            VerificationFailure::AtLeast { observed, .. } |
            VerificationFailure::AtMost { observed, .. } |
            VerificationFailure::Between { observed, .. } => *observed
        }
    }
}

/// Unrecoverable misuse of a mock.  Always raised as a panic with the
/// rendered message, never returned.
#[derive(Debug, Error)]
pub(crate) enum Fault {
    #[error("No matching expectation found for {call}{candidates}")]
    UnmatchedCall {
        call: String,
        candidates: String
    },
    #[error("Result {index} of {name} is a {found}, not a {expected}")]
    TypeMismatch {
        name: String,
        index: usize,
        expected: &'static str,
        found: &'static str
    },
    #[error("Argument {position} of {name} is not a writable reference")]
    NotWritable {
        name: String,
        position: usize
    },
    #[error("Argument {position} of {name}: can't store a {value} into a {slot}")]
    IncompatibleMutation {
        name: String,
        position: usize,
        value: &'static str,
        slot: &'static str
    },
    #[error("Couldn't get the caller information from {0:?}")]
    CallerUnknown(&'static str),
}

impl Fault {
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self)
    }
}
