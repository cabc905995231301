// vim: tw=80
//! Call-count constraints

use std::fmt;

use crate::error::VerificationFailure;

/// How many times an [`Expectation`](crate::Expectation) must be matched.
///
/// Checked only by [`Mock::verify`](crate::Mock::verify).  A call beyond an
/// upper bound still matches; it is reported at verification time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Times {
    /// No constraint.  Never checked.
    #[default]
    Any,
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
    /// Inclusive on both ends.
    Between(usize, usize),
}

impl Times {
    pub fn is_satisfied_by(&self, observed: usize) -> bool {
        match *self {
            Times::Any => true,
            Times::Exactly(n) => observed == n,
            Times::AtLeast(n) => observed >= n,
            Times::AtMost(n) => observed <= n,
            Times::Between(lo, hi) => lo <= observed && observed <= hi
        }
    }

    /// Check `observed` calls of the expectation called `name`.
    pub fn evaluate(&self, name: &str, observed: usize)
        -> Result<(), VerificationFailure>
    {
        if self.is_satisfied_by(observed) {
            return Ok(());
        }
        let name = name.to_owned();
        Err(match *self {
            Times::Exactly(expected) =>
                VerificationFailure::Exactly { name, observed, expected },
            Times::AtLeast(min) =>
                VerificationFailure::AtLeast { name, observed, min },
            Times::AtMost(max) =>
                VerificationFailure::AtMost { name, observed, max },
            Times::Between(min, max) =>
                VerificationFailure::Between { name, observed, min, max },
            Times::Any => unreachable!()
        })
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Times::Any => f.write_str("any number of times"),
            Times::Exactly(n) => write!(f, "exactly {n} times"),
            Times::AtLeast(n) => write!(f, "at least {n} times"),
            Times::AtMost(n) => write!(f, "at most {n} times"),
            Times::Between(lo, hi) => write!(f, "between {lo} and {hi} times")
        }
    }
}
