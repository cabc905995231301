// vim: tw=80
//! A single declared expectation and its configured effects

use std::{
    any::Any,
    cell::Cell,
    fmt,
    panic
};

use crate::{
    error::{Fault, VerificationFailure},
    pattern::Pattern,
    result::ResultView,
    times::Times,
    value::{Arg, Nil, Value},
};

type Rfunc = Box<dyn Fn(&[Arg<'_>]) -> Vec<Box<dyn Value>>>;

/// A value to splice into a writable argument.
struct Mutation {
    position: usize,
    value_type: &'static str,
    write: Box<dyn Fn(&mut dyn Value) -> bool>,
}

impl Mutation {
    fn new<T: Value + Clone>(position: usize, value: T) -> Self {
        let write = move |slot: &mut dyn Value| -> bool {
            if let Ok(s) = slot.downcast_mut::<T>() {
                *s = value.clone();
            } else if let Ok(s) = slot.downcast_mut::<Option<T>>() {
                *s = Some(value.clone());
            } else if let Ok(s) = slot.downcast_mut::<Box<T>>() {
                *s = Box::new(value.clone());
            } else if let Ok(s) = slot.downcast_mut::<Option<Box<T>>>() {
                *s = Some(Box::new(value.clone()));
            } else {
                return false;
            }
            true
        };
        Mutation {
            position,
            value_type: std::any::type_name::<T>(),
            write: Box::new(write)
        }
    }
}

/// One declared stub: a method name, argument patterns, the effects of a
/// matching call and an optional call-count constraint.
///
/// Returned by [`Mock::when`](crate::Mock::when).  Every configuration method
/// returns `&mut Self` so calls can be chained.
pub struct Expectation {
    name: String,
    patterns: Vec<Pattern>,
    returns: Vec<Box<dyn Value>>,
    rfunc: Option<Rfunc>,
    mutations: Vec<Mutation>,
    panic: Option<Box<dyn Fn()>>,
    count: Cell<usize>,
    times: Times,
}

impl Expectation {
    pub(crate) fn new(name: &str, patterns: Vec<Pattern>) -> Self {
        Expectation {
            name: name.to_owned(),
            patterns,
            returns: Vec::new(),
            rfunc: None,
            mutations: Vec::new(),
            panic: None,
            count: Cell::new(0),
            times: Times::default()
        }
    }

    /// Does a call to `name` with `args` select this expectation?
    pub(crate) fn matches(&self, name: &str, args: &[Arg]) -> bool {
        self.name == name &&
            self.patterns.len() == args.len() &&
            self.patterns.iter().zip(args).all(|(p, a)| p.matches(a))
    }

    /// Simulate calling the real method for this expectation.  The caller has
    /// already established that the arguments match.
    pub(crate) fn call<'e>(&'e self, args: &mut [Arg<'_>]) -> ResultView<'e> {
        self.count.set(self.count.get() + 1);
        if let Some(raise) = &self.panic {
            raise();
            unreachable!("configured panic returned normally");
        }
        for m in &self.mutations {
            self.mutate(m, args);
        }
        match &self.rfunc {
            Some(f) => ResultView::computed(&self.name, f(&*args)),
            None => ResultView::declared(&self.name, &self.returns)
        }
    }

    fn mutate(&self, m: &Mutation, args: &mut [Arg<'_>]) {
        let position = m.position;
        let Some(slot) = args.get_mut(position).and_then(Arg::slot) else {
            Fault::NotWritable { name: self.name.clone(), position }.raise()
        };
        let found = (*slot).value_type();
        if !(m.write)(slot) {
            Fault::IncompatibleMutation {
                name: self.name.clone(),
                position,
                value: m.value_type,
                slot: found
            }.raise()
        }
    }

    pub(crate) fn verify(&self) -> Result<(), VerificationFailure> {
        self.times.evaluate(&self.name, self.count.get())
    }

    /// The method name this expectation answers to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// How many calls have matched so far.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// The configured call-count constraint.
    pub fn constraint(&self) -> Times {
        self.times
    }

    /// Append a value to the results returned by a matching call.
    ///
    /// Results are positional: the first `return_value` is result `0`.
    pub fn return_value<T: Value>(&mut self, v: T) -> &mut Self {
        self.returns.push(Box::new(v));
        self
    }

    /// Append several values at once.  Build the list with
    /// [`values!`](crate::values).
    pub fn return_values(&mut self, values: Vec<Box<dyn Value>>) -> &mut Self {
        self.returns.extend(values);
        self
    }

    /// Return nil at the next result position.
    pub fn return_nil(&mut self) -> &mut Self {
        self.return_value(Nil)
    }

    /// Supply a closure that computes the results from the call's arguments.
    /// When set, it takes the place of any constant return values.
    ///
    /// ```
    /// # use dynmock::*;
    /// let mut mock = Mock::new();
    /// mock.when("double", params![any()])
    ///     .returning(|args| values![2 * args[0].get::<i32>().unwrap()]);
    /// assert_eq!(10, mock.called("double", args![&5]).i32(0));
    /// ```
    pub fn returning<F>(&mut self, f: F) -> &mut Self
        where F: Fn(&[Arg<'_>]) -> Vec<Box<dyn Value>> + 'static
    {
        self.rfunc = Some(Box::new(f));
        self
    }

    /// Write `v` through the writable argument at `position` whenever this
    /// expectation matches.
    ///
    /// The argument's pointee may be a `T`, or one level of indirection away
    /// from it: `Option<T>`, `Box<T>` or `Option<Box<T>>`.  Any other
    /// argument is a fatal error at call time.
    pub fn mutate_arg<T: Value + Clone>(&mut self, position: usize, v: T)
        -> &mut Self
    {
        self.mutations.push(Mutation::new(position, v));
        self
    }

    /// Panic with `payload` instead of returning.  The call still counts.
    pub fn panics<P>(&mut self, payload: P) -> &mut Self
        where P: Any + Clone + Send + 'static
    {
        self.panic = Some(Box::new(move || panic::panic_any(payload.clone())));
        self
    }

    /// Require this expectation to be matched exactly `n` times.
    pub fn times(&mut self, n: usize) -> &mut Self {
        self.times = Times::Exactly(n);
        self
    }

    /// Shortcut for [`times(1)`](#method.times).
    pub fn once(&mut self) -> &mut Self {
        self.times(1)
    }

    /// Forbid this expectation from ever being matched.
    pub fn never(&mut self) -> &mut Self {
        self.times(0)
    }

    /// Require at least `n` matches.
    pub fn at_least(&mut self, n: usize) -> &mut Self {
        self.times = Times::AtLeast(n);
        self
    }

    /// Allow at most `n` matches.
    pub fn at_most(&mut self, n: usize) -> &mut Self {
        self.times = Times::AtMost(n);
        self
    }

    /// Require between `lo` and `hi` matches, inclusive.
    pub fn between(&mut self, lo: usize, hi: usize) -> &mut Self {
        self.times = Times::Between(lo, hi);
        self
    }

    /// Remove the call-count constraint.
    ///
    /// This is the default, but the method is provided in case a constraint
    /// was set earlier in a chain.
    pub fn times_any(&mut self) -> &mut Self {
        self.times = Times::Any;
        self
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .field("returns", &self.returns)
            .field("count", &self.count.get())
            .field("times", &self.times)
            .finish_non_exhaustive()
    }
}
