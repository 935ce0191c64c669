//! # Success conditions.
//!
//! [`Condition`] decides whether a value returned by the action ends the wait.
//! Every condition is a boxed check over `&T`; the equality-based constructors
//! capture their literal, so only they require `T: PartialEq`.
//!
//! - [`Condition::equals`] the value equals a literal (equality, not truthiness);
//! - [`Condition::one_of`] the value is a member of a set of literals;
//! - [`Condition::unless`] the value differs from a literal ("keep polling while
//!   the action still returns X");
//! - [`Condition::predicate`] an arbitrary check over the value.
//!
//! [`Condition::truthy`] is the default used by [`Poller::new`](crate::Poller::new):
//! any value that is not "empty" per [`Truthy`] satisfies it.
//!
//! # Example
//! ```rust
//! use waitfor::Condition;
//!
//! assert!(Condition::equals(0).is_satisfied(&0));
//! assert!(!Condition::equals(0).is_satisfied(&1));
//! assert!(Condition::unless(0).is_satisfied(&1));
//! assert!(Condition::predicate(|v: &u32| *v > 10).is_satisfied(&11));
//! assert!(!Condition::<Option<u8>>::truthy().is_satisfied(&None));
//! ```

use std::fmt;

/// Boxed predicate over the action's value.
pub type PredicateFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Success criterion evaluated against every value the action returns.
pub struct Condition<T> {
    kind: &'static str,
    check: PredicateFn<T>,
}

impl<T> Condition<T> {
    /// Satisfied when `check` returns `true`.
    pub fn predicate<P>(check: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_check("predicate", Box::new(check))
    }

    /// Satisfied by any non-empty value (see [`Truthy`]).
    pub fn truthy() -> Self
    where
        T: Truthy + 'static,
    {
        Self::from_check("truthy", Box::new(|value: &T| value.is_truthy()))
    }

    /// Short name of the condition (for logs).
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Evaluates the condition against one value.
    pub fn is_satisfied(&self, value: &T) -> bool {
        (self.check)(value)
    }

    fn from_check(kind: &'static str, check: PredicateFn<T>) -> Self {
        Self { kind, check }
    }
}

impl<T> Condition<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    /// Satisfied when the value equals `expected`.
    pub fn equals(expected: T) -> Self {
        Self::from_check("equals", Box::new(move |value: &T| *value == expected))
    }

    /// Satisfied when the value equals any of `candidates`.
    pub fn one_of(candidates: Vec<T>) -> Self {
        Self::from_check("one_of", Box::new(move |value: &T| candidates.contains(value)))
    }

    /// Satisfied when the value differs from `rejected`.
    pub fn unless(rejected: T) -> Self {
        Self::from_check("unless", Box::new(move |value: &T| *value != rejected))
    }
}

impl<T> fmt::Debug for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Values with a notion of "empty" vs "present".
///
/// Zero numbers, `false`, `None`, and empty strings/collections are falsy.
pub trait Truthy {
    /// Returns `true` when the value counts as present.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}
