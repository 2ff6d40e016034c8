//! Match criteria for bounding and lookup operations
//!
//! Stream operations that accept "a predicate or a literal to compare
//! against" resolve the two forms into a [`Condition`] at the call site, so
//! the implementations only ever deal with one shape.

use std::fmt;

/// A criterion matched against stream values.
pub enum Condition<T> {
    /// An arbitrary predicate over the value.
    Predicate(Box<dyn FnMut(&T) -> bool + Send>),
    /// Strict equality with a literal; `repr` is kept for diagnostics.
    Equals {
        matcher: Box<dyn Fn(&T) -> bool + Send>,
        repr: String,
    },
}

impl<T> Condition<T> {
    /// Criterion satisfied when the predicate returns true.
    pub fn when<F>(predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        Condition::Predicate(Box::new(predicate))
    }

    /// Criterion satisfied by values equal to `value`.
    pub fn equals(value: T) -> Self
    where
        T: PartialEq + fmt::Debug + Send + 'static,
    {
        let repr = format!("{value:?}");
        Condition::Equals {
            matcher: Box::new(move |candidate| candidate == &value),
            repr,
        }
    }

    /// Tests a stream value against the criterion.
    pub fn test(&mut self, candidate: &T) -> bool {
        match self {
            Condition::Predicate(predicate) => predicate(candidate),
            Condition::Equals { matcher, .. } => matcher(candidate),
        }
    }

    /// Human-readable form of the criterion, used in not-found errors.
    pub fn describe(&self) -> String {
        match self {
            Condition::Predicate(_) => String::from("the given predicate"),
            Condition::Equals { repr, .. } => repr.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_condition() {
        let mut condition = Condition::when(|value: &i32| *value > 3);
        assert!(condition.test(&4));
        assert!(!condition.test(&3));
        assert_eq!(condition.describe(), "the given predicate");
    }

    #[test]
    fn test_equals_condition() {
        let mut condition = Condition::equals("chunk");
        assert!(condition.test(&"chunk"));
        assert!(!condition.test(&"stream"));
        assert_eq!(condition.describe(), "\"chunk\"");
    }
}
