//! Pipeline input wrapper
//!
//! [`StreamInput`] threads a value together with its acceptance state through
//! the stage pipeline, so that `false`-ish or otherwise special payloads never
//! need to be special-cased by the stages themselves.

use std::fmt;
use std::sync::Arc;

/// Acceptance state carried alongside a pipeline value.
///
/// Either a literal flag, or a predicate evaluated lazily against the value.
/// Callers are expected to consult [`StreamInput::accepts`] at most once per
/// stage so a deferred predicate is not re-invoked with duplicate side
/// effects.
pub enum Acceptance<T> {
    Flag(bool),
    Check(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> Clone for Acceptance<T> {
    fn clone(&self) -> Self {
        match self {
            Acceptance::Flag(flag) => Acceptance::Flag(*flag),
            Acceptance::Check(predicate) => Acceptance::Check(Arc::clone(predicate)),
        }
    }
}

impl<T> fmt::Debug for Acceptance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acceptance::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            Acceptance::Check(_) => f.debug_tuple("Check").field(&"<predicate>").finish(),
        }
    }
}

/// A value travelling through the stage pipeline together with its
/// acceptance state.
#[derive(Debug)]
pub struct StreamInput<T> {
    value: T,
    acceptance: Acceptance<T>,
}

impl<T> StreamInput<T> {
    /// Wrap a freshly pulled source value; accepted by default.
    pub fn wrap(value: T) -> Self {
        Self {
            value,
            acceptance: Acceptance::Flag(true),
        }
    }

    /// Wrap a value with an already-decided acceptance flag.
    pub fn wrap_with(value: T, accepted: bool) -> Self {
        Self {
            value,
            acceptance: Acceptance::Flag(accepted),
        }
    }

    /// Wrap a value with a deferred acceptance predicate.
    pub fn wrap_when(value: T, predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>) -> Self {
        Self {
            value,
            acceptance: Acceptance::Check(predicate),
        }
    }

    /// Whether the value has survived the pipeline so far.
    pub fn accepts(&self) -> bool {
        match &self.acceptance {
            Acceptance::Flag(flag) => *flag,
            Acceptance::Check(predicate) => predicate(&self.value),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
