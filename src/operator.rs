//! Pipeline stages
//!
//! An [`Operator`] is the transforming half of a pipeline stage; [`Stage`]
//! is the sum of the two stage kinds a stream can register. Stages are
//! appended in registration order and applied left to right, once per source
//! element, by the terminal operations.

use std::sync::Arc;

use crate::input::StreamInput;

/// A single transformation applied to accepted pipeline values.
///
/// An operator without a callback is the identity stage. A rejected input
/// passes through untouched, which is what keeps later stages from ever
/// transforming a filtered-out value.
pub struct Operator<T> {
    callback: Option<Box<dyn FnMut(T) -> T + Send>>,
}

impl<T> Operator<T> {
    /// Creates an operator from a transformation callback.
    pub fn create<F>(callback: F) -> Self
    where
        F: FnMut(T) -> T + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Creates the identity operator.
    pub fn identity() -> Self {
        Self { callback: None }
    }

    /// Applies the operator to a pipeline input.
    pub fn apply(&mut self, input: StreamInput<T>) -> StreamInput<T> {
        if !input.accepts() {
            return input;
        }
        match self.callback.as_mut() {
            None => input,
            Some(callback) => StreamInput::wrap(callback(input.into_value())),
        }
    }
}

/// One registered stage of a stream pipeline.
pub enum Stage<T> {
    /// Transforms the value, acceptance permitting.
    Map(Operator<T>),
    /// Re-evaluates acceptance against the unchanged value.
    Filter(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> Stage<T> {
    pub fn map<F>(callback: F) -> Self
    where
        F: FnMut(T) -> T + Send + 'static,
    {
        Stage::Map(Operator::create(callback))
    }

    pub fn filter<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Stage::Filter(Arc::new(predicate))
    }

    fn apply(&mut self, input: StreamInput<T>) -> StreamInput<T> {
        match self {
            Stage::Map(operator) => operator.apply(input),
            Stage::Filter(predicate) => {
                if !input.accepts() {
                    return input;
                }
                StreamInput::wrap_when(input.into_value(), Arc::clone(predicate))
            }
        }
    }
}

/// Runs one pipeline input through every registered stage, in order.
pub(crate) fn run_pipeline<T>(stages: &mut [Stage<T>], input: StreamInput<T>) -> StreamInput<T> {
    stages
        .iter_mut()
        .fold(input, |input, stage| stage.apply(input))
}
