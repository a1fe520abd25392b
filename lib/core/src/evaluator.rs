//! The evaluator contract
//!
//! An evaluator maps a `(query, case)` pair to a similarity score. Scores are
//! in `[0.0, 1.0]` for every evaluator in this workspace except the Euclidean
//! case aggregator, which reports a vector magnitude.
//!
//! Evaluators hold configuration only (lookup tables, numeric options, nested
//! evaluators) and are never mutated by a call, so one instance can score any
//! number of pairs from any number of threads.

use std::sync::Arc;

/// A similarity function between a query value and a case value.
///
/// Evaluation is not required to be symmetric: `evaluate(a, b)` and
/// `evaluate(b, a)` may differ.
pub trait Evaluator<T: ?Sized>: Send + Sync {
    fn evaluate(&self, query: &T, case: &T) -> f64;

    /// Similarity of a query value to a case that has no value at all.
    ///
    /// Record aggregators call this instead of [`Evaluator::evaluate`] when
    /// the case lacks the property. Defaults to 0.0.
    fn evaluate_missing(&self, _query: &T) -> f64 {
        0.0
    }
}

impl<T: ?Sized, F> Evaluator<T> for F
where
    F: Fn(&T, &T) -> f64 + Send + Sync,
{
    fn evaluate(&self, query: &T, case: &T) -> f64 {
        self(query, case)
    }
}

/// A type-erased evaluator that can be shared between composites.
pub type SharedEvaluator<T> = Arc<dyn Evaluator<T>>;

/// Wrap an evaluator so it can be stored next to evaluators of other types.
pub fn shared<T, E>(evaluator: E) -> SharedEvaluator<T>
where
    T: ?Sized,
    E: Evaluator<T> + 'static,
{
    Arc::new(evaluator)
}
