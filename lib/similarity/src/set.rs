//! Set-inclusion similarity
//!
//! Compares collections element-wise through an element evaluator.
//! `coverage` scores one element against a bulk of candidates; the inclusion
//! measures average coverage over one side of the comparison.

use cbrx_core::{shared, Evaluator, SharedEvaluator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Mean similarity of `query` against every element of `bulk`.
///
/// Returns 1.0 as soon as any element scores 1.0, and 0.0 for an empty bulk.
pub fn coverage<T, E>(query: &T, bulk: &[T], evaluator: &E) -> f64
where
    E: Evaluator<T> + ?Sized,
{
    if bulk.is_empty() {
        return 0.0;
    }
    let mut similarity_sum = 0.0;
    for element in bulk {
        let similarity = evaluator.evaluate(query, element);
        if similarity == 1.0 {
            return 1.0;
        }
        similarity_sum += similarity;
    }
    similarity_sum / bulk.len() as f64
}

/// How well the query set is covered by the case set.
///
/// Mean of `coverage(e, case, evaluator)` over `e ∈ query`, 0.0 for an empty query set.
pub fn set_query_inclusion<T, E>(evaluator: &E, query: &[T], case: &[T]) -> f64
where
    E: Evaluator<T> + ?Sized,
{
    if query.is_empty() {
        return 0.0;
    }
    let total: f64 = query.iter().map(|e| coverage(e, case, evaluator)).sum();
    total / query.len() as f64
}

/// How well the case set is covered by the query set.
pub fn set_case_inclusion<T, E>(evaluator: &E, query: &[T], case: &[T]) -> f64
where
    E: Evaluator<T> + ?Sized,
{
    set_query_inclusion(evaluator, case, query)
}

/// Symmetric set similarity: the mean of query and case inclusion.
pub fn set_intermediate<T, E>(evaluator: &E, query: &[T], case: &[T]) -> f64
where
    E: Evaluator<T> + ?Sized,
{
    let query_inclusion = set_query_inclusion(evaluator, query, case);
    let case_inclusion = set_case_inclusion(evaluator, query, case);
    (query_inclusion + case_inclusion) / 2.0
}

/// Which inclusion measure a [`SetSimilarity`] computes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SetMode {
    /// [`set_query_inclusion`]
    Query,
    /// [`set_case_inclusion`]
    Case,
    /// [`set_intermediate`]
    #[default]
    Intermediate,
}

/// Set-valued evaluator built on an element evaluator
#[derive(Clone)]
pub struct SetSimilarity<T> {
    mode: SetMode,
    element: SharedEvaluator<T>,
}

impl<T> SetSimilarity<T> {
    pub fn new(mode: SetMode, element: impl Evaluator<T> + 'static) -> Self {
        Self::from_shared(mode, shared(element))
    }

    pub fn from_shared(mode: SetMode, element: SharedEvaluator<T>) -> Self {
        Self { mode, element }
    }

    pub fn query_inclusion(element: impl Evaluator<T> + 'static) -> Self {
        Self::new(SetMode::Query, element)
    }

    pub fn case_inclusion(element: impl Evaluator<T> + 'static) -> Self {
        Self::new(SetMode::Case, element)
    }

    pub fn intermediate(element: impl Evaluator<T> + 'static) -> Self {
        Self::new(SetMode::Intermediate, element)
    }

    pub fn mode(&self) -> SetMode {
        self.mode
    }

    /// Compare two slices according to the configured mode.
    pub fn compare(&self, query: &[T], case: &[T]) -> f64 {
        let element = self.element.as_ref();
        match self.mode {
            SetMode::Query => set_query_inclusion(element, query, case),
            SetMode::Case => set_case_inclusion(element, query, case),
            SetMode::Intermediate => set_intermediate(element, query, case),
        }
    }
}

impl<T> fmt::Debug for SetSimilarity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetSimilarity")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<T> Evaluator<[T]> for SetSimilarity<T> {
    fn evaluate(&self, query: &[T], case: &[T]) -> f64 {
        self.compare(query, case)
    }
}

impl<T> Evaluator<Vec<T>> for SetSimilarity<T> {
    fn evaluate(&self, query: &Vec<T>, case: &Vec<T>) -> f64 {
        self.compare(query, case)
    }
}

/// JSON arrays are compared element-wise; any other value is a one-element set.
impl Evaluator<Value> for SetSimilarity<Value> {
    fn evaluate(&self, query: &Value, case: &Value) -> f64 {
        self.compare(as_set(query), as_set(case))
    }
}

fn as_set(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elementary::{Equality, TableLookup};
    use proptest::prelude::*;
    use serde_json::json;

    fn color_lookup() -> TableLookup<&'static str> {
        TableLookup::from_table([
            ("red", vec![("red", 1.0), ("orange", 0.8), ("yellow", 0.4)]),
            ("orange", vec![("orange", 1.0), ("red", 0.8), ("yellow", 0.8)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_coverage_equality() {
        assert_eq!(coverage(&42, &[21, 42, 84], &Equality), 1.0);
    }

    #[test]
    fn test_coverage_no_equality() {
        assert_eq!(coverage(&43, &[21, 42, 84], &Equality), 0.0);
    }

    #[test]
    fn test_coverage_similarity() {
        let sim = coverage(&"red", &["orange", "green", "purple", "yellow"], &color_lookup());
        assert!((sim - 0.3).abs() < 1e-9, "got {}", sim);
    }

    #[test]
    fn test_coverage_empty_bulk() {
        assert_eq!(coverage(&42, &[], &Equality), 0.0);
    }

    #[test]
    fn test_coverage_short_circuits() {
        // the elements after the exact match would drag the mean down
        assert_eq!(coverage(&"red", &["red", "green", "purple"], &color_lookup()), 1.0);
    }

    #[test]
    fn test_set_query_inclusion() {
        let sim = set_query_inclusion(&color_lookup(), &["red", "orange"], &["yellow", "green", "purple"]);
        assert!((sim - 0.2).abs() < 1e-9, "got {}", sim);
    }

    #[test]
    fn test_set_query_inclusion_equality() {
        assert_eq!(set_query_inclusion(&color_lookup(), &["red"], &["green", "red"]), 1.0);
    }

    #[test]
    fn test_set_query_inclusion_empty_query() {
        let empty: [&str; 0] = [];
        assert_eq!(set_query_inclusion(&color_lookup(), &empty, &["yellow", "green"]), 0.0);
    }

    #[test]
    fn test_set_query_inclusion_empty_case() {
        assert_eq!(set_query_inclusion(&color_lookup(), &["red", "orange"], &[]), 0.0);
    }

    #[test]
    fn test_set_case_inclusion() {
        let lookup = color_lookup();
        let query = ["yellow", "green", "red"];
        let case = ["red", "orange"];
        assert_eq!(
            set_case_inclusion(&lookup, &query, &case),
            set_query_inclusion(&lookup, &case, &query)
        );
    }

    #[test]
    fn test_set_intermediate() {
        let sim = set_intermediate(&color_lookup(), &["yellow", "green", "red"], &["red", "orange"]);
        assert!((sim - 0.55).abs() < 1e-9, "got {}", sim);
    }

    #[test]
    fn test_set_similarity_modes() {
        let query = vec!["yellow", "green", "red"];
        let case = vec!["red", "orange"];

        let by_query = SetSimilarity::query_inclusion(color_lookup());
        let by_case = SetSimilarity::case_inclusion(color_lookup());
        let both = SetSimilarity::intermediate(color_lookup());

        let q = by_query.evaluate(&query, &case);
        let c = by_case.evaluate(&query, &case);
        assert!((q - 1.0 / 3.0).abs() < 1e-9);
        assert!((both.evaluate(&query, &case) - (q + c) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_similarity_json() {
        let tags = SetSimilarity::<Value>::query_inclusion(Equality);
        assert_eq!(tags.evaluate(&json!(["peaty", "smoky"]), &json!(["smoky", "sweet"])), 0.5);
        // scalar values behave like singleton sets
        assert_eq!(tags.evaluate(&json!("smoky"), &json!(["smoky", "sweet"])), 1.0);
        assert_eq!(tags.evaluate(&json!([]), &json!(["smoky"])), 0.0);
    }

    proptest! {
        #[test]
        fn inclusion_is_bounded(
            query in proptest::collection::vec(0u8..8, 0..6),
            case in proptest::collection::vec(0u8..8, 0..6),
        ) {
            let near = |q: &u8, c: &u8| 1.0 / (1.0 + (*q as f64 - *c as f64).abs());
            for sim in [
                set_query_inclusion(&near, &query, &case),
                set_case_inclusion(&near, &query, &case),
                set_intermediate(&near, &query, &case),
            ] {
                prop_assert!((0.0..=1.0).contains(&sim));
            }
        }
    }
}
