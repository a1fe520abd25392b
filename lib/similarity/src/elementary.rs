//! Elementary evaluators for scalar values
//!
//! Equality, directional lookup tables and total orders. All of them return a
//! similarity score in range [0.0, 1.0] where 1.0 means identical.

use ahash::AHashMap;
use cbrx_core::{ensure_unit_interval, shared, Evaluator, Result, SharedEvaluator};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// 1.0 if both values are equal, 0.0 otherwise
pub fn equality<T: PartialEq + ?Sized>(query: &T, case: &T) -> f64 {
    if query == case {
        1.0
    } else {
        0.0
    }
}

/// [`equality`] as an evaluator value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equality;

impl<T: PartialEq + ?Sized> Evaluator<T> for Equality {
    fn evaluate(&self, query: &T, case: &T) -> f64 {
        equality(query, case)
    }
}

/// Directional similarity table: `table[query][case]`.
///
/// Pairs that are not in the table score 0.0. That includes a value compared
/// with itself: identity is only similar if the table says so. Symmetric
/// similarities have to be inserted in both directions (see
/// [`TableLookup::insert_symmetric`]).
#[derive(Debug, Clone, PartialEq)]
pub struct TableLookup<K: Eq + Hash> {
    table: AHashMap<K, AHashMap<K, f64>>,
}

impl<K: Eq + Hash> Default for TableLookup<K> {
    fn default() -> Self {
        Self { table: AHashMap::new() }
    }
}

impl<K: Eq + Hash> TableLookup<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from nested `(query, [(case, similarity)])` rows.
    ///
    /// Fails if any similarity is outside [0, 1].
    pub fn from_table<I, J>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, J)>,
        J: IntoIterator<Item = (K, f64)>,
    {
        let mut lookup = Self::new();
        for (query, cases) in rows {
            let row = lookup.table.entry(query).or_default();
            for (case, similarity) in cases {
                ensure_unit_interval("similarity", similarity)?;
                row.insert(case, similarity);
            }
        }
        Ok(lookup)
    }

    /// Set `table[query][case] = similarity`.
    pub fn insert(&mut self, query: K, case: K, similarity: f64) -> Result<()> {
        ensure_unit_interval("similarity", similarity)?;
        self.table.entry(query).or_default().insert(case, similarity);
        Ok(())
    }

    /// Look up `table[query][case]`, 0.0 when either key is missing.
    pub fn lookup<Q>(&self, query: &Q, case: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table
            .get(query)
            .and_then(|row| row.get(case))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.table.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash + Clone> TableLookup<K> {
    /// Set the similarity in both directions.
    pub fn insert_symmetric(&mut self, a: K, b: K, similarity: f64) -> Result<()> {
        self.insert(a.clone(), b.clone(), similarity)?;
        self.insert(b, a, similarity)
    }
}

impl<K: Eq + Hash + Send + Sync> Evaluator<K> for TableLookup<K> {
    fn evaluate(&self, query: &K, case: &K) -> f64 {
        self.lookup(query, case)
    }
}

impl Evaluator<str> for TableLookup<String> {
    fn evaluate(&self, query: &str, case: &str) -> f64 {
        self.lookup(query, case)
    }
}

/// JSON strings are looked up by their content; any other JSON type scores 0.0.
impl Evaluator<Value> for TableLookup<String> {
    fn evaluate(&self, query: &Value, case: &Value) -> f64 {
        match (query.as_str(), case.as_str()) {
            (Some(q), Some(c)) => self.lookup(q, c),
            _ => 0.0,
        }
    }
}

/// Maps values of an ordered categorical domain to their position in
/// `sequence`, then scores the two positions with a numeric evaluator.
///
/// Values missing from the sequence score 0.0.
#[derive(Clone)]
pub struct TotalOrder<T> {
    sequence: Vec<T>,
    inner: SharedEvaluator<f64>,
}

impl<T: PartialEq> TotalOrder<T> {
    pub fn new(sequence: Vec<T>, inner: impl Evaluator<f64> + 'static) -> Self {
        Self::from_shared(sequence, shared(inner))
    }

    pub fn from_shared(sequence: Vec<T>, inner: SharedEvaluator<f64>) -> Self {
        Self { sequence, inner }
    }

    /// Zero-based position of `value` in the sequence (first occurrence)
    pub fn position(&self, value: &T) -> Option<usize> {
        self.sequence.iter().position(|v| v == value)
    }

    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }
}

impl<T: PartialEq + Send + Sync> Evaluator<T> for TotalOrder<T> {
    fn evaluate(&self, query: &T, case: &T) -> f64 {
        total_order(&self.sequence, self.inner.as_ref(), query, case)
    }
}

impl<T: fmt::Debug> fmt::Debug for TotalOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotalOrder")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// Score `query` and `case` by their positions in `sequence`.
pub fn total_order<T, E>(sequence: &[T], inner: &E, query: &T, case: &T) -> f64
where
    T: PartialEq,
    E: Evaluator<f64> + ?Sized,
{
    let query_index = sequence.iter().position(|v| v == query);
    let case_index = sequence.iter().position(|v| v == case);
    match (query_index, case_index) {
        (Some(q), Some(c)) => inner.evaluate(&(q as f64), &(c as f64)),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn color_lookup() -> TableLookup<String> {
        TableLookup::from_table([
            (
                "red".to_string(),
                vec![
                    ("red".to_string(), 1.0),
                    ("orange".to_string(), 0.8),
                    ("yellow".to_string(), 0.4),
                ],
            ),
            (
                "orange".to_string(),
                vec![
                    ("orange".to_string(), 1.0),
                    ("red".to_string(), 0.8),
                    ("yellow".to_string(), 0.8),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_equality() {
        assert_eq!(equality(&42, &42), 1.0);
        assert_eq!(equality(&42, &43), 0.0);
        assert_eq!(equality("red", "red"), 1.0);
        assert_eq!(equality("red", "Red"), 0.0);
        assert_eq!(Equality.evaluate(&json!("circle"), &json!("circle")), 1.0);
        assert_eq!(Equality.evaluate(&json!("circle"), &json!(3)), 0.0);
    }

    #[test]
    fn test_table_lookup() {
        let lookup = color_lookup();
        assert_eq!(lookup.evaluate("red", "orange"), 0.8);
        assert_eq!(lookup.evaluate("orange", "yellow"), 0.8);
        assert_eq!(lookup.evaluate("green", "red"), 0.0);
        assert_eq!(lookup.evaluate("red", "green"), 0.0);
        assert_eq!(lookup.len(), 6);
    }

    #[test]
    fn test_table_lookup_is_directional() {
        let lookup = color_lookup();
        assert_eq!(lookup.evaluate("red", "yellow"), 0.4);
        assert_eq!(lookup.evaluate("yellow", "red"), 0.0);
    }

    #[test]
    fn test_table_lookup_unseen_value_is_not_similar_to_itself() {
        let lookup = color_lookup();
        assert_eq!(lookup.evaluate("green", "green"), 0.0);
        assert_eq!(lookup.evaluate(&json!("green"), &json!("green")), 0.0);
    }

    #[test]
    fn test_table_lookup_json_values() {
        let lookup = color_lookup();
        assert_eq!(lookup.evaluate(&json!("red"), &json!("orange")), 0.8);
        assert_eq!(lookup.evaluate(&json!("red"), &json!(1)), 0.0);
    }

    #[test]
    fn test_table_lookup_symmetric_insert() {
        let mut lookup = TableLookup::new();
        lookup.insert_symmetric("cat", "lion", 0.6).unwrap();
        assert_eq!(lookup.evaluate(&"cat", &"lion"), 0.6);
        assert_eq!(lookup.evaluate(&"lion", &"cat"), 0.6);
    }

    #[test]
    fn test_table_lookup_rejects_out_of_range_similarity() {
        let mut lookup = TableLookup::new();
        assert!(lookup.insert("a", "b", 1.2).is_err());
        assert!(TableLookup::from_table([("a", vec![("b", -0.1)])]).is_err());
    }

    #[test]
    fn test_total_order() {
        let gradient = vec!["straw", "gold", "amber", "peat"];
        let closeness = |q: &f64, c: &f64| 1.0 - (q - c).abs() / 3.0;
        let order = TotalOrder::new(gradient, closeness);

        assert_eq!(order.position(&"amber"), Some(2));
        assert_eq!(order.evaluate(&"gold", &"gold"), 1.0);
        assert!((order.evaluate(&"straw", &"amber") - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(order.evaluate(&"straw", &"peat"), 0.0);
    }

    #[test]
    fn test_total_order_unknown_value() {
        let order = TotalOrder::new(vec![1, 2, 3], |_q: &f64, _c: &f64| 1.0);
        assert_eq!(order.evaluate(&1, &4), 0.0);
        assert_eq!(order.evaluate(&0, &1), 0.0);
    }

    #[test]
    fn test_total_order_passes_indices() {
        let recorded = |q: &f64, c: &f64| q * 10.0 + c;
        assert_eq!(total_order(&['a', 'b', 'c'], &recorded, &'c', &'b'), 21.0);
    }
}
