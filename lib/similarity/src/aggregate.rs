//! Case aggregators
//!
//! Combine per-property similarities of two whole records into one score.
//! Each [`PropertyMapping`] names a property and the evaluator used for it.
//!
//! A property is skipped when the query has no value for it, so partial
//! queries only compare what they specify. A case without a value for a
//! property the query does specify is scored by the property evaluator's
//! [`Evaluator::evaluate_missing`], which is 0.0 unless the evaluator says
//! otherwise.

use cbrx_core::{shared, Error, Evaluator, Record, Result, SharedEvaluator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pairs a record property with the evaluator (and weight) that scores it
#[derive(Clone)]
pub struct PropertyMapping<V> {
    property: String,
    evaluator: SharedEvaluator<V>,
    weight: f64,
}

impl<V> PropertyMapping<V> {
    /// Mapping with weight 1.0
    pub fn new(property: impl Into<String>, evaluator: impl Evaluator<V> + 'static) -> Self {
        Self {
            property: property.into(),
            evaluator: shared(evaluator),
            weight: 1.0,
        }
    }

    /// Weighted mapping; the weight must be finite and positive
    pub fn weighted(
        property: impl Into<String>,
        evaluator: impl Evaluator<V> + 'static,
        weight: f64,
    ) -> Result<Self> {
        Self::from_shared(property, shared(evaluator), weight)
    }

    pub fn from_shared(
        property: impl Into<String>,
        evaluator: SharedEvaluator<V>,
        weight: f64,
    ) -> Result<Self> {
        let property = property.into();
        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::InvalidWeight { property, weight });
        }
        Ok(Self { property, evaluator, weight })
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn evaluator(&self) -> &SharedEvaluator<V> {
        &self.evaluator
    }
}

impl<V> fmt::Debug for PropertyMapping<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMapping")
            .field("property", &self.property)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

/// How per-property similarities are combined
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Weighted arithmetic mean
    #[default]
    Average,
    Median,
    Min,
    Max,
    /// `sqrt(Σ s²)`; a magnitude, not clamped to [0, 1]
    Euclidean,
}

impl Aggregation {
    /// Combine `(similarity, weight)` pairs. Weights only matter for `Average`.
    pub fn combine(self, scores: &[(f64, f64)]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        match self {
            Aggregation::Average => {
                let divider: f64 = scores.iter().map(|(_, w)| w).sum();
                if divider <= 0.0 {
                    return 0.0;
                }
                scores.iter().map(|(s, w)| s * w).sum::<f64>() / divider
            }
            Aggregation::Median => {
                let mut sorted: Vec<f64> = scores.iter().map(|(s, _)| *s).collect();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
            Aggregation::Min => scores.iter().map(|(s, _)| *s).fold(f64::INFINITY, f64::min),
            Aggregation::Max => scores.iter().map(|(s, _)| *s).fold(f64::NEG_INFINITY, f64::max),
            Aggregation::Euclidean => scores.iter().map(|(s, _)| s * s).sum::<f64>().sqrt(),
        }
    }
}

/// Record-level evaluator built from property mappings
#[derive(Clone)]
pub struct CaseEvaluator<V> {
    aggregation: Aggregation,
    mappings: Vec<PropertyMapping<V>>,
}

impl<V> CaseEvaluator<V> {
    pub fn new(aggregation: Aggregation, mappings: Vec<PropertyMapping<V>>) -> Self {
        Self { aggregation, mappings }
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn mappings(&self) -> &[PropertyMapping<V>] {
        &self.mappings
    }

    /// Aggregated similarity of `case` to `query`
    pub fn score<R>(&self, query: &R, case: &R) -> f64
    where
        R: Record<Value = V> + ?Sized,
    {
        let scores: Vec<(f64, f64)> = self
            .evaluated(query, case)
            .map(|(mapping, similarity)| (similarity, mapping.weight))
            .collect();
        self.aggregation.combine(&scores)
    }

    /// Per-property similarities for the properties the query specifies,
    /// in mapping order
    pub fn explain<R>(&self, query: &R, case: &R) -> Vec<(String, f64)>
    where
        R: Record<Value = V> + ?Sized,
    {
        self.evaluated(query, case)
            .map(|(mapping, similarity)| (mapping.property.clone(), similarity))
            .collect()
    }

    fn evaluated<'a, R>(
        &'a self,
        query: &'a R,
        case: &'a R,
    ) -> impl Iterator<Item = (&'a PropertyMapping<V>, f64)> + 'a
    where
        R: Record<Value = V> + ?Sized,
    {
        self.mappings.iter().filter_map(move |mapping| {
            let query_value = query.property(&mapping.property)?;
            let similarity = match case.property(&mapping.property) {
                Some(case_value) => mapping.evaluator.evaluate(query_value, case_value),
                None => mapping.evaluator.evaluate_missing(query_value),
            };
            Some((mapping, similarity))
        })
    }
}

impl<V> fmt::Debug for CaseEvaluator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseEvaluator")
            .field("aggregation", &self.aggregation)
            .field("mappings", &self.mappings)
            .finish()
    }
}

impl<V, R> Evaluator<R> for CaseEvaluator<V>
where
    R: Record<Value = V> + ?Sized,
{
    fn evaluate(&self, query: &R, case: &R) -> f64 {
        self.score(query, case)
    }
}

/// Weighted average of property similarities
pub fn case_average<V>(mappings: Vec<PropertyMapping<V>>) -> CaseEvaluator<V> {
    CaseEvaluator::new(Aggregation::Average, mappings)
}

/// Median of property similarities
pub fn case_median<V>(mappings: Vec<PropertyMapping<V>>) -> CaseEvaluator<V> {
    CaseEvaluator::new(Aggregation::Median, mappings)
}

/// Smallest property similarity
pub fn case_min<V>(mappings: Vec<PropertyMapping<V>>) -> CaseEvaluator<V> {
    CaseEvaluator::new(Aggregation::Min, mappings)
}

/// Largest property similarity
pub fn case_max<V>(mappings: Vec<PropertyMapping<V>>) -> CaseEvaluator<V> {
    CaseEvaluator::new(Aggregation::Max, mappings)
}

/// Euclidean norm of the property similarity vector
pub fn case_euclidean<V>(mappings: Vec<PropertyMapping<V>>) -> CaseEvaluator<V> {
    CaseEvaluator::new(Aggregation::Euclidean, mappings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elementary::{Equality, TableLookup};
    use crate::numeric::{Numeric, NumericEvaluationOptions};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn color_shape(shape_weight: f64) -> Vec<PropertyMapping<Value>> {
        vec![
            PropertyMapping::weighted("color", Equality, 1.0).unwrap(),
            PropertyMapping::weighted("shape", Equality, shape_weight).unwrap(),
        ]
    }

    #[test]
    fn test_case_average() {
        let evaluator = case_average(color_shape(1.0));
        let query = json!({"color": "red", "shape": "triangle"});

        assert_eq!(evaluator.score(&query, &json!({"color": "red", "shape": "square"})), 0.5);
        assert_eq!(evaluator.score(&query, &json!({"color": "red", "shape": "triangle"})), 1.0);
        assert_eq!(evaluator.score(&json!({"color": "red"}), &json!({"color": "red"})), 1.0);
    }

    #[test]
    fn test_case_average_weights() {
        let evaluator = case_average(color_shape(2.0));
        let score = evaluator.score(
            &json!({"color": "red", "shape": "triangle"}),
            &json!({"color": "red"}),
        );
        assert!((score - 1.0 / 3.0).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_case_average_missing_properties() {
        let evaluator = case_average(color_shape(2.0));
        assert_eq!(evaluator.score(&json!({"color": "red"}), &json!({})), 0.0);
        assert_eq!(evaluator.score(&json!({}), &json!({"color": "red"})), 0.0);
    }

    /// Treats a case without the property as "any value goes"
    struct Unspecified;

    impl Evaluator<Value> for Unspecified {
        fn evaluate(&self, query: &Value, case: &Value) -> f64 {
            if query == case { 1.0 } else { 0.0 }
        }

        fn evaluate_missing(&self, _query: &Value) -> f64 {
            0.5
        }
    }

    #[test]
    fn test_missing_case_value_reaches_evaluator() {
        let evaluator = case_average(vec![
            PropertyMapping::new("color", Equality),
            PropertyMapping::new("shape", Unspecified),
        ]);
        let query = json!({"color": "red", "shape": "triangle"});

        assert_eq!(evaluator.score(&query, &json!({"color": "red"})), 0.75);
        assert_eq!(evaluator.score(&query, &json!({"color": "red", "shape": null})), 0.75);
        assert_eq!(
            evaluator.explain(&query, &json!({"color": "blue"})),
            vec![("color".to_string(), 0.0), ("shape".to_string(), 0.5)]
        );
        assert_eq!(evaluator.score(&query, &json!({"color": "red", "shape": "circle"})), 0.5);
    }

    #[test]
    fn test_empty_skip_set_scores_zero() {
        let query = json!({"pattern": "striped"});
        let case = json!({"color": "red", "shape": "circle"});
        for evaluator in [
            case_median(color_shape(1.0)),
            case_min(color_shape(1.0)),
            case_max(color_shape(1.0)),
            case_euclidean(color_shape(1.0)),
        ] {
            assert_eq!(evaluator.score(&query, &case), 0.0, "{:?}", evaluator.aggregation());
        }
    }

    #[test]
    fn test_median_min_max() {
        let lookup = TableLookup::from_table([(
            "red".to_string(),
            vec![("orange".to_string(), 0.8), ("yellow".to_string(), 0.4)],
        )])
        .unwrap();
        let mappings = vec![
            PropertyMapping::new("color", Equality),
            PropertyMapping::new("shade", lookup),
            PropertyMapping::new("shape", Equality),
        ];
        let query = json!({"color": "red", "shade": "red", "shape": "circle"});
        let case = json!({"color": "blue", "shade": "orange", "shape": "circle"});

        assert_eq!(case_median(mappings.clone()).score(&query, &case), 0.8);
        assert_eq!(case_min(mappings.clone()).score(&query, &case), 0.0);
        assert_eq!(case_max(mappings).score(&query, &case), 1.0);
    }

    #[test]
    fn test_median_of_even_count() {
        assert_eq!(Aggregation::Median.combine(&[(0.2, 1.0), (1.0, 1.0), (0.6, 1.0), (0.0, 1.0)]), 0.4);
    }

    #[test]
    fn test_euclidean_is_not_clamped() {
        let evaluator = case_euclidean(color_shape(1.0));
        let record = json!({"color": "red", "shape": "circle"});
        let score = evaluator.score(&record, &record);
        assert!((score - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_weight_is_rejected() {
        assert!(matches!(
            PropertyMapping::<Value>::weighted("color", Equality, 0.0),
            Err(Error::InvalidWeight { .. })
        ));
        assert!(PropertyMapping::<Value>::weighted("color", Equality, -1.0).is_err());
        assert!(PropertyMapping::<Value>::weighted("color", Equality, f64::NAN).is_err());
    }

    #[test]
    fn test_explain() {
        let size = Numeric::new(NumericEvaluationOptions::new(0.0, 100.0)).unwrap();
        let evaluator = case_average(vec![
            PropertyMapping::new("color", Equality),
            PropertyMapping::new("size", size),
            PropertyMapping::new("shape", Equality),
        ]);
        let query = json!({"color": "red", "size": 50});
        let case = json!({"color": "green", "size": 75, "shape": "circle"});

        let explained = evaluator.explain(&query, &case);
        assert_eq!(explained.len(), 2);
        assert_eq!(explained[0], ("color".to_string(), 0.0));
        assert_eq!(explained[1].0, "size");
        assert!((explained[1].1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_case_evaluator_over_maps() {
        use std::collections::HashMap;

        let evaluator = case_average(vec![PropertyMapping::new("age", |q: &i64, c: &i64| {
            if (q - c).abs() <= 2 { 1.0 } else { 0.0 }
        })]);
        let query: HashMap<String, i64> = [("age".to_string(), 25)].into_iter().collect();
        let case: HashMap<String, i64> = [("age".to_string(), 27)].into_iter().collect();
        assert_eq!(evaluator.evaluate(&query, &case), 1.0);
    }

    #[test]
    fn test_nested_case_evaluator() {
        let inner = case_average(vec![PropertyMapping::new("city", Equality)]);
        let outer = case_average(vec![
            PropertyMapping::new("name", Equality),
            PropertyMapping::new("address", inner),
        ]);
        let query = json!({"name": "Ardbeg", "address": {"city": "Islay"}});
        let case = json!({"name": "Lagavulin", "address": {"city": "Islay"}});
        assert_eq!(outer.score(&query, &case), 0.5);
    }

    proptest! {
        #[test]
        fn average_median_min_max_stay_in_unit_interval(
            scores in proptest::collection::vec((0.0f64..=1.0, 0.1f64..10.0), 0..8),
        ) {
            for aggregation in [Aggregation::Average, Aggregation::Median, Aggregation::Min, Aggregation::Max] {
                let combined = aggregation.combine(&scores);
                prop_assert!((0.0..=1.0 + 1e-12).contains(&combined));
            }
        }

        #[test]
        fn min_never_exceeds_max(scores in proptest::collection::vec((0.0f64..=1.0, 1.0f64..2.0), 1..8)) {
            prop_assert!(Aggregation::Min.combine(&scores) <= Aggregation::Max.combine(&scores));
        }
    }
}
