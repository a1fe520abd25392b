//! Facets over a result set
//!
//! A facet is a value histogram for one property of the matching cases.
//! Cases without a value for the property are not counted, and a facet
//! with no buckets at all is left out of the response.

use ahash::AHashMap;
use cbrx_core::Record;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_facet_limit() -> usize {
    10
}

/// Bucket ordering of a facet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacetOrder {
    /// Most frequent value first; equal counts keep first-seen order
    #[default]
    Count,
    /// Ascending by value
    Value,
}

/// Which property to summarize and how
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetConfig {
    #[serde(alias = "property_name")]
    pub property: String,

    /// Maximum number of buckets reported. A limit of 0 still reports the
    /// facet, with an empty bucket list, whenever some case has a value.
    #[serde(default = "default_facet_limit")]
    pub limit: usize,

    #[serde(default)]
    pub order_by: FacetOrder,
}

impl FacetConfig {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            limit: default_facet_limit(),
            order_by: FacetOrder::default(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_order(mut self, order_by: FacetOrder) -> Self {
        self.order_by = order_by;
        self
    }
}

/// A bucket key. Variants order as booleans, numbers, text, then anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FacetValue {
    Bool(bool),
    Number(OrderedFloat<f64>),
    Text(String),
    /// Compound values (JSON arrays and objects), keyed by their JSON text
    Other(String),
}

/// Property values that can be grouped into facet buckets.
///
/// `None` means the value does not form a bucket, the same as an absent property.
pub trait ToFacetValue {
    fn to_facet_value(&self) -> Option<FacetValue>;
}

impl ToFacetValue for Value {
    fn to_facet_value(&self) -> Option<FacetValue> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(FacetValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(|f| FacetValue::Number(OrderedFloat(f))),
            Value::String(s) => Some(FacetValue::Text(s.clone())),
            other => Some(FacetValue::Other(other.to_string())),
        }
    }
}

impl ToFacetValue for String {
    fn to_facet_value(&self) -> Option<FacetValue> {
        Some(FacetValue::Text(self.clone()))
    }
}

impl ToFacetValue for str {
    fn to_facet_value(&self) -> Option<FacetValue> {
        Some(FacetValue::Text(self.to_string()))
    }
}

impl<T: ToFacetValue + ?Sized> ToFacetValue for &T {
    fn to_facet_value(&self) -> Option<FacetValue> {
        (**self).to_facet_value()
    }
}

impl<T: ToFacetValue> ToFacetValue for Option<T> {
    fn to_facet_value(&self) -> Option<FacetValue> {
        self.as_ref().and_then(ToFacetValue::to_facet_value)
    }
}

impl ToFacetValue for bool {
    fn to_facet_value(&self) -> Option<FacetValue> {
        Some(FacetValue::Bool(*self))
    }
}

macro_rules! numeric_facet_value {
    ($($t:ty),*) => {
        $(
            impl ToFacetValue for $t {
                fn to_facet_value(&self) -> Option<FacetValue> {
                    Some(FacetValue::Number(OrderedFloat(*self as f64)))
                }
            }
        )*
    };
}

numeric_facet_value!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8, usize, isize);

/// One bucket of a facet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetCount {
    pub value: FacetValue,
    pub count: usize,
}

/// Value histogram for one property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetResult {
    pub property: String,
    pub values: Vec<FacetCount>,
}

impl FacetResult {
    /// Count for `value`, if it made it into the (truncated) bucket list
    pub fn count_of(&self, value: &FacetValue) -> Option<usize> {
        self.values.iter().find(|b| &b.value == value).map(|b| b.count)
    }
}

/// Compute one facet. `None` when no case has a value for the property.
pub fn facet<C>(config: &FacetConfig, cases: &[&C]) -> Option<FacetResult>
where
    C: Record + ?Sized,
    C::Value: ToFacetValue,
{
    let mut positions: AHashMap<FacetValue, usize> = AHashMap::new();
    let mut buckets: Vec<FacetCount> = Vec::new();

    for case in cases {
        let Some(value) = case
            .property(&config.property)
            .and_then(ToFacetValue::to_facet_value)
        else {
            continue;
        };
        match positions.get(&value) {
            Some(&i) => buckets[i].count += 1,
            None => {
                positions.insert(value.clone(), buckets.len());
                buckets.push(FacetCount { value, count: 1 });
            }
        }
    }

    if buckets.is_empty() {
        return None;
    }

    // stable sorts, so equal counts stay in first-seen order
    match config.order_by {
        FacetOrder::Count => buckets.sort_by(|a, b| b.count.cmp(&a.count)),
        FacetOrder::Value => buckets.sort_by(|a, b| a.value.cmp(&b.value)),
    }
    buckets.truncate(config.limit);

    Some(FacetResult {
        property: config.property.clone(),
        values: buckets,
    })
}

/// Compute every configured facet, in configuration order, dropping empty ones.
pub fn compute_facets<C>(configs: &[FacetConfig], cases: &[&C]) -> Vec<FacetResult>
where
    C: Record + ?Sized,
    C::Value: ToFacetValue,
{
    configs.iter().filter_map(|config| facet(config, cases)).collect()
}
