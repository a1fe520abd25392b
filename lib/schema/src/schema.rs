//! Similarity Schema definitions
//!
//! Declarative description of a case evaluator for JSON records: which
//! properties matter, how each is compared, how much each weighs, and how
//! the per-property scores are aggregated.

use cbrx_core::{shared, SharedEvaluator};
use cbrx_similarity::{
    Aggregation, CaseEvaluator, Equality, Numeric, NumericEvaluationOptions, PropertyMapping,
    SetMode, SetSimilarity, TableLookup, TotalOrder,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Similarity schema version 1
///
/// Describes how to compare two JSON records. Build it into an evaluator
/// with [`SimilaritySchema::build`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilaritySchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// How per-property similarities are combined
    #[serde(default)]
    pub aggregation: Aggregation,

    /// Property configurations, in evaluation order
    pub properties: Vec<PropertyConfig>,
}

fn default_version() -> u32 {
    1
}

impl SimilaritySchema {
    /// Create a new schema with the given properties
    pub fn new(aggregation: Aggregation, properties: Vec<PropertyConfig>) -> Self {
        Self {
            version: 1,
            aggregation,
            properties,
        }
    }

    /// Parse a schema from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a schema file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate the schema
    /// - At least one property
    /// - Unique property names
    /// - Positive, finite weights
    /// - Every evaluator configuration is well-formed
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.properties.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(SchemaError::DuplicateProperty(property.name.clone()));
            }
            if !property.weight.is_finite() || property.weight <= 0.0 {
                return Err(SchemaError::NonPositiveWeight(property.name.clone()));
            }
            property.evaluator.build().map_err(|source| SchemaError::InvalidEvaluator {
                property: property.name.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Build the record-level evaluator described by this schema
    pub fn build(&self) -> Result<CaseEvaluator<Value>, SchemaError> {
        self.validate()?;
        let mappings = self
            .properties
            .iter()
            .map(|property| {
                let evaluator = property.evaluator.build().map_err(|source| {
                    SchemaError::InvalidEvaluator {
                        property: property.name.clone(),
                        source,
                    }
                })?;
                Ok(PropertyMapping::from_shared(
                    property.name.clone(),
                    evaluator,
                    property.weight,
                )?)
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        Ok(CaseEvaluator::new(self.aggregation, mappings))
    }

    /// Get a property config by name
    pub fn property(&self, name: &str) -> Option<&PropertyConfig> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Configuration for a single property in the similarity schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyConfig {
    /// Property name in the JSON records
    pub name: String,

    /// Weight of this property in a weighted average
    #[serde(default = "default_weight")]
    pub weight: f64,

    /// How values of this property are compared
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

fn default_weight() -> f64 {
    1.0
}

impl PropertyConfig {
    pub fn new(name: impl Into<String>, evaluator: EvaluatorConfig) -> Self {
        Self {
            name: name.into(),
            weight: default_weight(),
            evaluator,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Evaluator for one property value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EvaluatorConfig {
    /// Exact match: 1 if equal, 0 otherwise
    #[default]
    Equality,

    /// Directional lookup table `table[query][case]`
    Table {
        table: HashMap<String, HashMap<String, f64>>,
        /// Also apply every entry in the reverse direction unless the
        /// reverse pair is listed explicitly
        #[serde(default)]
        symmetric: bool,
    },

    /// Bounded-range numeric similarity
    Numeric { options: NumericEvaluationOptions },

    /// Ordered categories compared by position
    Ordered {
        sequence: Vec<Value>,
        /// Numeric options over positions; defaults to `[0, len - 1]`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<NumericEvaluationOptions>,
    },

    /// Set inclusion over JSON arrays
    Set {
        #[serde(default)]
        mode: SetMode,
        element: Box<EvaluatorConfig>,
    },
}

impl EvaluatorConfig {
    /// Build the configured evaluator, failing on invalid configuration
    pub fn build(&self) -> cbrx_core::Result<SharedEvaluator<Value>> {
        match self {
            EvaluatorConfig::Equality => Ok(shared(Equality)),
            EvaluatorConfig::Table { table, symmetric } => {
                let mut lookup = TableLookup::new();
                if *symmetric {
                    for (query, row) in table {
                        for (case, similarity) in row {
                            lookup.insert(case.clone(), query.clone(), *similarity)?;
                        }
                    }
                }
                // explicit entries win over mirrored ones
                for (query, row) in table {
                    for (case, similarity) in row {
                        lookup.insert(query.clone(), case.clone(), *similarity)?;
                    }
                }
                Ok(shared(lookup))
            }
            EvaluatorConfig::Numeric { options } => Ok(shared(Numeric::new(*options)?)),
            EvaluatorConfig::Ordered { sequence, options } => {
                if sequence.is_empty() {
                    return Err(cbrx_core::Error::InvalidConfig(
                        "ordered evaluator needs a non-empty sequence".to_string(),
                    ));
                }
                let options = options
                    .unwrap_or_else(|| NumericEvaluationOptions::new(0.0, (sequence.len() - 1) as f64));
                let positions = Numeric::new(options)?;
                Ok(shared(TotalOrder::new(sequence.clone(), positions)))
            }
            EvaluatorConfig::Set { mode, element } => {
                Ok(shared(SetSimilarity::from_shared(*mode, element.build()?)))
            }
        }
    }
}

/// Errors that can occur during schema loading and validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema cannot be empty")]
    EmptySchema,

    #[error("Property '{0}' is configured more than once")]
    DuplicateProperty(String),

    #[error("Property '{0}' must have a positive weight")]
    NonPositiveWeight(String),

    #[error("Invalid evaluator for property '{property}': {source}")]
    InvalidEvaluator {
        property: String,
        #[source]
        source: cbrx_core::Error,
    },

    #[error(transparent)]
    Config(#[from] cbrx_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<SchemaError> for cbrx_core::Error {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Config(inner) => inner,
            other => cbrx_core::Error::InvalidConfig(other.to_string()),
        }
    }
}
