//! Reasoning requests and responses

use crate::facet::{FacetConfig, FacetResult};
use cbrx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_limit() -> usize {
    10
}

fn default_threshold() -> f64 {
    0.1
}

/// A query together with threshold, page and facet settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReasoningRequest<Q> {
    /// The (possibly partial) record to find similar cases for
    pub query: Q,

    /// Number of ranked hits to skip
    #[serde(default)]
    pub offset: usize,

    /// Page size
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Minimum similarity for a case to count as a hit
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default)]
    pub facets: Vec<FacetConfig>,
}

impl<Q> ReasoningRequest<Q> {
    /// Request with offset 0, limit 10, threshold 0.1 and no facets
    pub fn new(query: Q) -> Self {
        Self {
            query,
            offset: 0,
            limit: default_limit(),
            threshold: default_threshold(),
            facets: Vec::new(),
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_facet(mut self, facet: FacetConfig) -> Self {
        self.facets.push(facet);
        self
    }

    /// The threshold must be a finite number in [0, 1]
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidRequest(format!(
                "threshold {} is not within [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A scored case
#[derive(Debug, Serialize)]
pub struct Hit<'a, C> {
    pub similarity: f64,
    pub case: &'a C,
}

impl<C> Clone for Hit<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Hit<'_, C> {}

impl<C: PartialEq> PartialEq for Hit<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.similarity == other.similarity && self.case == other.case
    }
}

/// One page of ranked hits plus facets over all hits
#[derive(Debug, Serialize)]
pub struct ReasoningResponse<'a, C> {
    /// Hits above the threshold, before pagination
    pub total_number_of_hits: usize,
    pub hits: Vec<Hit<'a, C>>,
    pub facets: Vec<FacetResult>,
}

impl<C> ReasoningResponse<'_, C> {
    /// Facet for `property`, if it was requested and had at least one bucket
    pub fn facet(&self, property: &str) -> Option<&FacetResult> {
        self.facets.iter().find(|f| f.property == property)
    }

    pub fn similarities(&self) -> Vec<f64> {
        self.hits.iter().map(|h| h.similarity).collect()
    }
}

impl<C: fmt::Debug> fmt::Display for ReasoningResponse<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} hit(s)", self.total_number_of_hits)?;
        for hit in &self.hits {
            writeln!(f, "  {:.4}  {:?}", hit.similarity, hit.case)?;
        }
        for facet in &self.facets {
            let buckets: Vec<String> = facet
                .values
                .iter()
                .map(|b| format!("{:?}={}", b.value, b.count))
                .collect();
            writeln!(f, "  facet {}: {}", facet.property, buckets.join(", "))?;
        }
        Ok(())
    }
}
