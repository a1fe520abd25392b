//! Bounded-range numeric similarity
//!
//! Converts the distance between two numbers in `[min, max]` into a
//! similarity. The distance is normalized by the span available in the
//! direction of the case (below or above the query), then mapped through a
//! tolerance function:
//!
//! ```text
//! similarity
//!   1 |━━━━━━━┓
//!     |       ┃╲
//!     |       ┃  ╲   curve(u)
//!     |       ┃    ╲
//!   0 |_______┃______╲━━━━━━━━━━━
//!     0     equal   equal+tolerance   1   normalized distance
//! ```
//!
//! Each direction has its own [`FunctionCalculationParameter`], so a query
//! can, for example, accept anything cheaper but penalize anything pricier.

use cbrx_core::{ensure_positive, ensure_unit_interval, Error, Evaluator, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape of the decay inside the tolerance zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// `(1 - u)^(1 / linearity)`
    #[default]
    Polynomial,
    /// `(1 - u)^linearity`
    Root,
    /// Two mirrored polynomial halves meeting at `(0.5, 0.5)`
    Sigmoid,
}

impl Interpolation {
    /// Similarity at normalized position `u` in the tolerance zone.
    ///
    /// Every curve is 1 at `u = 0`, 0 at `u = 1`, and the straight line
    /// `1 - u` when `linearity` is 1.
    pub fn curve(self, u: f64, linearity: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Interpolation::Polynomial => (1.0 - u).powf(1.0 / linearity),
            Interpolation::Root => (1.0 - u).powf(linearity),
            Interpolation::Sigmoid => {
                let exponent = 1.0 / linearity;
                if u < 0.5 {
                    1.0 - 0.5 * (2.0 * u).powf(exponent)
                } else {
                    0.5 * (2.0 * (1.0 - u)).powf(exponent)
                }
            }
        }
    }
}

/// Tolerance function for one direction of a numeric comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FunctionCalculationParameter {
    /// Normalized distance up to which values count as equal
    #[serde(default, alias = "equal")]
    pub equal_zone: f64,

    /// Width of the decay zone that follows the equal zone
    #[serde(default = "default_tolerance_zone", alias = "tolerance")]
    pub tolerance_zone: f64,

    /// Curve steepness; 1.0 is linear
    #[serde(default = "default_linearity")]
    pub linearity: f64,

    #[serde(default)]
    pub interpolation: Interpolation,
}

fn default_tolerance_zone() -> f64 {
    0.5
}

fn default_linearity() -> f64 {
    1.0
}

impl Default for FunctionCalculationParameter {
    fn default() -> Self {
        Self {
            equal_zone: 0.0,
            tolerance_zone: default_tolerance_zone(),
            linearity: default_linearity(),
            interpolation: Interpolation::default(),
        }
    }
}

impl FunctionCalculationParameter {
    pub fn with_equal_zone(mut self, equal_zone: f64) -> Self {
        self.equal_zone = equal_zone;
        self
    }

    pub fn with_tolerance_zone(mut self, tolerance_zone: f64) -> Self {
        self.tolerance_zone = tolerance_zone;
        self
    }

    pub fn with_linearity(mut self, linearity: f64) -> Self {
        self.linearity = linearity;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Zones must lie in [0, 1], linearity must be positive
    pub fn validate(&self) -> Result<()> {
        ensure_unit_interval("equal_zone", self.equal_zone)?;
        ensure_unit_interval("tolerance_zone", self.tolerance_zone)?;
        ensure_positive("linearity", self.linearity)
    }

    /// Similarity for a normalized distance `t` in [0, 1]
    pub fn similarity(&self, t: f64) -> f64 {
        if t <= self.equal_zone {
            1.0
        } else if t <= self.equal_zone + self.tolerance_zone {
            let u = (t - self.equal_zone) / self.tolerance_zone;
            self.interpolation.curve(u, self.linearity)
        } else {
            0.0
        }
    }
}

/// Domain and tolerance configuration of a [`Numeric`] evaluator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NumericEvaluationOptions {
    pub min: f64,
    pub max: f64,

    /// Reference point for `use_origin`; defaults to `min`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<f64>,

    /// Treat `min` and `max` as adjacent (angles, hues, hours of the day)
    #[serde(default)]
    pub cyclic: bool,

    /// Scale distances by the span between the query and `origin` instead of the whole range
    #[serde(default)]
    pub use_origin: bool,

    /// Applied when the case is below the query
    #[serde(default)]
    pub if_less: FunctionCalculationParameter,

    /// Applied when the case equals or exceeds the query
    #[serde(default)]
    pub if_more: FunctionCalculationParameter,
}

impl NumericEvaluationOptions {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            origin: None,
            cyclic: false,
            use_origin: false,
            if_less: FunctionCalculationParameter::default(),
            if_more: FunctionCalculationParameter::default(),
        }
    }

    pub fn with_origin(mut self, origin: f64) -> Self {
        self.origin = Some(origin);
        self.use_origin = true;
        self
    }

    pub fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn with_if_less(mut self, params: FunctionCalculationParameter) -> Self {
        self.if_less = params;
        self
    }

    pub fn with_if_more(mut self, params: FunctionCalculationParameter) -> Self {
        self.if_more = params;
        self
    }

    /// Same tolerance function in both directions
    pub fn with_both(self, params: FunctionCalculationParameter) -> Self {
        self.with_if_less(params).with_if_more(params)
    }

    pub fn origin(&self) -> f64 {
        self.origin.unwrap_or(self.min)
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max < self.min {
            return Err(Error::InvalidRange { min: self.min, max: self.max });
        }
        let origin = self.origin();
        if !origin.is_finite() || origin < self.min || origin > self.max {
            return Err(Error::InvalidParameter {
                name: "origin",
                reason: format!("{} is outside [{}, {}]", origin, self.min, self.max),
            });
        }
        self.if_less.validate()?;
        self.if_more.validate()
    }
}

/// Numeric evaluator over a validated [`NumericEvaluationOptions`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric {
    options: NumericEvaluationOptions,
}

impl Numeric {
    /// Fails on an inverted or non-finite range, an origin outside the range,
    /// or invalid tolerance parameters.
    pub fn new(options: NumericEvaluationOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &NumericEvaluationOptions {
        &self.options
    }

    pub fn similarity(&self, query: f64, case: f64) -> f64 {
        let options = &self.options;
        let range = options.range();
        if range <= 0.0 {
            // single-point domain: nothing can be told apart
            return 1.0;
        }
        if !query.is_finite() || !case.is_finite() {
            return 0.0;
        }

        let is_less = case < query;
        let params = if is_less { &options.if_less } else { &options.if_more };

        let mut distance = (query - case).abs();
        if options.cyclic {
            distance %= range;
            distance = distance.min(range - distance);
        }

        let max_distance = if options.use_origin {
            (query - options.origin()).abs()
        } else {
            range
        };
        if max_distance <= 0.0 {
            return 0.0;
        }

        let t = (distance / max_distance).clamp(0.0, 1.0);
        params.similarity(t)
    }
}

impl Evaluator<f64> for Numeric {
    fn evaluate(&self, query: &f64, case: &f64) -> f64 {
        self.similarity(*query, *case)
    }
}

/// JSON numbers are compared as `f64`; any other JSON type scores 0.0.
impl Evaluator<Value> for Numeric {
    fn evaluate(&self, query: &Value, case: &Value) -> f64 {
        match (query.as_f64(), case.as_f64()) {
            (Some(q), Some(c)) => self.similarity(q, c),
            _ => 0.0,
        }
    }
}
