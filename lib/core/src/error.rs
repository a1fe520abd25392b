use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid numeric range: max ({max}) must not be below min ({min})")]
    InvalidRange { min: f64, max: f64 },

    #[error("Property '{property}' has non-positive weight {weight}")]
    InvalidWeight { property: String, weight: f64 },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter { name, reason: reason.into() }
    }
}

/// Fails with [`Error::InvalidParameter`] unless `value` is finite and in `[0, 1]`.
pub fn ensure_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::parameter(name, format!("{} is not within [0, 1]", value)));
    }
    Ok(())
}

/// Fails with [`Error::InvalidParameter`] unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::parameter(name, format!("{} must be a positive number", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval() {
        assert!(ensure_unit_interval("zone", 0.0).is_ok());
        assert!(ensure_unit_interval("zone", 1.0).is_ok());
        assert!(ensure_unit_interval("zone", 1.5).is_err());
        assert!(ensure_unit_interval("zone", f64::NAN).is_err());
    }

    #[test]
    fn test_positive() {
        assert!(ensure_positive("linearity", 0.5).is_ok());
        assert!(matches!(
            ensure_positive("linearity", 0.0),
            Err(Error::InvalidParameter { name: "linearity", .. })
        ));
        assert!(ensure_positive("linearity", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRange { min: 10.0, max: 0.0 };
        assert_eq!(
            err.to_string(),
            "Invalid numeric range: max (0) must not be below min (10)"
        );
    }
}
