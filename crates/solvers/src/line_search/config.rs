use thiserror::Error;

use super::{Initializer, Strategy};

/// Configuration for a line search.
///
/// Fields are public so that a config can be assembled freely, including
/// invalid combinations. A [`LineSearch`](super::LineSearch) checks
/// [`Config::validate`] before every search and fails without evaluating the
/// objective if the config is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sufficient-decrease coefficient, `0 < c1 < 0.5`.
    pub c1: f64,

    /// Curvature coefficient, `c1 < c2 < 1`.
    pub c2: f64,

    /// Maximum number of trial evaluations per search.
    pub max_iterations: usize,

    /// How the first trial step is chosen.
    pub initializer: Initializer,

    /// How trial steps are accepted and refined.
    pub strategy: Strategy,
}

/// Errors that can occur when validating a line-search config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("c1 = {c1} and c2 = {c2} must satisfy 0 < c1 < 0.5 and c1 < c2 < 1")]
    Coefficients { c1: f64, c2: f64 },

    #[error("a line search needs at least one trial")]
    NoTrials,

    #[error("{name} = {value} is out of range, expected {expected}")]
    Parameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Initializer::Quadratic, Strategy::more_thuente(), 1e-4, 0.1).unwrap()
    }
}

impl Config {
    /// Creates a validated config with the default trial budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the coefficients are out of order or a strategy or
    /// initializer parameter is out of range.
    pub fn new(
        initializer: Initializer,
        strategy: Strategy,
        c1: f64,
        c2: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            c1,
            c2,
            max_iterations: 40,
            initializer,
            strategy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every coefficient and parameter.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { c1, c2, .. } = *self;
        if !(0.0 < c1 && c1 < 0.5 && c1 < c2 && c2 < 1.0) {
            return Err(ConfigError::Coefficients { c1, c2 });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::NoTrials);
        }

        self.initializer.validate()?;
        self.strategy.validate()
    }
}

/// Checks that `value` lies in the open interval `(lo, hi)`.
pub(super) fn check_open(
    name: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if lo < value && value < hi {
        Ok(())
    } else {
        Err(ConfigError::Parameter {
            name,
            value,
            expected,
        })
    }
}
