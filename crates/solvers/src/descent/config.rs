use thiserror::Error;

use crate::line_search;

use super::{HessianUpdate, Method};

/// Configuration for a descent solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    method: Method,
    line_search: line_search::Config,
    max_iterations: usize,
    max_evaluations: usize,
    epsilon: f64,
}

/// Errors that can occur when validating a descent solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("epsilon must be finite and positive")]
    Epsilon,

    #[error("L-BFGS needs room for at least one pair")]
    History,

    #[error("orthotest must be finite and positive")]
    Orthotest,

    #[error("the Broyden phi must be finite")]
    Phi,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::for_method(Method::lbfgs()).unwrap()
    }
}

impl Config {
    /// Creates a new config with a validated method and tolerance.
    ///
    /// The line-search config is taken as is. A line search checks its own
    /// coefficients before every search, so an invalid one ends the solve
    /// with [`Status::Failed`](crate::Status::Failed).
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not finite and positive, or if a
    /// method parameter is out of range.
    pub fn new(
        method: Method,
        line_search: line_search::Config,
        max_iterations: usize,
        epsilon: f64,
    ) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::Epsilon);
        }

        match method {
            Method::Lbfgs { history: 0 } => return Err(ConfigError::History),
            Method::ConjugateGradient { orthotest, .. }
                if !orthotest.is_finite() || orthotest <= 0.0 =>
            {
                return Err(ConfigError::Orthotest);
            }
            Method::QuasiNewton {
                update: HessianUpdate::Broyden { phi },
                ..
            } if !phi.is_finite() => return Err(ConfigError::Phi),
            _ => {}
        }

        Ok(Self {
            method,
            line_search,
            max_iterations,
            max_evaluations: usize::MAX,
            epsilon,
        })
    }

    /// Creates a config for `method` with its preferred line search, a
    /// budget of 1000 iterations and `epsilon = 1e-6`.
    ///
    /// # Errors
    ///
    /// Returns an error if a method parameter is out of range.
    pub fn for_method(method: Method) -> Result<Self, ConfigError> {
        Self::new(method, method.line_search(), 1000, 1e-6)
    }

    /// Replaces the line-search config.
    #[must_use]
    pub fn with_line_search(self, line_search: line_search::Config) -> Self {
        Self {
            line_search,
            ..self
        }
    }

    /// Stops the solve once the objective has been evaluated this many times.
    #[must_use]
    pub fn with_max_evaluations(self, max_evaluations: usize) -> Self {
        Self {
            max_evaluations,
            ..self
        }
    }

    /// Returns the direction method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the line-search config.
    #[must_use]
    pub fn line_search(&self) -> &line_search::Config {
        &self.line_search
    }

    /// Returns the maximum number of outer iterations.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the maximum number of objective evaluations.
    #[must_use]
    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    /// Returns the convergence tolerance.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}
