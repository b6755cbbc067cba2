use thiserror::Error;

/// Tolerances and iteration limit for the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
    residual_tol: f64,
}

/// Errors from validating a bisection [`Config`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,

    #[error("residual_tol must be finite and non-negative")]
    Residual,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            x_rel_tol: 1e-12,
            residual_tol: 1e-12,
        }
    }
}

impl Config {
    /// Creates a config, checking every tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite.
    pub fn new(
        max_iters: usize,
        x_abs_tol: f64,
        x_rel_tol: f64,
        residual_tol: f64,
    ) -> Result<Self, ConfigError> {
        if !is_tolerance(x_abs_tol) {
            return Err(ConfigError::XAbs);
        }
        if !is_tolerance(x_rel_tol) {
            return Err(ConfigError::XRel);
        }
        if !is_tolerance(residual_tol) {
            return Err(ConfigError::Residual);
        }

        Ok(Self {
            max_iters,
            x_abs_tol,
            x_rel_tol,
            residual_tol,
        })
    }

    /// Maximum number of midpoint evaluations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }

    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }
}

fn is_tolerance(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
