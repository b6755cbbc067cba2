use thiserror::Error;

use bindfrac_solvers::equation::bisection::ConfigError;

/// Errors returned by the binding solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Inputs were rejected before any computation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The root finder did not produce a converged free ligand concentration.
    #[error("equilibrium did not converge: {0}")]
    Convergence(#[from] ConvergenceError),
}

/// Input validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("concentration of {name} must be non-negative, got {value}")]
    NegativeConcentration { name: String, value: f64 },

    #[error("dissociation constant of {name} must be positive, got {value}")]
    NonPositiveKd { name: String, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: String, value: f64 },

    #[error("logarithmic spacing needs positive bounds, got {value}")]
    NonPositiveLogBound { value: f64 },

    #[error("cannot generate a range of {count} point(s)")]
    TooFewPoints { count: usize },

    #[error("a binding system needs at least one species")]
    NoSpecies,

    #[error("the closed form solves exactly one species, got {count}")]
    NotSingleSpecies { count: usize },

    #[error("molar mass must be positive, got {value}")]
    NonPositiveMolarMass { value: f64 },

    #[error("invalid solver config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Numerical failures of the equilibrium root finder.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvergenceError {
    #[error(
        "no convergence after {iters} iterations (free ligand {free_ligand}, residual {residual})"
    )]
    MaxIters {
        iters: usize,
        free_ligand: f64,
        residual: f64,
    },

    #[error("stopped by observer after {iters} iterations")]
    StoppedEarly { iters: usize },

    #[error("root finder failed: {0}")]
    Solver(String),
}

/// Checks that a concentration is finite and non-negative.
pub(crate) fn check_concentration(name: &str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            name: name.to_owned(),
            value,
        });
    }
    if value < 0.0 {
        return Err(InputError::NegativeConcentration {
            name: name.to_owned(),
            value,
        });
    }
    Ok(value)
}

/// Checks that a dissociation constant is finite and strictly positive.
pub(crate) fn check_kd(name: &str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            name: name.to_owned(),
            value,
        });
    }
    if value <= 0.0 {
        return Err(InputError::NonPositiveKd {
            name: name.to_owned(),
            value,
        });
    }
    Ok(value)
}
