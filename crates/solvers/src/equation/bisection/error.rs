use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

use super::{bracket::BracketError, config::ConfigError};

type BoxedError = Box<dyn StdError + Send + Sync>;

/// Reasons a bisection run fails without producing a solution.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    /// Every evaluation was overridden or failed, so there is no root estimate.
    #[error("no evaluation succeeded")]
    NoSuccessfulEvaluation,

    #[error("problem rejected x = {x}")]
    Problem {
        x: f64,
        #[source]
        source: BoxedError,
    },

    #[error("model call failed at x = {x}")]
    Model {
        x: f64,
        #[source]
        source: BoxedError,
    },
}

impl Error {
    /// Wraps a failed evaluation at `x`.
    pub(super) fn evaluation<ME, PE>(x: f64, error: EvalError<ME, PE>) -> Self
    where
        ME: StdError + Send + Sync + 'static,
        PE: StdError + Send + Sync + 'static,
    {
        match error {
            EvalError::Model(source) => Self::Model {
                x,
                source: Box::new(source),
            },
            EvalError::Problem(source) => Self::Problem {
                x,
                source: Box::new(source),
            },
        }
    }
}
