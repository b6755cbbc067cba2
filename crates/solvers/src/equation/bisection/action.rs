use super::bracket::Sign;

/// Control actions an observer may return to the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Stop and return the best evaluation found so far.
    StopEarly,

    /// Use the given residual sign for the bracket update.
    ///
    /// Intended for recovering from a failed evaluation. An evaluation
    /// overridden this way never becomes the best solution.
    AssumeResidualSign(Sign),
}

impl Action {
    /// Treats the evaluated point as having a positive residual.
    #[must_use]
    pub fn assume_positive() -> Self {
        Self::AssumeResidualSign(Sign::Positive)
    }

    /// Treats the evaluated point as having a negative residual.
    #[must_use]
    pub fn assume_negative() -> Self {
        Self::AssumeResidualSign(Sign::Negative)
    }
}
