use bindfrac_core::{EquationProblem, Model};

use crate::equation::EvaluateResult;

use super::Bracket;

/// Emitted by the bisection solver after every evaluation.
pub enum Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// The left endpoint was evaluated.
    Left {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },

    /// The right endpoint was evaluated.
    Right {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },

    /// A midpoint of the current bracket was evaluated.
    Midpoint {
        iter: usize,
        x: f64,
        bracket: &'a Bracket,
        result: &'a EvaluateResult<M, P, 1>,
    },
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// The evaluated `x`.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Event::Left { x, .. } | Event::Right { x, .. } | Event::Midpoint { x, .. } => *x,
        }
    }

    pub fn result(&self) -> &'a EvaluateResult<M, P, 1> {
        match self {
            Event::Left { result, .. }
            | Event::Right { result, .. }
            | Event::Midpoint { result, .. } => result,
        }
    }

    /// The residual, or `None` if the evaluation failed.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.result().as_ref().ok().map(|eval| eval.residuals[0])
    }
}
