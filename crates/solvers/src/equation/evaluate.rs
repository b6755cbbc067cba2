use thiserror::Error;

use bindfrac_core::{EquationProblem, Model, Snapshot};

/// The outcome of evaluating an equation problem at `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur while evaluating an equation problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),
    /// The problem could not build an input or compute residuals.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Result type returned by [`evaluate`].
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Evaluates `model` in the context of `problem` at `x`.
///
/// Maps `x` to a model input, calls the model, then computes residuals from
/// the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, the model call, or residual computation
/// fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// Single-site occupancy `x / (kd + x)`.
    struct Occupancy {
        kd: f64,
    }

    impl Model for Occupancy {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            Ok(x / (self.kd + x))
        }
    }

    /// Targets an occupancy, rejecting negative concentrations.
    struct TargetOccupancy(f64);

    impl EquationProblem<1> for TargetOccupancy {
        type Input = f64;
        type Output = f64;
        type Error = std::fmt::Error;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            if x[0] < 0.0 {
                return Err(std::fmt::Error);
            }
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
            Ok([output - self.0])
        }
    }

    #[test]
    fn evaluation_captures_snapshot() {
        let eval = evaluate(&Occupancy { kd: 1.0 }, &TargetOccupancy(0.25), [1.0])
            .expect("valid input");

        assert_relative_eq!(eval.x[0], 1.0);
        assert_relative_eq!(eval.snapshot.output, 0.5);
        assert_relative_eq!(eval.residuals[0], 0.25);
    }

    #[test]
    fn problem_error_is_reported() {
        let result = evaluate(&Occupancy { kd: 1.0 }, &TargetOccupancy(0.25), [-1.0]);
        assert!(matches!(result, Err(EvalError::Problem(_))));
    }
}
