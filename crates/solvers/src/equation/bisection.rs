//! Bisection root finding for scalar equation problems.
//!
//! # Algorithm
//!
//! Both endpoints of the bracket are evaluated and must have residuals of
//! opposite sign. Each iteration evaluates the midpoint and replaces the
//! endpoint whose residual shares its sign, halving the bracket. The solver
//! returns once the bracket is narrower than
//! `x_abs_tol + x_rel_tol * |midpoint|` or an evaluated residual is within
//! `residual_tol` of zero.
//!
//! The reported root is the evaluation with the smallest residual magnitude,
//! so it always lies inside the original bracket.
//!
//! Bisection needs only continuity and a sign change; it tolerates functions
//! that are not differentiable at an endpoint.
//!
//! # Observer Events
//!
//! The observer receives [`Event::Left`] and [`Event::Right`] for the
//! endpoints, then one [`Event::Midpoint`] per iteration. It may return
//! [`Action::StopEarly`], or [`Action::AssumeResidualSign`] to steer past a
//! failed evaluation.

mod action;
mod best;
mod bracket;
mod config;
mod decision;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use bindfrac_core::{EquationProblem, Model, Observer};

use crate::equation::evaluate;

use best::Best;
use bracket::Bounds;
use decision::Decision;

/// Finds a root of `problem` on `bracket` by bisection.
///
/// See the [module docs](self) for convergence rules and observer events.
///
/// # Errors
///
/// Returns an error if the bracket is non-finite, has zero width, or does not
/// change sign, or if an evaluation fails or yields a non-finite residual and
/// the observer does not recover from it.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let mut best = Best::empty();

    let left_sign = match eval_and_observe(
        model,
        problem,
        Stage::Left(bounds.left()),
        &mut observer,
        &mut best,
    ) {
        Decision::Continue(sign) => sign,
        Decision::StopEarly => return best.finish(Status::StoppedByObserver, 0),
        Decision::Error(error) => return Err(error),
    };
    if best.is_residual_converged(config.residual_tol()) {
        return best.finish(Status::Converged, 0);
    }

    let right_sign = match eval_and_observe(
        model,
        problem,
        Stage::Right(bounds.right()),
        &mut observer,
        &mut best,
    ) {
        Decision::Continue(sign) => sign,
        Decision::StopEarly => return best.finish(Status::StoppedByObserver, 0),
        Decision::Error(error) => return Err(error),
    };
    if best.is_residual_converged(config.residual_tol()) {
        return best.finish(Status::Converged, 0);
    }

    let mut bracket = Bracket::new(bounds, left_sign, right_sign)?;

    for iter in 1..=config.max_iters() {
        let x = bracket.midpoint();
        let sign = match eval_and_observe(
            model,
            problem,
            Stage::Midpoint { iter, x, bracket: &bracket },
            &mut observer,
            &mut best,
        ) {
            Decision::Continue(sign) => sign,
            Decision::StopEarly => return best.finish(Status::StoppedByObserver, iter),
            Decision::Error(error) => return Err(error),
        };

        bracket.shrink(x, sign);

        if best.is_residual_converged(config.residual_tol())
            || bracket.is_x_converged(config.x_abs_tol(), config.x_rel_tol())
        {
            return best.finish(Status::Converged, iter);
        }
    }

    best.finish(Status::MaxIters, config.max_iters())
}

/// Runs [`solve`] with a no-op observer.
///
/// # Errors
///
/// Returns the same errors as [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Where an evaluation happens, which selects the event variant.
#[derive(Clone, Copy)]
enum Stage<'b> {
    Left(f64),
    Right(f64),
    Midpoint {
        iter: usize,
        x: f64,
        bracket: &'b Bracket,
    },
}

/// Evaluates at the stage's `x`, emits the event, and records the result.
///
/// Evaluations whose sign the observer overrides are not recorded as best.
fn eval_and_observe<M, P, Obs>(
    model: &M,
    problem: &P,
    stage: Stage<'_>,
    observer: &mut Obs,
    best: &mut Best<M::Input, M::Output>,
) -> Decision
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let x = match stage {
        Stage::Left(x) | Stage::Right(x) | Stage::Midpoint { x, .. } => x,
    };
    let result = evaluate(model, problem, [x]);

    let event = match stage {
        Stage::Left(x) => Event::Left { x, result: &result },
        Stage::Right(x) => Event::Right { x, result: &result },
        Stage::Midpoint { iter, x, bracket } => Event::Midpoint {
            iter,
            x,
            bracket,
            result: &result,
        },
    };
    let action = observer.observe(&event);

    let residual = match result {
        Ok(eval) => {
            let residual = eval.residuals[0];
            if !residual.is_finite() {
                Err(Error::NonFiniteResidual { x, residual })
            } else {
                if !matches!(action, Some(Action::AssumeResidualSign(_))) {
                    best.update(eval);
                }
                Ok(residual)
            }
        }
        Err(error) => Err(Error::evaluation(x, error)),
    };

    Decision::new(action, residual)
}
