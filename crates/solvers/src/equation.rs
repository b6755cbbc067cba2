//! Solvers for equation problems, which drive residuals toward zero.
//!
//! An [`EquationProblem`] maps solver variables `x: [f64; N]` to a model
//! input, calls the model, and computes residuals from the result.
//!
//! # Solvers
//!
//! - [`bisection`]: guaranteed convergence on a sign-changing bracket
//!
//! [`EquationProblem`]: bindfrac_core::EquationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod bisection;
