//! Core traits shared by the bindfrac solvers and binding models.
//!
//! The abstractions here keep numerical solvers independent of the physics
//! they solve:
//!
//! - [`Model`]: a callable mapping a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from one model call
//! - [`Observer`]: receives solver events and optionally returns an action
//! - [`EquationProblem`]: adapts solver variables to model inputs and turns
//!   model outputs into residuals to be driven to zero

mod equation;
mod model;
mod observer;

pub use equation::EquationProblem;
pub use observer::Observer;
pub use {model::Model, model::Snapshot};
