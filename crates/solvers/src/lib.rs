//! Numerical solvers for bindfrac equation problems.
//!
//! Solvers are generic over a [`Model`] and a problem trait from
//! `bindfrac-core`, and report progress to an [`Observer`].
//!
//! [`Model`]: bindfrac_core::Model
//! [`Observer`]: bindfrac_core::Observer

pub mod equation;
