//! Equilibrium of several proteins competing for one ligand.
//!
//! The free ligand concentration is found by bisection of the mass-balance
//! residual in `ln L`, between a lower bound derived from the binding
//! capacity and `ln L_T` (see [`crate::competitive`]). Bisection tolerates
//! the steep residual that tight binders produce near `L = 0`, and every
//! iterate stays inside `(0, L_T]`. Working in `ln L` keeps the step count
//! bounded when the free ligand is many decades below the total.

use std::error::Error as StdError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use bindfrac_core::Observer;
use bindfrac_solvers::equation::bisection::{self, Action, Status};

use crate::{
    competitive::{CompetitiveBindingModel, KdPolicy, MassBalance},
    error::{ConvergenceError, Error, InputError, check_concentration},
    solution::{EquilibriumSolution, SpeciesBinding},
    species::{BindingSystem, LIGAND, Species},
};

/// Bisection event type seen by [`solve_multi_observed`] observers.
///
/// Event `x` values are natural logs of the free ligand concentration.
pub type EquilibriumEvent<'a> = bisection::Event<'a, CompetitiveBindingModel, MassBalance>;

/// Root finder tolerances.
///
/// The bracket is narrowed to a relative width of the free ligand, and the
/// residual tolerance is scaled by the ligand total, so nanomolar and
/// millimolar systems converge to the same number of significant digits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquilibriumConfig {
    /// Iteration cap; running out is a [`ConvergenceError::MaxIters`].
    pub max_iters: usize,

    /// Bracket width tolerance relative to the free ligand, applied as a
    /// width in `ln L`.
    pub x_rel_tol: f64,

    /// Residual tolerance as a multiple of the ligand total.
    pub residual_scale: f64,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_rel_tol: 1e-13,
            residual_scale: f64::EPSILON,
        }
    }
}

impl EquilibriumConfig {
    /// Bisection settings for a system holding `ligand_total` of ligand.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite.
    pub fn to_bisection(&self, ligand_total: f64) -> Result<bisection::Config, InputError> {
        Ok(bisection::Config::new(
            self.max_iters,
            self.x_rel_tol,
            0.0,
            self.residual_scale * ligand_total,
        )?)
    }
}

/// Free ligand and per-species binding for `species` sharing `ligand_total`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for invalid concentrations, constants, or
/// an empty species list, and [`Error::Convergence`] if the root finder does
/// not converge.
pub fn solve_multi(
    ligand_total: f64,
    species: &[Species],
    policy: KdPolicy,
) -> Result<EquilibriumSolution, Error> {
    solve_multi_with(ligand_total, species, policy, &EquilibriumConfig::default())
}

/// Like [`solve_multi`], with explicit tolerances.
///
/// # Errors
///
/// Returns the same errors as [`solve_multi`].
pub fn solve_multi_with(
    ligand_total: f64,
    species: &[Species],
    policy: KdPolicy,
    config: &EquilibriumConfig,
) -> Result<EquilibriumSolution, Error> {
    solve_multi_observed(ligand_total, species, policy, config, ())
}

/// Like [`solve_multi_with`], reporting each bisection step to `observer`.
///
/// An observer that stops the solver early yields
/// [`ConvergenceError::StoppedEarly`].
///
/// # Errors
///
/// Returns the same errors as [`solve_multi`].
pub fn solve_multi_observed<Obs>(
    ligand_total: f64,
    species: &[Species],
    policy: KdPolicy,
    config: &EquilibriumConfig,
    observer: Obs,
) -> Result<EquilibriumSolution, Error>
where
    Obs: for<'a> Observer<EquilibriumEvent<'a>, Action>,
{
    check_concentration(LIGAND, ligand_total)?;
    if species.is_empty() {
        return Err(InputError::NoSpecies.into());
    }
    species.iter().try_for_each(Species::validate)?;
    let bisection_config = config.to_bisection(ligand_total)?;

    if ligand_total == 0.0 {
        return Ok(EquilibriumSolution::unbound(species.len()));
    }

    let model = CompetitiveBindingModel::new(species, policy);
    let problem = MassBalance::new(ligand_total);

    let solution = bisection::solve(
        &model,
        &problem,
        model.log_bracket(ligand_total),
        &bisection_config,
        observer,
    )
    .map_err(|error| ConvergenceError::Solver(describe(&error)))?;

    match solution.status {
        Status::Converged => {}
        Status::MaxIters => {
            return Err(ConvergenceError::MaxIters {
                iters: solution.iters,
                free_ligand: solution.snapshot.input,
                residual: solution.residual,
            }
            .into());
        }
        Status::StoppedByObserver => {
            return Err(ConvergenceError::StoppedEarly {
                iters: solution.iters,
            }
            .into());
        }
    }

    let free_ligand = solution.snapshot.input;
    debug!(
        iters = solution.iters,
        free_ligand,
        residual = solution.residual,
        "equilibrium converged"
    );

    Ok(EquilibriumSolution {
        free_ligand,
        species: species
            .iter()
            .zip(model.fractions(free_ligand))
            .map(|(s, fraction)| SpeciesBinding::at_fraction(s.total_concentration(), fraction))
            .collect(),
        iters: solution.iters,
    })
}

/// Solves a [`BindingSystem`] with the given policy.
///
/// # Errors
///
/// Returns the same errors as [`solve_multi`].
pub fn solve_system(
    system: &BindingSystem,
    policy: KdPolicy,
) -> Result<EquilibriumSolution, Error> {
    solve_system_with(system, policy, &EquilibriumConfig::default())
}

/// Solves a [`BindingSystem`] with explicit tolerances.
///
/// # Errors
///
/// Returns the same errors as [`solve_multi`].
pub fn solve_system_with(
    system: &BindingSystem,
    policy: KdPolicy,
    config: &EquilibriumConfig,
) -> Result<EquilibriumSolution, Error> {
    solve_multi_with(system.ligand_total(), system.species(), policy, config)
}

/// Error message including its source chain.
fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
