//! Fraction-bound curves over a sequence of independent values.
//!
//! Each point is an independent equilibrium: the caller's builder turns the
//! independent value into a [`BindingSystem`], and the driver solves it with
//! the closed form for a single species or the competitive root finder for
//! several. With the `parallel` feature, points are solved on the rayon
//! thread pool; the curve keeps the input order either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::{
    closed_form,
    competitive::KdPolicy,
    equilibrium::{self, EquilibriumConfig},
    error::{Error, InputError},
    solution::EquilibriumSolution,
    species::BindingSystem,
};

/// One solved (or failed) point of a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// The independent value this point was built from.
    pub x: f64,

    /// The equilibrium, or the convergence failure at this point.
    pub outcome: Result<EquilibriumSolution, Error>,
}

/// Points in the order of the independent values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepCurve {
    pub points: Vec<SweepPoint>,
}

impl SweepCurve {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Independent values.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Bound fraction of species `index` at each point, `None` where the
    /// point failed or has no such species.
    #[must_use]
    pub fn fractions(&self, index: usize) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| {
                p.outcome
                    .as_ref()
                    .ok()
                    .and_then(|s| s.species.get(index))
                    .map(|s| s.bound_fraction)
            })
            .collect()
    }

    /// Points whose equilibrium could not be computed.
    pub fn failures(&self) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter().filter(|p| p.outcome.is_err())
    }
}

/// Solves one system per value of `values`, in order.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] as soon as the builder rejects a value.
/// Convergence failures do not abort the sweep; they are recorded in the
/// affected point's [`SweepPoint::outcome`].
pub fn sweep<F>(values: &[f64], builder: F) -> Result<SweepCurve, Error>
where
    F: Fn(f64) -> Result<BindingSystem, InputError> + Sync,
{
    sweep_with(values, builder, &EquilibriumConfig::default())
}

/// Like [`sweep`], with explicit root finder tolerances.
///
/// # Errors
///
/// Returns the same errors as [`sweep`].
pub fn sweep_with<F>(
    values: &[f64],
    builder: F,
    config: &EquilibriumConfig,
) -> Result<SweepCurve, Error>
where
    F: Fn(f64) -> Result<BindingSystem, InputError> + Sync,
{
    debug!(
        points = values.len(),
        parallel = cfg!(feature = "parallel"),
        "starting sweep"
    );

    let point = |&x: &f64| solve_point(x, &builder, config);

    #[cfg(feature = "parallel")]
    let points = values.par_iter().map(point).collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let points = values.iter().map(point).collect::<Result<Vec<_>, _>>()?;

    Ok(SweepCurve { points })
}

/// Solves the system for `x`, keeping convergence failures as the outcome.
fn solve_point<F>(x: f64, builder: &F, config: &EquilibriumConfig) -> Result<SweepPoint, Error>
where
    F: Fn(f64) -> Result<BindingSystem, InputError>,
{
    let system = builder(x)?;

    let outcome = if system.species().len() == 1 {
        closed_form::solve_system(&system)
    } else {
        equilibrium::solve_system_with(&system, KdPolicy::Competitive, config)
    };

    match outcome {
        Err(Error::InvalidInput(error)) => Err(error.into()),
        Err(error) => {
            warn!(x, %error, "sweep point failed");
            Ok(SweepPoint {
                x,
                outcome: Err(error),
            })
        }
        Ok(solution) => {
            trace!(x, free_ligand = solution.free_ligand, "sweep point solved");
            Ok(SweepPoint {
                x,
                outcome: Ok(solution),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{closed_form::solve_single, species::Species, species::LigandPool};

    #[test]
    fn ligand_titration_rises() {
        let values = [1e-8, 1e-7, 1e-6, 1e-5];

        let curve = sweep(&values, |ligand| BindingSystem::single(1e-7, 1e-7, ligand))
            .expect("valid sweep");

        let fractions: Vec<f64> = curve.fractions(0).into_iter().flatten().collect();
        assert_eq!(fractions.len(), 4);
        assert!(fractions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_species_uses_closed_form() {
        let curve = sweep(&[2e-6], |ligand| BindingSystem::single(1e-6, 1e-6, ligand))
            .expect("valid sweep");

        let solution = curve.points[0].outcome.as_ref().expect("solved");
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(
            solution.species[0].bound_fraction,
            solve_single(1e-6, 1e-6, 2e-6).expect("valid")
        );
    }

    #[test]
    fn competing_species_use_root_finder() {
        let curve = sweep(&[1e-6], |ligand| {
            BindingSystem::new(
                vec![
                    Species::new("A", 1e-6, 1e-7)?,
                    Species::new("B", 1e-6, 1e-7)?,
                ],
                LigandPool::new(ligand)?,
            )
        })
        .expect("valid sweep");

        let solution = curve.points[0].outcome.as_ref().expect("solved");
        assert!(solution.iters > 0);
        assert_eq!(solution.species.len(), 2);
    }

    #[test]
    fn builder_rejection_aborts() {
        let result = sweep(&[1e-6, -1e-6, 1e-5], |ligand| {
            BindingSystem::single(1e-7, 1e-7, ligand)
        });

        assert!(matches!(
            result,
            Err(Error::InvalidInput(InputError::NegativeConcentration { .. }))
        ));
    }

    #[test]
    fn convergence_failure_is_kept_per_point() {
        let config = EquilibriumConfig {
            max_iters: 2,
            ..EquilibriumConfig::default()
        };
        let values = [0.0, 1e-6];

        let curve = sweep_with(
            &values,
            |ligand| {
                BindingSystem::new(
                    vec![
                        Species::new("A", 1e-6, 1e-7)?,
                        Species::new("B", 1e-6, 1e-7)?,
                    ],
                    LigandPool::new(ligand)?,
                )
            },
            &config,
        )
        .expect("sweep completes");

        assert_eq!(curve.len(), 2);
        assert!(curve.points[0].outcome.is_ok());
        assert!(matches!(curve.points[1].outcome, Err(Error::Convergence(_))));
        assert_eq!(curve.failures().count(), 1);
        assert_eq!(curve.fractions(0), vec![Some(0.0), None]);
    }

    #[test]
    fn empty_values_give_empty_curve() {
        let curve = sweep(&[], |ligand| BindingSystem::single(1e-7, 1e-7, ligand))
            .expect("valid sweep");
        assert!(curve.is_empty());
    }
}
