//! Analytic equilibrium of one protein binding one ligand.
//!
//! For `P + L ⇌ PL` with totals `P_T`, `L_T` and constant `Kd`, the bound
//! fraction `f` solves
//!
//! ```text
//! P_T·f² − (P_T + L_T + Kd)·f + L_T = 0
//! ```
//!
//! Only the smaller root lies in `[0, 1]`:
//!
//! ```text
//! f = (t − √(t² − 4·P_T·L_T)) / (2·P_T),   t = P_T + L_T + Kd
//! ```
//!
//! It is evaluated here in the equivalent form `2·L_T / (t + √(t² − 4·P_T·L_T))`,
//! which does not cancel when `P_T` is small next to `L_T + Kd`.

use crate::{
    error::{Error, InputError, check_concentration, check_kd},
    solution::{EquilibriumSolution, SpeciesBinding},
    species::{BindingSystem, LIGAND},
};

/// Fraction of protein bound at equilibrium.
///
/// Returns `0` when `protein_total` is zero.
///
/// # Errors
///
/// Returns an error if `kd` is not strictly positive or a concentration is
/// negative, or if any argument is non-finite.
pub fn solve_single(kd: f64, protein_total: f64, ligand_total: f64) -> Result<f64, InputError> {
    check_kd("protein", kd)?;
    check_concentration("protein", protein_total)?;
    check_concentration(LIGAND, ligand_total)?;

    Ok(bound_fraction(kd, protein_total, ligand_total))
}

/// Full equilibrium of a one-species system.
///
/// Competing species need [`crate::equilibrium::solve_system`].
///
/// # Errors
///
/// Returns [`InputError::NotSingleSpecies`] unless the system has exactly one
/// species, or a validation error.
pub fn solve_system(system: &BindingSystem) -> Result<EquilibriumSolution, Error> {
    system.validate()?;

    let [species] = system.species() else {
        return Err(InputError::NotSingleSpecies {
            count: system.species().len(),
        }
        .into());
    };
    let kd = species.dissociation_constant();
    let protein_total = species.total_concentration();
    let ligand_total = system.ligand_total();

    let fraction = bound_fraction(kd, protein_total, ligand_total);

    Ok(EquilibriumSolution {
        free_ligand: free_ligand(kd, protein_total, ligand_total),
        species: vec![SpeciesBinding::at_fraction(protein_total, fraction)],
        iters: 0,
    })
}

/// Minus root of the bound-fraction quadratic; inputs are already validated.
fn bound_fraction(kd: f64, protein_total: f64, ligand_total: f64) -> f64 {
    if protein_total == 0.0 {
        return 0.0;
    }

    let t = protein_total + ligand_total + kd;
    let discriminant = (t * t - 4.0 * protein_total * ligand_total).max(0.0);

    // Ceiling absorbs the last ulp of round-off when the protein saturates.
    (2.0 * ligand_total / (t + discriminant.sqrt())).min(1.0)
}

/// Free ligand from `L² + (P_T − L_T + Kd)·L − Kd·L_T = 0`.
///
/// Picks whichever closed form avoids cancellation for the sign of the linear
/// coefficient; the result is never negative.
fn free_ligand(kd: f64, protein_total: f64, ligand_total: f64) -> f64 {
    let b = protein_total - ligand_total + kd;
    let root = (b * b + 4.0 * kd * ligand_total).sqrt();

    if b >= 0.0 {
        2.0 * kd * ligand_total / (b + root)
    } else {
        0.5 * (root - b)
    }
}
