//! Mass-action model of several proteins competing for one ligand.
//!
//! Each species binds according to
//!
//! ```text
//! bound_i(L) = P_i · L / (Kd_i' + L)
//! ```
//!
//! where `L` is the free ligand concentration and `Kd_i'` is the dissociation
//! constant after the [`KdPolicy`] adjustment. The ligand mass balance
//!
//! ```text
//! residual(L) = L_T − L − Σ bound_i(L)
//! ```
//!
//! is strictly decreasing for `L ≥ 0` and non-positive at `L = L_T`. Since
//! `bound_i(L) ≤ P_i · L / Kd_i'`, it is positive below
//! `L_T / (1 + Σ P_i / Kd_i')`, which bounds the equilibrium from below.
//! [`MassBalance`] takes `ln L` as its variable, so tight binders whose free
//! ligand is many decades below `L_T` converge in a bounded number of steps.

use std::convert::Infallible;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bindfrac_core::{EquationProblem, Model};

use crate::species::Species;

/// How each species' dissociation constant is adjusted for its competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KdPolicy {
    /// Use every Kd as given. Only meaningful for a single species.
    Independent,

    /// `Kd_i' = Kd_i · Π_{j≠i} (1 + P_j / Kd_j)`.
    ///
    /// With one species the product is empty and `Kd_i' = Kd_i`.
    #[default]
    Competitive,
}

impl KdPolicy {
    /// Adjusted dissociation constants, in species order.
    #[must_use]
    pub fn effective_kds(self, species: &[Species]) -> Vec<f64> {
        match self {
            KdPolicy::Independent => species.iter().map(Species::dissociation_constant).collect(),
            KdPolicy::Competitive => species
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let competition: f64 = species
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, other)| {
                            1.0 + other.total_concentration() / other.dissociation_constant()
                        })
                        .product();
                    s.dissociation_constant() * competition
                })
                .collect(),
        }
    }
}

/// Complex formed by `total` protein with constant `kd` at free ligand `free`.
#[must_use]
pub fn bound_concentration(total: f64, kd: f64, free: f64) -> f64 {
    total * occupancy(kd, free)
}

/// Fraction of sites occupied at free ligand `free`.
pub(crate) fn occupancy(kd: f64, free: f64) -> f64 {
    free / (kd + free)
}

/// Ligand mass-balance residual at a candidate free ligand concentration.
///
/// Positive when too little ligand is accounted for, negative when too much.
#[must_use]
pub fn residual(free: f64, ligand_total: f64, species: &[Species], policy: KdPolicy) -> f64 {
    let model = CompetitiveBindingModel::new(species, policy);
    ligand_total - free - model.bound(free).sum::<f64>()
}

/// Bound complex per species as a function of free ligand.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitiveBindingModel {
    totals: Vec<f64>,
    effective_kds: Vec<f64>,
}

impl CompetitiveBindingModel {
    /// Precomputes adjusted constants for `species` under `policy`.
    #[must_use]
    pub fn new(species: &[Species], policy: KdPolicy) -> Self {
        Self {
            totals: species.iter().map(Species::total_concentration).collect(),
            effective_kds: policy.effective_kds(species),
        }
    }

    #[must_use]
    pub fn effective_kds(&self) -> &[f64] {
        &self.effective_kds
    }

    /// Bound concentration of each species at free ligand `free`.
    pub fn bound(&self, free: f64) -> impl Iterator<Item = f64> + '_ {
        self.totals
            .iter()
            .zip(&self.effective_kds)
            .map(move |(&total, &kd)| bound_concentration(total, kd, free))
    }

    /// Natural-log bracket `[ln(L_T / (2·(1 + Σ P_i / Kd_i'))), ln L_T]` of
    /// the equilibrium free ligand; `ligand_total` must be positive.
    #[must_use]
    pub fn log_bracket(&self, ligand_total: f64) -> [f64; 2] {
        let capacity: f64 = self
            .totals
            .iter()
            .zip(&self.effective_kds)
            .map(|(&total, &kd)| total / kd)
            .sum();
        let floor = (ligand_total / (2.0 * (1.0 + capacity))).max(f64::MIN_POSITIVE);
        [floor.ln(), ligand_total.ln()]
    }

    /// Bound fraction of each species; zero for species with no protein.
    pub fn fractions(&self, free: f64) -> impl Iterator<Item = f64> + '_ {
        self.totals
            .iter()
            .zip(&self.effective_kds)
            .map(move |(&total, &kd)| if total > 0.0 { occupancy(kd, free) } else { 0.0 })
    }
}

impl Model for CompetitiveBindingModel {
    type Input = f64;
    type Output = Vec<f64>;
    type Error = Infallible;

    fn call(&self, free: &f64) -> Result<Vec<f64>, Self::Error> {
        Ok(self.bound(*free).collect())
    }
}

/// The log free ligand handed to [`MassBalance`] was not finite.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("log free ligand {0} is not finite")]
pub struct NonFiniteLogLigand(pub f64);

/// Ligand conservation, `L_T − L − Σ bound_i = 0`, as an equation problem in
/// `x = ln L`.
///
/// The free ligand is clamped to `L_T`, so rounding in `exp(ln L_T)` never
/// leaves the physical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalance {
    ligand_total: f64,
}

impl MassBalance {
    #[must_use]
    pub fn new(ligand_total: f64) -> Self {
        Self { ligand_total }
    }

    #[must_use]
    pub fn ligand_total(&self) -> f64 {
        self.ligand_total
    }
}

impl EquationProblem<1> for MassBalance {
    type Input = f64;
    type Output = Vec<f64>;
    type Error = NonFiniteLogLigand;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        let ln_free = x[0];
        if !ln_free.is_finite() {
            return Err(NonFiniteLogLigand(ln_free));
        }
        Ok(ln_free.exp().min(self.ligand_total))
    }

    fn residuals(&self, free: &f64, bound: &Vec<f64>) -> Result<[f64; 1], Self::Error> {
        Ok([self.ligand_total - free - bound.iter().sum::<f64>()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn pair() -> Vec<Species> {
        vec![
            Species::new("A", 1e-6, 1e-7).expect("valid"),
            Species::new("B", 3e-6, 1e-6).expect("valid"),
        ]
    }

    #[test]
    fn independent_keeps_constants() {
        assert_eq!(KdPolicy::Independent.effective_kds(&pair()), vec![1e-7, 1e-6]);
    }

    #[test]
    fn competitive_multiplies_competitor_terms() {
        let kds = KdPolicy::Competitive.effective_kds(&pair());

        // A sees B: 1 + 3e-6 / 1e-6 = 4; B sees A: 1 + 1e-6 / 1e-7 = 11.
        assert_relative_eq!(kds[0], 4e-7);
        assert_relative_eq!(kds[1], 1.1e-5);
    }

    #[test]
    fn competitive_covers_every_other_species() {
        let species = vec![
            Species::new("A", 1.0, 1.0).expect("valid"),
            Species::new("B", 2.0, 1.0).expect("valid"),
            Species::new("C", 3.0, 1.0).expect("valid"),
        ];

        let kds = KdPolicy::Competitive.effective_kds(&species);

        assert_relative_eq!(kds[0], 3.0 * 4.0);
        assert_relative_eq!(kds[1], 2.0 * 4.0);
        assert_relative_eq!(kds[2], 2.0 * 3.0);
    }

    #[test]
    fn single_species_is_policy_independent() {
        let species = vec![Species::new("A", 5e-6, 2e-7).expect("valid")];

        assert_eq!(
            KdPolicy::Competitive.effective_kds(&species),
            KdPolicy::Independent.effective_kds(&species)
        );
    }

    #[test]
    fn residual_brackets_root() {
        let species = pair();
        let total = 2e-6;

        for policy in [KdPolicy::Independent, KdPolicy::Competitive] {
            assert_relative_eq!(residual(0.0, total, &species, policy), total);
            assert!(residual(total, total, &species, policy) < 0.0);
        }
    }

    #[test]
    fn residual_is_strictly_decreasing() {
        let species = pair();
        let total = 2e-6;

        let values: Vec<f64> = (0..=50)
            .map(|i| f64::from(i) / 50.0 * total)
            .map(|free| residual(free, total, &species, KdPolicy::Competitive))
            .collect();

        assert!(values.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn empty_protein_has_zero_fraction() {
        let species = vec![
            Species::new("A", 0.0, 1e-7).expect("valid"),
            Species::new("B", 1e-6, 1e-7).expect("valid"),
        ];
        let model = CompetitiveBindingModel::new(&species, KdPolicy::Competitive);

        let fractions: Vec<f64> = model.fractions(1e-7).collect();

        assert_eq!(fractions[0], 0.0);
        assert_relative_eq!(fractions[1], 0.5);
    }

    #[test]
    fn mass_balance_maps_log_ligand() {
        let problem = MassBalance::new(1e-6);

        assert_eq!(
            problem.input(&[f64::NEG_INFINITY]),
            Err(NonFiniteLogLigand(f64::NEG_INFINITY))
        );
        assert_relative_eq!(
            problem.input(&[5e-7_f64.ln()]).expect("finite"),
            5e-7,
            max_relative = 1e-14
        );
        assert!(problem.input(&[1e-6_f64.ln()]).expect("finite") <= 1e-6);
    }

    #[test]
    fn log_bracket_changes_sign() {
        for kd in [1e-20, 1e-12, 1e-7, 1e-3] {
            let species = vec![
                Species::new("A", 1e-2, kd).expect("valid"),
                Species::new("B", 1e-6, 1e-7).expect("valid"),
            ];
            let model = CompetitiveBindingModel::new(&species, KdPolicy::Competitive);
            let ligand_total = 1e-12;
            let [lo, hi] = model.log_bracket(ligand_total);

            let at = |ln_free: f64| {
                residual(ln_free.exp(), ligand_total, &species, KdPolicy::Competitive)
            };
            assert!(at(lo) > 0.0, "kd = {kd}");
            assert!(at(hi) < 0.0, "kd = {kd}");
        }
    }

    #[test]
    fn model_and_problem_agree_with_residual() {
        let species = pair();
        let model = CompetitiveBindingModel::new(&species, KdPolicy::Competitive);
        let problem = MassBalance::new(2e-6);

        let free = problem.input(&[5e-7_f64.ln()]).expect("finite");
        let bound = model.call(&free).expect("infallible");
        let [r] = problem.residuals(&free, &bound).expect("valid");

        assert_relative_eq!(
            r,
            residual(5e-7, 2e-6, &species, KdPolicy::Competitive),
            max_relative = 1e-12
        );
    }
}
