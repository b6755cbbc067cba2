/// Binding state of one species at equilibrium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesBinding {
    /// Concentration of protein-ligand complex, mol/L.
    pub bound_concentration: f64,

    /// Bound concentration over total concentration, in `[0, 1]`.
    pub bound_fraction: f64,
}

impl SpeciesBinding {
    pub(crate) const UNBOUND: Self = Self {
        bound_concentration: 0.0,
        bound_fraction: 0.0,
    };

    /// Binding of `total` protein at occupancy `fraction`.
    pub(crate) fn at_fraction(total: f64, fraction: f64) -> Self {
        Self {
            bound_concentration: total * fraction,
            bound_fraction: fraction,
        }
    }
}

/// The equilibrium of a binding system.
#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumSolution {
    /// Free ligand concentration satisfying mass balance, mol/L.
    pub free_ligand: f64,

    /// One entry per species, in system order.
    pub species: Vec<SpeciesBinding>,

    /// Root finder iterations; zero for closed-form and trivial solutions.
    pub iters: usize,
}

impl EquilibriumSolution {
    /// No free ligand and nothing bound.
    pub(crate) fn unbound(species: usize) -> Self {
        Self {
            free_ligand: 0.0,
            species: vec![SpeciesBinding::UNBOUND; species],
            iters: 0,
        }
    }

    /// Bound fractions in species order.
    #[must_use]
    pub fn fractions(&self) -> Vec<f64> {
        self.species.iter().map(|s| s.bound_fraction).collect()
    }

    /// Total complex concentration over all species.
    #[must_use]
    pub fn total_bound(&self) -> f64 {
        self.species.iter().map(|s| s.bound_concentration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn unbound_has_zero_everywhere() {
        let solution = EquilibriumSolution::unbound(3);

        assert_eq!(solution.free_ligand, 0.0);
        assert_eq!(solution.fractions(), vec![0.0; 3]);
        assert_eq!(solution.total_bound(), 0.0);
    }

    #[test]
    fn totals_add_up() {
        let solution = EquilibriumSolution {
            free_ligand: 1e-7,
            species: vec![
                SpeciesBinding::at_fraction(1e-6, 0.5),
                SpeciesBinding::at_fraction(2e-6, 0.2),
            ],
            iters: 12,
        };

        assert_relative_eq!(solution.total_bound(), 9e-7);
        assert_eq!(solution.fractions(), vec![0.5, 0.2]);
    }
}
