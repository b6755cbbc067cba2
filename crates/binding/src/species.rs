//! Binding species and the systems they form.
//!
//! All concentrations and dissociation constants are in mol/L. Converting
//! from laboratory units is the caller's job; see [`crate::units`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{InputError, check_concentration, check_kd};

/// A protein species competing for the ligand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Species {
    name: String,
    total_concentration: f64,
    dissociation_constant: f64,
}

impl Species {
    /// Creates a species from its total concentration and Kd.
    ///
    /// # Errors
    ///
    /// Returns an error if the concentration is negative, the Kd is not
    /// strictly positive, or either is non-finite.
    pub fn new(
        name: impl Into<String>,
        total_concentration: f64,
        dissociation_constant: f64,
    ) -> Result<Self, InputError> {
        let species = Self {
            name: name.into(),
            total_concentration,
            dissociation_constant,
        };
        species.validate()?;
        Ok(species)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total (free plus bound) protein concentration.
    #[must_use]
    pub fn total_concentration(&self) -> f64 {
        self.total_concentration
    }

    #[must_use]
    pub fn dissociation_constant(&self) -> f64 {
        self.dissociation_constant
    }

    /// Re-checks the invariants enforced by [`Species::new`].
    ///
    /// Deserialized values bypass the constructor, so solvers call this on
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Species::new`].
    pub fn validate(&self) -> Result<(), InputError> {
        check_concentration(&self.name, self.total_concentration)?;
        check_kd(&self.name, self.dissociation_constant)?;
        Ok(())
    }
}

/// The ligand shared by every species of a system.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LigandPool {
    total_concentration: f64,
}

impl LigandPool {
    /// Creates a pool holding `total_concentration` of ligand.
    ///
    /// # Errors
    ///
    /// Returns an error if the concentration is negative or non-finite.
    pub fn new(total_concentration: f64) -> Result<Self, InputError> {
        check_concentration(LIGAND, total_concentration)?;
        Ok(Self {
            total_concentration,
        })
    }

    #[must_use]
    pub fn total_concentration(&self) -> f64 {
        self.total_concentration
    }

    /// # Errors
    ///
    /// Returns the same errors as [`LigandPool::new`].
    pub fn validate(&self) -> Result<(), InputError> {
        check_concentration(LIGAND, self.total_concentration).map(|_| ())
    }
}

pub(crate) const LIGAND: &str = "ligand";

/// Ordered protein species sharing one ligand pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BindingSystem {
    species: Vec<Species>,
    ligand: LigandPool,
}

impl BindingSystem {
    /// Creates a system from at least one species and a ligand pool.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoSpecies`] for an empty list, or a validation
    /// error from any member.
    pub fn new(species: Vec<Species>, ligand: LigandPool) -> Result<Self, InputError> {
        let system = Self { species, ligand };
        system.validate()?;
        Ok(system)
    }

    /// Creates a one-protein system.
    ///
    /// # Errors
    ///
    /// Returns an error if any value fails validation.
    pub fn single(kd: f64, protein_total: f64, ligand_total: f64) -> Result<Self, InputError> {
        Self::new(
            vec![Species::new("protein", protein_total, kd)?],
            LigandPool::new(ligand_total)?,
        )
    }

    #[must_use]
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    #[must_use]
    pub fn ligand(&self) -> LigandPool {
        self.ligand
    }

    #[must_use]
    pub fn ligand_total(&self) -> f64 {
        self.ligand.total_concentration
    }

    /// # Errors
    ///
    /// Returns the same errors as [`BindingSystem::new`].
    pub fn validate(&self) -> Result<(), InputError> {
        if self.species.is_empty() {
            return Err(InputError::NoSpecies);
        }
        self.ligand.validate()?;
        self.species.iter().try_for_each(Species::validate)
    }
}
