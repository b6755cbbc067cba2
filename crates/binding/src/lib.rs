//! Protein-ligand binding equilibria.
//!
//! Given total concentrations and dissociation constants, this crate computes
//! the fraction of each protein bound to a shared ligand:
//!
//! - [`solve_single`]: closed-form fraction for one protein and one ligand
//! - [`solve_multi`]: several proteins competing for the ligand, solved by
//!   bisection on the free ligand concentration
//! - [`sweep`]: fraction-bound curves over a sequence of independent values
//!
//! Concentrations and constants are in mol/L; [`units`] converts from mg/mL,
//! µM and nM, and [`scenario`] builds labeled curve families in those units.
//!
//! ```
//! use bindfrac::solve_single;
//!
//! // Equimolar protein and ligand at the Kd: (3 - √5) / 2 of the protein is bound.
//! let fraction = solve_single(1e-6, 1e-6, 1e-6)?;
//! assert!((fraction - 0.381_966).abs() < 1e-6);
//! # Ok::<(), bindfrac::InputError>(())
//! ```

pub mod closed_form;
pub mod competitive;
pub mod equilibrium;
pub mod scenario;
pub mod spacing;
pub mod units;

mod error;
mod solution;
mod species;
mod sweep;

pub use closed_form::solve_single;
pub use competitive::{CompetitiveBindingModel, KdPolicy, MassBalance};
pub use equilibrium::{EquilibriumConfig, solve_multi};
pub use error::{ConvergenceError, Error, InputError};
pub use solution::{EquilibriumSolution, SpeciesBinding};
pub use spacing::Spacing;
pub use species::{BindingSystem, LigandPool, Species};
pub use sweep::{SweepCurve, SweepPoint, sweep, sweep_with};
