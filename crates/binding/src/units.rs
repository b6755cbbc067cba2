//! Conversions from laboratory units to the mol/L used by the solvers.
//!
//! Protein is usually weighed out (mg/mL) and characterized by its mass per
//! binding site (kDa), while ligand and Kd are given in µM and nM.

use uom::si::{
    f64::{MassConcentration, MolarConcentration, MolarMass},
    mass_concentration::kilogram_per_cubic_meter,
    molar_concentration::{micromole_per_liter, mole_per_liter, nanomole_per_liter},
    molar_mass::kilogram_per_mole,
};

use crate::error::{InputError, check_concentration};

/// Molar concentration of binding sites from a mass concentration in mg/mL
/// and a mass per binding site in kDa.
///
/// # Errors
///
/// Returns an error if the concentration is negative or non-finite, or if
/// the molar mass is not strictly positive.
pub fn molar_from_mass(mg_per_ml: f64, kda: f64) -> Result<f64, InputError> {
    check_concentration("protein", mg_per_ml)?;
    if !kda.is_finite() {
        return Err(InputError::NotFinite {
            name: "molar mass".to_owned(),
            value: kda,
        });
    }
    if kda <= 0.0 {
        return Err(InputError::NonPositiveMolarMass { value: kda });
    }

    // 1 mg/mL is 1 kg/m³ and 1 kDa is 1 kg/mol.
    let mass = MassConcentration::new::<kilogram_per_cubic_meter>(mg_per_ml);
    let molar_mass = MolarMass::new::<kilogram_per_mole>(kda);
    let molar: MolarConcentration = (mass / molar_mass).into();

    Ok(molar.get::<mole_per_liter>())
}

#[must_use]
pub fn molar_from_micromolar(um: f64) -> f64 {
    MolarConcentration::new::<micromole_per_liter>(um).get::<mole_per_liter>()
}

#[must_use]
pub fn molar_from_nanomolar(nm: f64) -> f64 {
    MolarConcentration::new::<nanomole_per_liter>(nm).get::<mole_per_liter>()
}

#[must_use]
pub fn micromolar_from_molar(m: f64) -> f64 {
    MolarConcentration::new::<mole_per_liter>(m).get::<micromole_per_liter>()
}

#[must_use]
pub fn nanomolar_from_molar(m: f64) -> f64 {
    MolarConcentration::new::<mole_per_liter>(m).get::<nanomole_per_liter>()
}
