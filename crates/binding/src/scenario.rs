//! Families of labeled fraction-bound curves in laboratory units.
//!
//! Each series fixes all but one quantity, sweeps a concentration range, and
//! produces one curve per value of the varied quantity:
//!
//! - [`ProteinSeries`]: one curve per protein concentration, ligand swept.
//! - [`RatioSeries`]: one curve per `[P]:[L]` ratio, protein swept.
//! - [`AffinitySeries`]: one curve per Kd, protein swept at a fixed ratio.
//!
//! Protein is given in mg/mL with a mass per binding site in kDa, ligand in
//! µM, and Kd in nM. Curve x values stay in those units.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, InputError, check_concentration, check_kd},
    spacing::Spacing,
    species::BindingSystem,
    sweep::{SweepCurve, sweep},
    units::{micromolar_from_molar, molar_from_mass, molar_from_micromolar, molar_from_nanomolar},
};

/// A curve with its legend text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCurve {
    pub label: String,
    pub curve: SweepCurve,
}

/// Fixed Kd, one curve per protein concentration, ligand total on the x axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProteinSeries {
    pub kd_nm: f64,
    pub mass_kda: f64,
    pub proteins_mg_ml: Vec<f64>,

    /// Ligand range in µM.
    pub ligand_um: [f64; 2],
    pub points: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spacing: Spacing,
}

impl ProteinSeries {
    /// Builds one curve per distinct positive protein concentration, in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for negative or non-finite inputs or an
    /// invalid ligand range.
    pub fn curves(&self) -> Result<Vec<LabeledCurve>, Error> {
        let kd = check_kd("Kd", molar_from_nanomolar(self.kd_nm))?;
        let ligand = self
            .spacing
            .generate(self.ligand_um[0], self.ligand_um[1], self.points)?;

        distinct_positive(&self.proteins_mg_ml, "protein", check_concentration)?
            .into_iter()
            .map(|protein_mg_ml| -> Result<LabeledCurve, Error> {
                let protein = molar_from_mass(protein_mg_ml, self.mass_kda)?;
                let curve = sweep(&ligand, |ligand_um| {
                    BindingSystem::single(kd, protein, molar_from_micromolar(ligand_um))
                })?;
                Ok(LabeledCurve {
                    label: format!(
                        "[P] = {} mg/ml / {} μM",
                        format_sig(protein_mg_ml, 3),
                        format_sig(micromolar_from_molar(protein), 3)
                    ),
                    curve,
                })
            })
            .collect()
    }
}

/// Fixed Kd, one curve per `[P]:[L] = 1:r` ratio, protein total on the x axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RatioSeries {
    pub kd_nm: f64,
    pub mass_kda: f64,

    /// Ligand-to-protein molar ratios.
    pub ratios: Vec<f64>,

    /// Protein range in mg/mL.
    pub protein_mg_ml: [f64; 2],
    pub points: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spacing: Spacing,
}

impl RatioSeries {
    /// Builds one curve per distinct positive ratio, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for negative or non-finite inputs or an
    /// invalid protein range.
    pub fn curves(&self) -> Result<Vec<LabeledCurve>, Error> {
        let kd = check_kd("Kd", molar_from_nanomolar(self.kd_nm))?;
        let protein = self
            .spacing
            .generate(self.protein_mg_ml[0], self.protein_mg_ml[1], self.points)?;

        distinct_positive(&self.ratios, "ratio", check_concentration)?
            .into_iter()
            .map(|ratio| -> Result<LabeledCurve, Error> {
                let curve = sweep(&protein, |mg_ml| {
                    let protein = molar_from_mass(mg_ml, self.mass_kda)?;
                    BindingSystem::single(kd, protein, ratio * protein)
                })?;
                Ok(LabeledCurve {
                    label: format!("[P]:[L] = 1:{}", format_sig(ratio, 6)),
                    curve,
                })
            })
            .collect()
    }
}

/// Fixed `[P]:[L]` ratio, one curve per Kd, protein total on the x axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffinitySeries {
    pub ratio: f64,
    pub mass_kda: f64,
    pub kds_nm: Vec<f64>,

    /// Protein range in mg/mL.
    pub protein_mg_ml: [f64; 2],
    pub points: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spacing: Spacing,
}

impl AffinitySeries {
    /// Builds one curve per distinct positive Kd, tightest binder first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for negative or non-finite inputs or an
    /// invalid protein range.
    pub fn curves(&self) -> Result<Vec<LabeledCurve>, Error> {
        let ratio = check_concentration("ratio", self.ratio)?;
        let protein = self
            .spacing
            .generate(self.protein_mg_ml[0], self.protein_mg_ml[1], self.points)?;

        distinct_positive(&self.kds_nm, "Kd", check_kd)?
            .into_iter()
            .map(|kd_nm| -> Result<LabeledCurve, Error> {
                let kd = molar_from_nanomolar(kd_nm);
                let curve = sweep(&protein, |mg_ml| {
                    let protein = molar_from_mass(mg_ml, self.mass_kda)?;
                    BindingSystem::single(kd, protein, ratio * protein)
                })?;
                Ok(LabeledCurve {
                    label: format!("Kd = {} nM", format_sig(kd_nm, 3)),
                    curve,
                })
            })
            .collect()
    }
}

/// Any of the curve families, tagged by plotting mode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum Scenario {
    Protein(ProteinSeries),
    Ratio(RatioSeries),
    Affinity(AffinitySeries),
}

impl Scenario {
    /// # Errors
    ///
    /// Returns the errors of the wrapped series.
    pub fn curves(&self) -> Result<Vec<LabeledCurve>, Error> {
        match self {
            Scenario::Protein(series) => series.curves(),
            Scenario::Ratio(series) => series.curves(),
            Scenario::Affinity(series) => series.curves(),
        }
    }

    /// Axis title for the swept quantity.
    #[must_use]
    pub fn x_label(&self) -> &'static str {
        match self {
            Scenario::Protein(_) => "[L]_T (μM)",
            Scenario::Ratio(_) | Scenario::Affinity(_) => "[P]_T (mg/ml)",
        }
    }
}

/// Drops zeros, checks the rest, and returns them sorted without duplicates.
#[allow(clippy::float_cmp)]
fn distinct_positive(
    values: &[f64],
    name: &str,
    check: fn(&str, f64) -> Result<f64, InputError>,
) -> Result<Vec<f64>, InputError> {
    let mut kept = values
        .iter()
        .copied()
        .filter(|&value| value != 0.0)
        .map(|value| check(name, value))
        .collect::<Result<Vec<_>, _>>()?;
    kept.sort_by(f64::total_cmp);
    kept.dedup();
    Ok(kept)
}

/// Formats `value` with `digits` significant digits, like C's `%g`.
///
/// Trailing zeros are removed, and scientific notation is used when the
/// decimal exponent is below -4 or at least `digits`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_sig(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let digits_exp = i32::try_from(digits).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= digits_exp {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(digits_exp - 1 - exponent).unwrap_or(0);
        trim_zeros(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::closed_form::solve_single;

    #[test]
    fn formats_like_printf_g() {
        assert_eq!(format_sig(0.01, 3), "0.01");
        assert_eq!(format_sig(0.1, 3), "0.1");
        assert_eq!(format_sig(1.0, 3), "1");
        assert_eq!(format_sig(0.2, 3), "0.2");
        assert_eq!(format_sig(123.456, 3), "123");
        assert_eq!(format_sig(1000.0, 3), "1e+03");
        assert_eq!(format_sig(12345.678, 3), "1.23e+04");
        assert_eq!(format_sig(1e-5, 3), "1e-05");
        assert_eq!(format_sig(0.000_123_4, 3), "0.000123");
        assert_eq!(format_sig(-2.5, 3), "-2.5");
        assert_eq!(format_sig(100.0, 6), "100");
        assert_eq!(format_sig(0.0, 3), "0");
    }

    #[test]
    fn distinct_positive_sorts_and_dedups() {
        let kept = distinct_positive(&[1.0, 0.0, 0.1, 1.0, 10.0], "protein", check_concentration)
            .expect("valid values");
        assert_eq!(kept, vec![0.1, 1.0, 10.0]);

        assert!(matches!(
            distinct_positive(&[1.0, -1.0], "protein", check_concentration),
            Err(InputError::NegativeConcentration { .. })
        ));
        assert!(matches!(
            distinct_positive(&[-5.0], "Kd", check_kd),
            Err(InputError::NonPositiveKd { .. })
        ));
    }

    #[test]
    fn protein_series_labels_and_values() {
        let series = ProteinSeries {
            kd_nm: 1000.0,
            mass_kda: 100.0,
            proteins_mg_ml: vec![1.0, 0.0, 0.1],
            ligand_um: [0.01, 100.0],
            points: 5,
            spacing: Spacing::Logarithmic,
        };

        let curves = series.curves().expect("valid series");
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].label, "[P] = 0.1 mg/ml / 1 μM");
        assert_eq!(curves[1].label, "[P] = 1 mg/ml / 10 μM");

        let curve = &curves[1].curve;
        assert_eq!(curve.len(), 5);
        assert_relative_eq!(curve.points[2].x, 1.0, max_relative = 1e-12);

        let expected = solve_single(1e-6, 1e-5, 1e-6).expect("valid input");
        let fraction = curve.fractions(0)[2].expect("solved");
        assert_relative_eq!(fraction, expected, max_relative = 1e-9);
    }

    #[test]
    fn ratio_series_ligand_follows_protein() {
        let series = RatioSeries {
            kd_nm: 1000.0,
            mass_kda: 100.0,
            ratios: vec![10.0, 1.0],
            protein_mg_ml: [0.001, 10.0],
            points: 3,
            spacing: Spacing::Logarithmic,
        };

        let curves = series.curves().expect("valid series");
        let labels: Vec<&str> = curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["[P]:[L] = 1:1", "[P]:[L] = 1:10"]);

        // Middle point: 0.1 mg/mL of 100 kDa is 1 µM protein.
        let fraction = curves[1].curve.fractions(0)[1].expect("solved");
        let expected = solve_single(1e-6, 1e-6, 1e-5).expect("valid input");
        assert_relative_eq!(fraction, expected, max_relative = 1e-9);
    }

    #[test]
    fn affinity_series_orders_tightest_first() {
        let series = AffinitySeries {
            ratio: 1.0,
            mass_kda: 100.0,
            kds_nm: vec![1000.0, 1.0, 1e6],
            protein_mg_ml: [0.001, 10.0],
            points: 11,
            spacing: Spacing::Logarithmic,
        };

        let curves = series.curves().expect("valid series");
        let labels: Vec<&str> = curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Kd = 1 nM", "Kd = 1e+03 nM", "Kd = 1e+06 nM"]);

        // Tighter binding means a larger bound fraction at every point.
        for i in 0..11 {
            let tight = curves[0].curve.fractions(0)[i].expect("solved");
            let weak = curves[2].curve.fractions(0)[i].expect("solved");
            assert!(tight > weak);
        }
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let series = RatioSeries {
            kd_nm: 1000.0,
            mass_kda: 100.0,
            ratios: vec![1.0],
            protein_mg_ml: [0.0, 10.0],
            points: 10,
            spacing: Spacing::Logarithmic,
        };
        assert!(matches!(
            series.curves(),
            Err(Error::InvalidInput(InputError::NonPositiveLogBound { .. }))
        ));

        let linear = RatioSeries {
            spacing: Spacing::Linear,
            ..series
        };
        assert_eq!(linear.curves().expect("valid series")[0].curve.len(), 10);

        let bad_mass = Scenario::Affinity(AffinitySeries {
            ratio: 1.0,
            mass_kda: 0.0,
            kds_nm: vec![1.0],
            protein_mg_ml: [0.1, 1.0],
            points: 2,
            spacing: Spacing::Linear,
        });
        assert!(matches!(
            bad_mass.curves(),
            Err(Error::InvalidInput(InputError::NonPositiveMolarMass { .. }))
        ));
    }
}
