//! Independent-variable sequences for curve sweeps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// How sample points are distributed between two bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Spacing {
    /// Equal differences between neighbours.
    Linear,

    /// Equal ratios between neighbours; both bounds must be positive.
    #[default]
    Logarithmic,
}

impl Spacing {
    /// Generates `count` values from `start` to `end`, both included.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is non-finite, a logarithmic bound is not
    /// strictly positive, or `count` is too small to span the bounds.
    pub fn generate(self, start: f64, end: f64, count: usize) -> Result<Vec<f64>, InputError> {
        for value in [start, end] {
            if !value.is_finite() {
                return Err(InputError::NotFinite {
                    name: "range bound".to_owned(),
                    value,
                });
            }
            if self == Spacing::Logarithmic && value <= 0.0 {
                return Err(InputError::NonPositiveLogBound { value });
            }
        }

        #[allow(clippy::float_cmp)]
        match count {
            0 => return Err(InputError::TooFewPoints { count }),
            1 if start == end => return Ok(vec![start]),
            1 => return Err(InputError::TooFewPoints { count }),
            _ => {}
        }

        let last = count - 1;
        let mut values: Vec<f64> = match self {
            Spacing::Linear => (0..count)
                .map(|i| start + (end - start) * step(i, last))
                .collect(),
            Spacing::Logarithmic => {
                let (ln_start, ln_end) = (start.ln(), end.ln());
                (0..count)
                    .map(|i| (ln_start + (ln_end - ln_start) * step(i, last)).exp())
                    .collect()
            }
        };

        // Pin the endpoints so they survive exp/ln round-off exactly.
        values[0] = start;
        values[last] = end;
        Ok(values)
    }
}

#[allow(clippy::cast_precision_loss)]
fn step(i: usize, last: usize) -> f64 {
    i as f64 / last as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn linear_is_evenly_spaced() {
        let values = Spacing::Linear.generate(0.0, 1.0, 5).expect("valid range");
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn logarithmic_spans_decades() {
        let values = Spacing::Logarithmic
            .generate(1e-9, 1e-3, 7)
            .expect("valid range");

        assert_eq!(values.len(), 7);
        assert_eq!(values[0], 1e-9);
        assert_eq!(values[6], 1e-3);
        for (i, value) in values.iter().enumerate() {
            assert_relative_eq!(*value, 10f64.powi(i as i32 - 9), max_relative = 1e-12);
        }
    }

    #[test]
    fn descending_ranges_are_allowed() {
        let values = Spacing::Logarithmic.generate(100.0, 1.0, 3).expect("valid range");

        assert_relative_eq!(values[1], 10.0, max_relative = 1e-12);
        assert_eq!(values[2], 1.0);
    }

    #[test]
    fn logarithmic_rejects_non_positive_bounds() {
        assert_eq!(
            Spacing::Logarithmic.generate(0.0, 1.0, 10),
            Err(InputError::NonPositiveLogBound { value: 0.0 })
        );
        assert_eq!(
            Spacing::Logarithmic.generate(1.0, -5.0, 10),
            Err(InputError::NonPositiveLogBound { value: -5.0 })
        );
    }

    #[test]
    fn linear_accepts_zero() {
        assert!(Spacing::Linear.generate(0.0, 10.0, 11).is_ok());
    }

    #[test]
    fn rejects_degenerate_counts() {
        assert_eq!(
            Spacing::Linear.generate(0.0, 1.0, 0),
            Err(InputError::TooFewPoints { count: 0 })
        );
        assert_eq!(
            Spacing::Linear.generate(0.0, 1.0, 1),
            Err(InputError::TooFewPoints { count: 1 })
        );
        assert_eq!(Spacing::Linear.generate(2.0, 2.0, 1), Ok(vec![2.0]));
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(matches!(
            Spacing::Linear.generate(0.0, f64::INFINITY, 3),
            Err(InputError::NotFinite { .. })
        ));
    }
}
