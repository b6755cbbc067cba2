use thiserror::Error;

/// Reasons a bracket cannot be used for bisection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    /// An endpoint is NaN or infinite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Both endpoints are the same value.
    #[error("zero width")]
    ZeroWidth,
    /// The endpoint residuals share a sign.
    #[error("no sign change")]
    NoSignChange,
}

/// Sign of a residual as seen by the bracket update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is zero or positive.
    Positive,
    /// Residual is negative.
    Negative,
}

impl Sign {
    /// Classifies a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Finite, ordered endpoints that have not been evaluated yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Checks and orders a pair of endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NonFinite`] or [`BracketError::ZeroWidth`].
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;

        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        Ok(Self {
            left: a.min(b),
            right: a.max(b),
        })
    }

    pub(super) fn left(&self) -> f64 {
        self.left
    }

    pub(super) fn right(&self) -> f64 {
        self.right
    }
}

/// A bracket whose endpoints have residuals of opposite sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
}

impl Bracket {
    /// Pairs bounds with their residual signs.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NoSignChange`] if both signs match.
    pub(super) fn new(
        bounds: Bounds,
        left_sign: Sign,
        right_sign: Sign,
    ) -> Result<Self, BracketError> {
        if left_sign == right_sign {
            return Err(BracketError::NoSignChange);
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_sign,
        })
    }

    /// Returns `[left, right]`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// True once the width is within `x_abs_tol + x_rel_tol * |midpoint|`.
    #[must_use]
    pub fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        self.width() <= x_abs_tol + x_rel_tol * self.midpoint().abs()
    }

    /// Replaces the endpoint whose residual sign matches `sign` with `x`.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if sign == self.left_sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}
