/// Defines an equation problem: find `x` such that every residual is zero.
///
/// The problem maps solver variables `x` into a model input, and computes
/// residuals from the model's input and output. `N` is both the number of
/// solver variables and the number of residuals; bracketing solvers use
/// `N = 1`.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no valid input corresponds to `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes residuals from a model input and the output it produced.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be computed.
    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::Error>;
}
