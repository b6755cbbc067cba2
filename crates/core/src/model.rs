/// A callable model that maps an input to an output.
///
/// In bindfrac a model is typically a mass-action law: given a candidate free
/// ligand concentration it reports how much of each protein is bound.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be evaluated at `input`.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// The input and output of a single model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Captures an input together with the output it produced.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}
