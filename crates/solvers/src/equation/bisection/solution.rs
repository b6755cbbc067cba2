use bindfrac_core::Snapshot;

/// How a bisection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Met the x or residual tolerance.
    Converged,

    /// Ran out of iterations first.
    MaxIters,

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// Root estimate with the smallest residual magnitude evaluated.
    pub x: f64,

    pub residual: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Midpoint evaluations performed.
    pub iters: usize,
}
