use super::{Action, Error, Sign};

/// What the solver does after one evaluation.
#[derive(Debug)]
pub(super) enum Decision {
    Continue(Sign),
    StopEarly,
    Error(Error),
}

impl Decision {
    /// Combines the observer's action with the evaluated residual.
    ///
    /// An observer action always wins; otherwise the residual sign is used,
    /// and a failed evaluation becomes an error.
    pub(super) fn new(action: Option<Action>, residual: Result<f64, Error>) -> Self {
        match action {
            Some(Action::AssumeResidualSign(sign)) => Decision::Continue(sign),
            Some(Action::StopEarly) => Decision::StopEarly,
            None => match residual {
                Ok(value) => Decision::Continue(Sign::of(value)),
                Err(error) => Decision::Error(error),
            },
        }
    }
}
