/// Receives solver events and decides how iteration should proceed.
///
/// Observers let a caller trace or steer a solver without changing its API.
/// Returning `Some(action)` requests a solver-specific action; `None` lets
/// the solver carry on.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is a
/// no-op observer.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
