/// Receives events from an iterative routine and may steer it.
///
/// Optimizers driving a network report their progress as events. An observer
/// can record them (for plotting a convergence curve, say) or answer with
/// `Some(action)` to request a routine-specific action such as stopping
/// early. Returning `None` leaves the routine untouched.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is an
/// observer that never acts.
pub trait Observer<E, A> {
    /// Handles one event, optionally returning an action.
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
