/// Actions an observer can request while a solver is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solve after the current iteration.
    ///
    /// The returned iterate carries [`Status::MaxIterations`], the same
    /// status as an exhausted budget.
    ///
    /// [`Status::MaxIterations`]: crate::Status::MaxIterations
    StopEarly,
}
