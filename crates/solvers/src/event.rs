use crate::Iterate;

/// Events emitted while a solver is running.
///
/// Observers can return an [`Action`](crate::Action) in response to an
/// [`Event::Iteration`]. Actions returned for [`Event::Trial`] are ignored,
/// so trial events are for tracing only.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// An outer iteration finished (or the solve just started).
    Iteration {
        /// The current iterate.
        iterate: &'a Iterate,
    },

    /// A line search evaluated a trial step.
    Trial {
        /// The point the line search started from.
        origin: &'a Iterate,

        /// The trial point, with `trial.t` set to the step length.
        trial: &'a Iterate,
    },
}

impl<'a> Event<'a> {
    /// Returns the most recently evaluated iterate.
    #[must_use]
    pub fn iterate(&self) -> &'a Iterate {
        match self {
            Event::Iteration { iterate } => iterate,
            Event::Trial { trial, .. } => trial,
        }
    }

    /// Returns `true` for line-search trial events.
    #[must_use]
    pub fn is_trial(&self) -> bool {
        matches!(self, Event::Trial { .. })
    }
}
