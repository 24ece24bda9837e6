use descent_core::{Function, Observer};
use log::trace;

use crate::{Action, Event, Iterate};

/// Evaluates trial steps for one line search.
///
/// Enforces the trial budget and reports every evaluation to the observer.
pub(crate) struct Trials<'a> {
    function: &'a dyn Function,
    origin: &'a Iterate,
    observer: &'a mut dyn for<'e> Observer<Event<'e>, Action>,
    c1: f64,
    c2: f64,
    remaining: usize,
    refused: bool,
}

impl<'a> Trials<'a> {
    pub(crate) fn new(
        function: &'a dyn Function,
        origin: &'a Iterate,
        observer: &'a mut dyn for<'e> Observer<Event<'e>, Action>,
        c1: f64,
        c2: f64,
        budget: usize,
    ) -> Self {
        Self {
            function,
            origin,
            observer,
            c1,
            c2,
            remaining: budget,
            refused: false,
        }
    }

    /// The frozen starting point of the search.
    pub(crate) fn origin(&self) -> &'a Iterate {
        self.origin
    }

    /// Evaluates `state` at step `t` from the origin.
    ///
    /// Returns `false` if the trial is not finite or the budget is spent; in
    /// the latter case `state` is left untouched.
    pub(crate) fn evaluate(&mut self, state: &mut Iterate, t: f64) -> bool {
        if self.remaining == 0 {
            self.refused = true;
            return false;
        }
        self.remaining -= 1;

        let valid = state.update(self.function, self.origin, t);
        trace!(
            "trial t={t:.6e} f={:.6e} dg={:.6e} armijo={} strong_wolfe={}",
            state.f,
            state.dg(),
            state.has_armijo(self.origin, self.c1),
            state.has_strong_wolfe(self.origin, self.c2),
        );

        let _ = self.observer.observe(&Event::Trial {
            origin: self.origin,
            trial: &*state,
        });

        valid
    }

    /// Returns `true` once a trial has been refused for lack of budget.
    pub(crate) fn refused(&self) -> bool {
        self.refused
    }
}
