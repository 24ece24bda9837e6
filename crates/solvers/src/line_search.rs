//! Line searches along a descent direction.
//!
//! Given an iterate `x` with a descent direction `d`, a line search picks a
//! step length `t` so that `x + t d` decreases the objective enough and has
//! a flatter slope than `x`.
//!
//! # Conditions
//!
//! With `phi(t) = f(x + t d)`, the strategies enforce combinations of:
//!
//! - Armijo (sufficient decrease): `phi(t) <= phi(0) + c1 t phi'(0)`
//! - Wolfe (curvature): `phi'(t) >= c2 phi'(0)`
//! - strong Wolfe: `|phi'(t)| <= c2 |phi'(0)|`
//! - approximate Wolfe (CG-DESCENT only):
//!   `(2 c1 - 1) phi'(0) >= phi'(t) >= c2 phi'(0)`, paired with
//!   `phi(t) <= phi(0) + epsilon`
//!
//! # Driver
//!
//! [`LineSearch::search`] wraps every strategy the same way:
//!
//! 1. Reject the search if the config is invalid or `d` is not a descent
//!    direction, without evaluating anything.
//! 2. Ask the [`Initializer`] for the first step and clamp it into
//!    `[STPMIN, 1]` (a non-finite proposal becomes 1).
//! 3. Run the [`Strategy`].
//! 4. Accept only a valid trial that strictly improves on the origin.
//!
//! A rejected search restores the origin, keeping the evaluation counters of
//! the failed attempt.
//!
//! # Observer Events
//!
//! Each trial is reported as an [`Event::Trial`]. Actions returned for trial
//! events are ignored.

mod backtrack;
mod cg_descent;
mod config;
mod init;
mod lemarechal;
mod more_thuente;
mod nocedal_wright;
mod strategy;
mod trials;


pub use config::{Config, ConfigError};
pub use init::Initializer;
pub use strategy::Strategy;

pub(crate) use trials::Trials;

use descent_core::{Function, Observer};
use log::warn;

use crate::{Action, Event, Iterate};

use init::Initial;
use strategy::Searcher;

/// The smallest step length a line search will try.
pub const STPMIN: f64 = 10.0 * f64::EPSILON;

/// The largest step length a line search will try.
pub const STPMAX: f64 = 1.0 / STPMIN;

/// A line search, with the memory its initializer and strategy keep between
/// searches of the same solve.
#[derive(Debug, Clone)]
pub struct LineSearch {
    config: Config,
    initial: Initial,
    searcher: Searcher,
}

impl LineSearch {
    /// Creates a line search with fresh memory.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            initial: Initial::new(config.initializer),
            searcher: Searcher::new(config.strategy),
        }
    }

    /// Returns the config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Searches along `state.d` and moves `state` to the accepted trial.
    ///
    /// Returns `false` if no acceptable step was found, in which case `state`
    /// is back at its starting point with updated evaluation counters.
    pub fn search<F, Obs>(&mut self, function: &F, state: &mut Iterate, observer: &mut Obs) -> bool
    where
        F: Function + ?Sized,
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        if let Err(error) = self.config.validate() {
            warn!("line search rejected: {error}");
            return false;
        }
        if !state.has_descent() {
            warn!("line search rejected: not a descent direction (dg = {:e})", state.dg());
            return false;
        }

        let raw = self.initial.propose(function, state);
        let t0 = if raw.is_finite() {
            raw.clamp(STPMIN, 1.0)
        } else {
            1.0
        };

        let origin = state.clone();
        let function: &dyn Function = &function;
        let mut trials = Trials::new(
            function,
            &origin,
            observer,
            self.config.c1,
            self.config.c2,
            self.config.max_iterations,
        );

        let found = self.searcher.search(&self.config, &mut trials, t0, state);
        let accepted = found && state.is_valid() && state.improves_on(&origin);

        if !accepted {
            warn!(
                "line search failed: {} from t0={t0:.3e} (f0={:.6e}, f={:.6e})",
                self.config.strategy, origin.f, state.f,
            );
            let (fcalls, gcalls) = (state.fcalls, state.gcalls);
            *state = origin;
            state.fcalls = fcalls;
            state.gcalls = gcalls;
        }

        accepted
    }
}
