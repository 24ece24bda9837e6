//! Capability traits for generic observers.
//!
//! These traits abstract over solver event and action types, so an observer
//! can be written once against what an event carries rather than against a
//! concrete solver.
//!
//! # Event traits
//!
//! - [`HasObjective`]: events that carry an objective value
//! - [`HasCriterion`]: events that carry a convergence measure
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use descent_core::Observer;
//! use descent_observers::traits::{CanStopEarly, HasCriterion};
//!
//! struct GoodEnough {
//!     tolerance: f64,
//!     min_events: usize,
//!     events: usize,
//! }
//!
//! impl<E: HasCriterion, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         self.events += 1;
//!         if self.events >= self.min_events && event.criterion() < self.tolerance {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use descent_solvers::{Action, Event};

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    ///
    /// May be `NaN` or infinite when the evaluation was not numerically
    /// valid.
    fn objective(&self) -> f64;
}

/// An event that carries a convergence measure.
pub trait HasCriterion {
    /// Returns the convergence criterion for this event, smaller is better.
    fn criterion(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl HasObjective for Event<'_> {
    fn objective(&self) -> f64 {
        self.iterate().f
    }
}

impl HasCriterion for Event<'_> {
    fn criterion(&self) -> f64 {
        self.iterate().convergence_criterion()
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
