//! Reusable observers for descent solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! plug into [`descent::minimize`] and work with any solver whose events and
//! actions implement the traits.
//!
//! - [`LogObserver`]: writes iterations (and optionally trials) to the
//!   [`log`] facade
//! - [`Trajectory`]: records the points a solve visits
//! - [`TargetValue`]: stops a solve once the objective is low enough
//! - [`traits`]: capability traits for generic observers
//!   ([`HasObjective`], [`HasCriterion`], [`CanStopEarly`])
//!
//! [`Observer`]: descent_core::Observer
//! [`descent::minimize`]: descent_solvers::descent::minimize
//! [`HasObjective`]: traits::HasObjective
//! [`HasCriterion`]: traits::HasCriterion
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod logger;
mod target;
mod trajectory;

pub use logger::LogObserver;
pub use target::TargetValue;
pub use trajectory::{Point, Trajectory};
