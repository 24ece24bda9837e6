//! Line searches and gradient-based descent solvers.
//!
//! The crate is organized around a single mutable [`Iterate`] that a solver
//! owns for the duration of a solve:
//!
//! - [`line_search`]: step-length initializers and the strategies that enforce
//!   sufficient-decrease and curvature conditions along a search direction
//! - [`descent`]: the outer loop and the direction-generating methods
//!   (steepest descent, nonlinear conjugate gradient, dense quasi-Newton,
//!   and L-BFGS)
//!
//! Solvers report progress through an [`Observer`] that receives [`Event`]s
//! and may answer with an [`Action`].
//!
//! [`Observer`]: descent_core::Observer

pub mod descent;
pub mod line_search;

mod action;
mod event;
mod id;
mod iterate;
mod step;

pub use action::Action;
pub use event::Event;
pub use id::UnknownId;
pub use iterate::{Iterate, Status};
pub use step::Step;
