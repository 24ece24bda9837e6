//! Core traits and types for descent solvers.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`Function`]: a smooth scalar objective with a gradient
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`gradient_accuracy`]: checks an analytic gradient against finite differences
//! - [`functions`]: standard benchmark objectives

pub mod functions;

mod function;
mod observer;

pub use function::{Function, gradient_accuracy};
pub use observer::Observer;
