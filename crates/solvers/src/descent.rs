//! Line-search descent methods for unconstrained smooth minimization.
//!
//! # Algorithm
//!
//! Starting from `x0`, every iteration:
//!
//! 1. Computes a search direction `d` from the gradient and the history the
//!    [`Method`] keeps. If `d` is not a descent direction, the method restarts
//!    with `d = -g` and forgets its history.
//! 2. Runs the configured [`LineSearch`](crate::line_search::LineSearch)
//!    along `d`.
//! 3. Stops with [`Status::Failed`] if the line search found no acceptable
//!    step, or with [`Status::Converged`] once
//!    `‖g‖∞ / max(1, |f|) < epsilon`.
//! 4. Reports the iterate to the observer.
//! 5. Folds the step into the method's history.
//!
//! The iteration and evaluation budgets are checked after every line search.
//! Running out of either stops the solve with [`Status::MaxIterations`].
//!
//! # Methods
//!
//! - **Gradient descent**: `d = -g`. Robust but slow on ill-conditioned
//!   problems.
//! - **Nonlinear conjugate gradient**: `d = -g + beta d_prev`, with ten
//!   choices of [`Beta`]. Needs accurate line searches and `O(n)` memory.
//! - **Quasi-Newton**: `d = -H g` with a dense inverse-Hessian approximation
//!   updated by one of the [`HessianUpdate`] formulas. `O(n²)` memory.
//! - **L-BFGS**: the BFGS direction from the last few curvature pairs,
//!   computed by the two-loop recursion. Usually the best default.
//!
//! # Limitations
//!
//! - **Smooth objectives only**: the line searches rely on accurate gradients
//! - **Local**: converges to a stationary point near `x0`
//! - **Unconstrained**: bounds and constraints must be folded into the
//!   objective
//!
//! # Observer Events
//!
//! The solver emits [`Event::Iteration`] for the starting point and after
//! every line search, including the last one, whose iterate carries the final
//! status. Each line-search trial is reported as an [`Event::Trial`].
//!
//! Returning [`Action::StopEarly`] from an iteration event ends the solve
//! with [`Status::MaxIterations`]. Actions returned for trial events are
//! ignored.
//!
//! [`Status::Failed`]: crate::Status::Failed
//! [`Status::Converged`]: crate::Status::Converged
//! [`Status::MaxIterations`]: crate::Status::MaxIterations

mod beta;
mod config;
mod direction;
mod error;
mod hessian;
mod lbfgs;
mod method;
mod search;

#[cfg(test)]
mod tests;

pub use beta::Beta;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use hessian::{HessianInit, HessianUpdate};
pub use method::Method;

use descent_core::{Function, Observer};
use nalgebra::DVector;

use crate::{Action, Event, Iterate};

use search::search;

/// Minimizes `function` starting from `x0`.
///
/// Returns the final iterate, whose `status` tells how the solve ended.
/// See the [module docs](self) for details on event timing and observer
/// actions.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `x0` does not have
/// `function.size()` entries.
pub fn minimize<F, Obs>(
    function: &F,
    x0: DVector<f64>,
    config: &Config,
    observer: Obs,
) -> Result<Iterate, Error>
where
    F: Function + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    search(function, x0, config, observer)
}

/// Minimizes `function` starting from `x0` without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `x0` does not have
/// `function.size()` entries.
pub fn minimize_unobserved<F>(function: &F, x0: DVector<f64>, config: &Config) -> Result<Iterate, Error>
where
    F: Function + ?Sized,
{
    minimize(function, x0, config, ())
}
