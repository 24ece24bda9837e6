//! Standard smooth benchmark objectives.
//!
//! These are the usual suspects for exercising descent solvers: a trivially
//! conditioned bowl ([`Sphere`]), a general quadratic ([`Quadratic`]), a
//! non-separable convex bowl ([`Trid`]), and the curved valley of
//! [`Rosenbrock`].

mod quadratic;
mod rosenbrock;
mod sphere;
mod trid;

pub use quadratic::Quadratic;
pub use rosenbrock::Rosenbrock;
pub use sphere::Sphere;
pub use trid::Trid;
