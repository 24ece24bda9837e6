use descent_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// An observer that stops a solve once the objective reaches a target.
///
/// Useful when the optimal value is known, or when any point below a
/// threshold is good enough. Non-finite objectives never count as reaching
/// the target.
///
/// # Example
///
/// ```rust
/// use descent_core::functions::Sphere;
/// use descent_observers::TargetValue;
/// use descent_solvers::Status;
/// use descent_solvers::descent::{Config, minimize};
/// use nalgebra::DVector;
///
/// let x0 = DVector::from_vec(vec![3.0, -4.0]);
/// let solution = minimize(&Sphere::new(2), x0, &Config::default(), TargetValue::new(1.0))?;
///
/// assert!(solution.f <= 1.0);
/// # Ok::<(), descent_solvers::descent::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetValue {
    target: f64,
}

impl TargetValue {
    /// Creates an observer that stops once the objective is at most `target`.
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self { target }
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for TargetValue {
    fn observe(&mut self, event: &E) -> Option<A> {
        let objective = event.objective();
        (objective.is_finite() && objective <= self.target).then(A::stop_early)
    }
}
