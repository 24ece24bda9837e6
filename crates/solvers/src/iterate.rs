use descent_core::Function;
use nalgebra::DVector;

/// The lifecycle state of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The solve is still in progress.
    Running,

    /// The convergence criterion dropped below the configured epsilon.
    Converged,

    /// The iteration or evaluation budget ran out, or an observer stopped
    /// the solve early.
    MaxIterations,

    /// A line search could not produce a valid next point.
    Failed,
}

/// A point visited by a solver, together with everything evaluated there.
///
/// A solve owns exactly one current iterate. Line searches work on scratch
/// copies and hand back the accepted trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterate {
    /// The point.
    pub x: DVector<f64>,

    /// The objective value at `x`.
    pub f: f64,

    /// The gradient at `x`.
    pub g: DVector<f64>,

    /// The search direction from `x`.
    pub d: DVector<f64>,

    /// The step length that produced `x` (zero for the starting point).
    pub t: f64,

    /// Number of objective evaluations so far.
    pub fcalls: usize,

    /// Number of gradient evaluations so far.
    pub gcalls: usize,

    /// Number of completed outer iterations.
    pub iterations: usize,

    /// The lifecycle state of the solve.
    pub status: Status,
}

impl Iterate {
    /// Evaluates `function` at `x0` and creates the starting iterate.
    ///
    /// The direction starts out as zero.
    pub fn new<F: Function + ?Sized>(function: &F, x0: DVector<f64>) -> Self {
        let n = x0.len();
        let mut g = DVector::zeros(n);
        let f = function.value_and_gradient(&x0, &mut g);

        Self {
            x: x0,
            f,
            g,
            d: DVector::zeros(n),
            t: 0.0,
            fcalls: 1,
            gcalls: 1,
            iterations: 0,
            status: Status::Running,
        }
    }

    /// Moves to `origin.x + t * origin.d` and evaluates value and gradient.
    ///
    /// The direction is copied from `origin`. Returns `false` when the new
    /// point is not numerically valid; a non-finite `t` is rejected without
    /// calling the function.
    pub fn update<F: Function + ?Sized>(&mut self, function: &F, origin: &Iterate, t: f64) -> bool {
        self.t = t;
        self.d.copy_from(&origin.d);

        if !t.is_finite() {
            self.f = f64::NAN;
            return false;
        }

        self.x.copy_from(&origin.x);
        self.x.axpy(t, &origin.d, 1.0);
        self.f = function.value_and_gradient(&self.x, &mut self.g);
        self.fcalls += 1;
        self.gcalls += 1;

        self.is_valid()
    }

    /// Returns `true` if the step, value and gradient are all finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.t.is_finite() && self.f.is_finite() && self.g.iter().all(|gi| gi.is_finite())
    }

    /// The directional derivative `g·d`.
    #[must_use]
    pub fn dg(&self) -> f64 {
        self.g.dot(&self.d)
    }

    /// Returns `true` if `d` is a descent direction.
    #[must_use]
    pub fn has_descent(&self) -> bool {
        self.dg() < 0.0
    }

    /// Sufficient decrease: `f <= origin.f + t * c1 * origin.dg()`.
    #[must_use]
    pub fn has_armijo(&self, origin: &Iterate, c1: f64) -> bool {
        self.f <= origin.f + self.t * c1 * origin.dg()
    }

    /// Approximate sufficient decrease: `f <= origin.f + epsilon`.
    #[must_use]
    pub fn has_approx_armijo(&self, origin: &Iterate, epsilon: f64) -> bool {
        self.f <= origin.f + epsilon
    }

    /// Curvature condition: `dg >= c2 * origin.dg()`.
    #[must_use]
    pub fn has_wolfe(&self, origin: &Iterate, c2: f64) -> bool {
        self.dg() >= c2 * origin.dg()
    }

    /// Strong curvature condition: `|dg| <= c2 * |origin.dg()|`.
    #[must_use]
    pub fn has_strong_wolfe(&self, origin: &Iterate, c2: f64) -> bool {
        self.dg().abs() <= c2 * origin.dg().abs()
    }

    /// Approximate Wolfe condition: `(2 c1 - 1) origin.dg() >= dg >= c2 origin.dg()`.
    #[must_use]
    pub fn has_approx_wolfe(&self, origin: &Iterate, c1: f64, c2: f64) -> bool {
        let dg0 = origin.dg();
        let dg = self.dg();
        (2.0 * c1 - 1.0) * dg0 >= dg && dg >= c2 * dg0
    }

    /// The relative gradient size `‖g‖∞ / max(1, |f|)`.
    #[must_use]
    pub fn convergence_criterion(&self) -> f64 {
        self.g.amax() / self.f.abs().max(1.0)
    }

    /// Returns `true` if the convergence criterion is below `epsilon`.
    #[must_use]
    pub fn converged(&self, epsilon: f64) -> bool {
        self.convergence_criterion() < epsilon
    }

    /// Returns `true` if this iterate has a strictly lower value than `other`.
    ///
    /// Non-finite values rank above every finite one.
    #[must_use]
    pub fn improves_on(&self, other: &Iterate) -> bool {
        rank(self.f) < rank(other.f)
    }
}

fn rank(f: f64) -> f64 {
    if f.is_finite() { f } else { f64::INFINITY }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use descent_core::functions::Sphere;

    use super::*;

    fn start() -> Iterate {
        let mut iterate = Iterate::new(&Sphere::new(2), DVector::from_vec(vec![1.0, -2.0]));
        iterate.d = -iterate.g.clone();
        iterate
    }

    #[test]
    fn new_evaluates_once() {
        let iterate = start();

        assert_relative_eq!(iterate.f, 5.0);
        assert_relative_eq!(iterate.g, DVector::from_vec(vec![2.0, -4.0]));
        assert_eq!((iterate.fcalls, iterate.gcalls), (1, 1));
        assert_eq!(iterate.status, Status::Running);
        assert!(iterate.is_valid());
    }

    #[test]
    fn update_moves_along_origin_direction() {
        let origin = start();
        let mut trial = origin.clone();

        assert!(trial.update(&Sphere::new(2), &origin, 0.25));
        assert_relative_eq!(trial.x, DVector::from_vec(vec![0.5, -1.0]));
        assert_relative_eq!(trial.f, 1.25);
        assert_relative_eq!(trial.t, 0.25);
        assert_eq!((trial.fcalls, trial.gcalls), (2, 2));
        assert!(trial.improves_on(&origin));
    }

    #[test]
    fn non_finite_step_is_rejected_without_evaluating() {
        let origin = start();
        let mut trial = origin.clone();

        assert!(!trial.update(&Sphere::new(2), &origin, f64::NAN));
        assert_eq!(trial.fcalls, origin.fcalls);
        assert!(!trial.is_valid());
        assert!(!trial.improves_on(&origin));
        assert!(origin.improves_on(&trial));
    }

    #[test]
    fn line_search_conditions() {
        let sphere = Sphere::new(2);
        let origin = start();
        assert_relative_eq!(origin.dg(), -20.0);
        assert!(origin.has_descent());

        // Exact minimizer along d.
        let mut exact = origin.clone();
        exact.update(&sphere, &origin, 0.5);
        assert!(exact.has_armijo(&origin, 1e-4));
        assert!(exact.has_strong_wolfe(&origin, 0.1));
        assert!(exact.has_approx_wolfe(&origin, 1e-4, 0.1));

        // Overshoots back to the starting value.
        let mut overshoot = origin.clone();
        overshoot.update(&sphere, &origin, 1.0);
        assert!(!overshoot.has_armijo(&origin, 1e-4));
        assert!(overshoot.has_approx_armijo(&origin, 1e-12));
        assert!(overshoot.has_wolfe(&origin, 0.9));
        assert!(!overshoot.has_strong_wolfe(&origin, 0.9));

        // Too short to satisfy the curvature condition.
        let mut short = origin.clone();
        short.update(&sphere, &origin, 0.01);
        assert!(short.has_armijo(&origin, 1e-4));
        assert!(!short.has_wolfe(&origin, 0.9));
    }

    #[test]
    fn convergence_is_relative_to_the_value() {
        let sphere = Sphere::new(2);
        let small = Iterate::new(&sphere, DVector::from_vec(vec![1e-8, 0.0]));
        assert_relative_eq!(small.convergence_criterion(), 2e-8);
        assert!(small.converged(1e-6));

        let large = Iterate::new(&sphere, DVector::from_vec(vec![10.0, 0.0]));
        assert_relative_eq!(large.convergence_criterion(), 0.2);
        assert!(!large.converged(1e-6));
    }
}
