use nalgebra::DVector;

/// A smooth scalar objective over a real vector.
///
/// Solvers only ever need two things from an objective: its value at a
/// point, and its value together with the gradient. Both take `&self`, so a
/// single objective can be shared by several solves as long as it is `Sync`.
///
/// Implementations must leave `gradient` with exactly [`Function::size`]
/// entries.
pub trait Function {
    /// Returns the number of free variables.
    fn size(&self) -> usize;

    /// Evaluates the objective at `x`.
    fn value(&self, x: &DVector<f64>) -> f64;

    /// Evaluates the objective at `x` and writes its gradient into `gradient`.
    fn value_and_gradient(&self, x: &DVector<f64>, gradient: &mut DVector<f64>) -> f64;
}

impl<F: Function + ?Sized> Function for &F {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        (**self).value(x)
    }

    fn value_and_gradient(&self, x: &DVector<f64>, gradient: &mut DVector<f64>) -> f64 {
        (**self).value_and_gradient(x, gradient)
    }
}

/// Measures how well the analytic gradient of `function` matches central
/// finite differences at `x`.
///
/// Several step sizes are tried and the smallest relative discrepancy
/// `‖g - g_fd‖∞ / (1 + |f|)` is returned. A correct gradient typically
/// scores below `1e-8`.
pub fn gradient_accuracy<F: Function + ?Sized>(function: &F, x: &DVector<f64>) -> f64 {
    let n = function.size();

    let mut gradient = DVector::zeros(n);
    let fx = function.value_and_gradient(x, &mut gradient);

    let mut xp = x.clone();
    let mut xn = x.clone();
    let mut best = f64::INFINITY;

    for h in [1e-4, 3e-5, 1e-5, 3e-6, 1e-6, 3e-7, 1e-7] {
        let mut error = 0.0_f64;
        for i in 0..n {
            xp[i] = x[i] + h;
            xn[i] = x[i] - h;

            let estimate = (function.value(&xp) - function.value(&xn)) / (2.0 * h);
            error = error.max((gradient[i] - estimate).abs());

            xp[i] = x[i];
            xn[i] = x[i];
        }
        best = best.min(error / (1.0 + fx.abs()));
    }

    best
}
