use nalgebra::DVector;

use crate::Function;

/// The extended Rosenbrock function
/// `f(x) = Σ 100 (x[i+1] - x[i]²)² + (1 - x[i])²`, minimized at `x = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rosenbrock {
    size: usize,
}

impl Rosenbrock {
    /// Creates a Rosenbrock function over `size` variables.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "rosenbrock needs at least two variables");
        Self { size }
    }
}

impl Function for Rosenbrock {
    fn size(&self) -> usize {
        self.size
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        x.as_slice()
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum()
    }

    fn value_and_gradient(&self, x: &DVector<f64>, gradient: &mut DVector<f64>) -> f64 {
        gradient.fill(0.0);
        for i in 0..self.size - 1 {
            let valley = x[i + 1] - x[i] * x[i];
            gradient[i] += -400.0 * valley * x[i] - 2.0 * (1.0 - x[i]);
            gradient[i + 1] += 200.0 * valley;
        }
        self.value(x)
    }
}
