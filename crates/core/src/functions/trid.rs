use nalgebra::DVector;

use crate::Function;

/// The Trid function `f(x) = Σ (x[i] - 1)² - Σ x[i] x[i-1]`.
///
/// Convex with a unique minimizer at `x[i] = (i + 1)(n - i)` (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trid {
    size: usize,
}

impl Trid {
    /// Creates a Trid function over `size` variables.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Returns the minimizer.
    #[must_use]
    pub fn minimizer(&self) -> DVector<f64> {
        let n = self.size;
        DVector::from_fn(n, |i, _| ((i + 1) * (n - i)) as f64)
    }
}

impl Function for Trid {
    fn size(&self) -> usize {
        self.size
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        let squares: f64 = x.iter().map(|xi| (xi - 1.0).powi(2)).sum();
        let products: f64 = x.as_slice().windows(2).map(|w| w[0] * w[1]).sum();
        squares - products
    }

    fn value_and_gradient(&self, x: &DVector<f64>, gradient: &mut DVector<f64>) -> f64 {
        let n = self.size;
        for i in 0..n {
            let left = if i > 0 { x[i - 1] } else { 0.0 };
            let right = if i + 1 < n { x[i + 1] } else { 0.0 };
            gradient[i] = 2.0 * (x[i] - 1.0) - left - right;
        }
        self.value(x)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::gradient_accuracy;

    #[test]
    fn gradient_vanishes_at_minimizer() {
        let trid = Trid::new(6);
        let mut g = DVector::zeros(6);

        // f* = -n (n + 4)(n - 1) / 6
        let f = trid.value_and_gradient(&trid.minimizer(), &mut g);
        assert_relative_eq!(f, -50.0, epsilon = 1e-12);
        assert_relative_eq!(g.amax(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let trid = Trid::new(4);
        let x = DVector::from_vec(vec![0.5, -1.0, 2.0, 3.5]);

        assert!(gradient_accuracy(&trid, &x) < 1e-8);
    }
}
