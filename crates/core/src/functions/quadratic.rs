use nalgebra::{DMatrix, DVector};

use crate::Function;

/// A quadratic `f(x) = ½ xᵀA x + bᵀx` with symmetric `A`.
///
/// When `A` is positive definite the minimizer solves `A x = -b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadratic {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl Quadratic {
    /// Creates a quadratic from its Hessian `a` and linear term `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not square or its size does not match `b`.
    #[must_use]
    pub fn new(a: DMatrix<f64>, b: DVector<f64>) -> Self {
        assert!(a.is_square(), "quadratic hessian must be square");
        assert_eq!(a.nrows(), b.len(), "hessian and linear term sizes differ");
        Self { a, b }
    }

    /// Returns the Hessian.
    #[must_use]
    pub fn hessian(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Returns the minimizer, or `None` if the Hessian is not positive definite.
    #[must_use]
    pub fn minimizer(&self) -> Option<DVector<f64>> {
        let cholesky = self.a.clone().cholesky()?;
        Some(-cholesky.solve(&self.b))
    }
}

impl Function for Quadratic {
    fn size(&self) -> usize {
        self.b.len()
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        0.5 * x.dot(&(&self.a * x)) + self.b.dot(x)
    }

    fn value_and_gradient(&self, x: &DVector<f64>, gradient: &mut DVector<f64>) -> f64 {
        gradient.copy_from(&(&self.a * x + &self.b));
        self.value(x)
    }
}
