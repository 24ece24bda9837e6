use nalgebra::DVector;

use crate::Function;

/// The sphere function `f(x) = x·x`, minimized at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sphere {
    size: usize,
}

impl Sphere {
    /// Creates a sphere function over `size` variables.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Function for Sphere {
    fn size(&self) -> usize {
        self.size
    }

    fn value(&self, x: &DVector<f64>) -> f64 {
        x.norm_squared()
    }

    fn value_and_gradient(&self, x: &DVector<f64>, gradient: &mut DVector<f64>) -> f64 {
        gradient.copy_from(x);
        *gradient *= 2.0;
        x.norm_squared()
    }
}
