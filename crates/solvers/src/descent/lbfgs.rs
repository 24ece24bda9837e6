use std::collections::VecDeque;

use nalgebra::DVector;

/// One curvature pair `(s, y)` with `rho = 1 / s·y`.
#[derive(Debug, Clone)]
struct Pair {
    s: DVector<f64>,
    y: DVector<f64>,
    rho: f64,
}

/// The last `capacity` curvature pairs of an L-BFGS solve.
#[derive(Debug, Clone)]
pub(super) struct History {
    capacity: usize,
    pairs: VecDeque<Pair>,
}

impl History {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pairs: VecDeque::with_capacity(capacity),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(super) fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Stores a pair, dropping the oldest one when full.
    ///
    /// Pairs without positive curvature are ignored.
    pub(super) fn push(&mut self, s: DVector<f64>, y: DVector<f64>) {
        let sy = s.dot(&y);
        if !(sy > 0.0 && sy.is_finite()) {
            return;
        }

        if self.pairs.len() == self.capacity {
            self.pairs.pop_front();
        }
        self.pairs.push_back(Pair { s, y, rho: 1.0 / sy });
    }

    /// Returns `-H g` by the two-loop recursion.
    ///
    /// With no stored pairs this is the steepest descent direction.
    pub(super) fn direction(&self, g: &DVector<f64>) -> DVector<f64> {
        let mut q = g.clone();
        let mut alpha = Vec::with_capacity(self.pairs.len());

        for pair in self.pairs.iter().rev() {
            let a = pair.rho * pair.s.dot(&q);
            q.axpy(-a, &pair.y, 1.0);
            alpha.push(a);
        }

        if let Some(last) = self.pairs.back() {
            q *= last.s.dot(&last.y) / last.y.norm_squared();
        }

        for (pair, a) in self.pairs.iter().zip(alpha.into_iter().rev()) {
            let b = pair.rho * pair.y.dot(&q);
            q.axpy(a - b, &pair.s, 1.0);
        }

        -q
    }
}
