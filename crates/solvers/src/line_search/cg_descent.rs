use crate::{Iterate, Step};

use super::{Config, STPMIN, Trials};

/// Tunables of the CG-DESCENT search, see [`Strategy::CgDescent`].
///
/// [`Strategy::CgDescent`]: super::Strategy::CgDescent
pub(super) struct Params {
    pub(super) epsilon: f64,
    pub(super) theta: f64,
    pub(super) gamma: f64,
    pub(super) delta: f64,
    pub(super) omega: f64,
    pub(super) ro: f64,
}

/// What CG-DESCENT remembers between the searches of one solve.
///
/// `sum_c` is a weighted average of recent `|f|` values that scales the
/// approximate-Armijo tolerance. Once an accepted step changes the value by
/// less than `omega * sum_c`, the approximate Wolfe conditions stay enabled.
#[derive(Debug, Clone, Default)]
pub(super) struct Memory {
    sum_q: f64,
    sum_c: f64,
    approx: bool,
}

impl Memory {
    /// Folds `|f0|` into the running average at the start of a search and
    /// returns the approximate-Armijo tolerance `epsilon * sum_c`.
    fn begin(&mut self, params: &Params, f0: f64) -> f64 {
        self.sum_q = 1.0 + self.sum_q * params.delta;
        self.sum_c += (f0.abs() - self.sum_c) / self.sum_q;
        params.epsilon * self.sum_c
    }

    /// Records an accepted step from `f0` to `f`.
    fn accept(&mut self, params: &Params, f0: f64, f: f64) {
        if (f - f0).abs() <= params.omega * self.sum_c {
            self.approx = true;
        }
    }
}

/// Hager and Zhang's line search (CG_DESCENT 5.3, "L0" to "L3").
pub(super) fn search(
    params: &Params,
    memory: &mut Memory,
    config: &Config,
    trials: &mut Trials<'_>,
    t0: f64,
    state: &mut Iterate,
) -> bool {
    let origin = trials.origin();
    let epsilon = memory.begin(params, origin.f);

    if !trials.evaluate(state, t0) {
        return false;
    }

    let mut interval = Interval {
        params,
        c1: config.c1,
        c2: config.c2,
        epsilon,
        approx: memory.approx,
        a: Step::origin(origin),
        b: Step::from(&*state),
        trials,
        state,
    };

    let accepted = interval.run();
    if accepted {
        memory.accept(params, origin.f, interval.state.f);
    }
    accepted
}

/// The bracketing interval `[a, b]` around the tentative point `state`.
struct Interval<'r, 'a> {
    params: &'r Params,
    c1: f64,
    c2: f64,
    epsilon: f64,
    approx: bool,
    a: Step,
    b: Step,
    trials: &'r mut Trials<'a>,
    state: &'r mut Iterate,
}

impl Interval<'_, '_> {
    fn run(&mut self) -> bool {
        if let Some(verdict) = self.verdict(false) {
            return verdict;
        }

        self.bracket();
        if let Some(verdict) = self.verdict(true) {
            return verdict;
        }

        while self.b.t - self.a.t > STPMIN {
            let a0 = self.a;
            let b0 = self.b;
            let prev_width = b0.t - a0.t;

            // secant2
            let tc = Step::secant_root(&a0, &b0);
            if let Some(verdict) = self.probe(tc) {
                return verdict;
            }
            if (tc - self.a.t).abs() < f64::EPSILON {
                if let Some(verdict) = self.probe(Step::secant_root(&a0, &self.a)) {
                    return verdict;
                }
            } else if (tc - self.b.t).abs() < f64::EPSILON {
                if let Some(verdict) = self.probe(Step::secant_root(&b0, &self.b)) {
                    return verdict;
                }
            }

            if self.b.t - self.a.t > self.params.gamma * prev_width {
                if let Some(verdict) = self.probe(0.5 * (self.a.t + self.b.t)) {
                    return verdict;
                }
            }

            if self.trials.refused() {
                return false;
            }
        }

        false
    }

    /// Decides whether the search is over: `Some(true)` to accept the
    /// tentative point, `Some(false)` to give up, `None` to keep going.
    fn verdict(&self, bracketed: bool) -> Option<bool> {
        let origin = self.trials.origin();
        let state = &*self.state;

        if !state.is_valid() || self.trials.refused() {
            return Some(false);
        }
        if bracketed && (self.a.f > origin.f + self.epsilon || self.b.dg < 0.0) {
            return Some(false);
        }
        if state.t < self.a.t || state.t > self.b.t {
            return None;
        }

        let wolfe = state.has_armijo(origin, self.c1) && state.has_wolfe(origin, self.c2);
        let approx_wolfe = self.approx
            && state.has_approx_armijo(origin, self.epsilon)
            && state.has_approx_wolfe(origin, self.c1, self.c2);

        (wolfe || approx_wolfe).then_some(true)
    }

    /// Evaluates the tentative point at `t`.
    fn move_to(&mut self, t: f64) -> bool {
        self.trials.evaluate(&mut *self.state, t)
    }

    /// Evaluates at `t`, updates the interval and checks for termination.
    fn probe(&mut self, t: f64) -> Option<bool> {
        if !t.is_finite() {
            return None;
        }

        self.move_to(t);
        if let Some(verdict) = self.verdict(true) {
            return Some(verdict);
        }

        self.update();
        self.verdict(true)
    }

    fn tentative(&self) -> Step {
        Step::from(&*self.state)
    }

    fn approx_armijo(&self) -> bool {
        self.state
            .has_approx_armijo(self.trials.origin(), self.epsilon)
    }

    /// Grows the step by `ro` until the slope turns non-negative or the
    /// value rises above the approximate-Armijo threshold.
    fn bracket(&mut self) {
        let mut last_a = self.a;

        while self.state.is_valid() && !self.trials.refused() {
            if !self.state.has_descent() {
                self.a = last_a;
                self.b = self.tentative();
                return;
            }
            if !self.approx_armijo() {
                self.a = Step::origin(self.trials.origin());
                self.b = self.tentative();
                self.update_u();
                return;
            }

            last_a = self.tentative();
            let t = self.params.ro * self.state.t;
            self.move_to(t);
        }
    }

    /// Moves one end of the interval to the tentative point, if it lies
    /// strictly inside.
    fn update(&mut self) {
        let t = self.state.t;
        if t <= self.a.t || t >= self.b.t {
            return;
        }

        if !self.state.has_descent() {
            self.b = self.tentative();
        } else if self.approx_armijo() {
            self.a = self.tentative();
        } else {
            self.b = self.tentative();
            self.update_u();
        }
    }

    /// Shrinks an interval whose right end violates approximate Armijo
    /// until it has a non-negative slope at `b`.
    fn update_u(&mut self) {
        let theta = self.params.theta;

        while self.b.t - self.a.t > STPMIN {
            if !self.move_to((1.0 - theta) * self.a.t + theta * self.b.t) {
                return;
            }

            if !self.state.has_descent() {
                self.b = self.tentative();
                return;
            } else if self.approx_armijo() {
                self.a = self.tentative();
            } else {
                self.b = self.tentative();
            }
        }
    }
}
