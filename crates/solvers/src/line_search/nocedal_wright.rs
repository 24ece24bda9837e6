use crate::{Iterate, Step};

use super::{Config, STPMAX, STPMIN, Trials};

/// The bracket-and-zoom search of Nocedal and Wright (Algorithms 3.5 and
/// 3.6) for the strong Wolfe conditions.
pub(super) fn search(
    tau1: f64,
    tau2: f64,
    config: &Config,
    trials: &mut Trials<'_>,
    t0: f64,
    state: &mut Iterate,
) -> bool {
    let origin = trials.origin();
    let mut prev = Step::origin(origin);
    let mut t = t0;
    let mut first = true;

    loop {
        if !trials.evaluate(state, t) {
            return false;
        }
        let curr = Step::from(&*state);

        if !state.has_armijo(origin, config.c1) || (!first && curr.f >= prev.f) {
            return zoom(prev, curr, tau2, config, trials, state);
        }
        if state.has_strong_wolfe(origin, config.c2) {
            return true;
        }
        if curr.dg >= 0.0 {
            return zoom(curr, prev, tau2, config, trials, state);
        }
        if curr.t >= STPMAX {
            return false;
        }

        prev = curr;
        t = (tau1 * curr.t).min(STPMAX);
        first = false;
    }
}

/// Narrows `[lo, hi]` until a trial satisfies the strong Wolfe conditions.
///
/// `lo` always satisfies Armijo and has the lowest value seen so far, and
/// `dg(lo) * (hi.t - lo.t) < 0`.
fn zoom(
    mut lo: Step,
    mut hi: Step,
    tau2: f64,
    config: &Config,
    trials: &mut Trials<'_>,
    state: &mut Iterate,
) -> bool {
    let origin = trials.origin();

    loop {
        let min = lo.t.min(hi.t);
        let max = lo.t.max(hi.t);
        let width = max - min;
        if width <= STPMIN {
            return false;
        }

        let t = Step::interpolate(&lo, &hi).clamp(min + tau2 * width, max - tau2 * width);
        if !trials.evaluate(state, t) {
            return false;
        }
        let curr = Step::from(&*state);

        if !state.has_armijo(origin, config.c1) || curr.f >= lo.f {
            hi = curr;
        } else {
            if state.has_strong_wolfe(origin, config.c2) {
                return true;
            }
            if curr.dg * (hi.t - lo.t) >= 0.0 {
                hi = lo;
            }
            lo = curr;
        }
    }
}
