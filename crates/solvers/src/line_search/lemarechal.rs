use crate::{Iterate, Step};

use super::{Config, STPMAX, STPMIN, Trials};

/// Lemarechal's search for the Armijo and Wolfe conditions.
///
/// `left` is the last step satisfying Armijo (initially the origin) and
/// `right` the last step violating it. Without an upper bound the step
/// grows by `tau1`; once bracketed, trials are interpolated between the two
/// ends, kept a `safeguard` fraction of the width away from either.
pub(super) fn search(
    tau1: f64,
    safeguard: f64,
    config: &Config,
    trials: &mut Trials<'_>,
    t0: f64,
    state: &mut Iterate,
) -> bool {
    let origin = trials.origin();
    let mut left = Step::origin(origin);
    let mut right: Option<Step> = None;
    let mut t = t0;

    loop {
        if !trials.evaluate(state, t) {
            return false;
        }

        if state.has_armijo(origin, config.c1) {
            if state.has_wolfe(origin, config.c2) {
                return true;
            }
            left = Step::from(&*state);
        } else {
            right = Some(Step::from(&*state));
        }

        t = match right {
            None if left.t >= STPMAX => return false,
            None => (tau1 * left.t).min(STPMAX),
            Some(right) => {
                let lo = left.t.min(right.t);
                let hi = left.t.max(right.t);
                let width = hi - lo;
                if width <= STPMIN {
                    return false;
                }
                Step::interpolate(&left, &right).clamp(lo + safeguard * width, hi - safeguard * width)
            }
        };
    }
}
