use crate::Iterate;

use super::{Config, STPMIN, Trials};

/// Shrinks the step by `ro` until the Armijo condition holds.
pub(super) fn search(
    ro: f64,
    config: &Config,
    trials: &mut Trials<'_>,
    t0: f64,
    state: &mut Iterate,
) -> bool {
    let mut t = t0;
    while t >= STPMIN {
        if !trials.evaluate(state, t) {
            return false;
        }
        if state.has_armijo(trials.origin(), config.c1) {
            return true;
        }
        t *= ro;
    }
    false
}
