use crate::{Iterate, Step};

use super::{Config, STPMAX, STPMIN, Trials};

/// Relative tolerance on the bracket width.
const XTOL: f64 = f64::EPSILON;

/// Bisect when the bracket did not shrink below this fraction over two steps.
const SHRINK: f64 = 0.66;

/// More and Thuente's search for the strong Wolfe conditions.
///
/// Follows `dcsrch` from MINPACK-2: the interval of uncertainty
/// `[stx, sty]` is updated by `dcstep`, which picks cubic, quadratic or
/// secant candidates depending on how the new trial relates to the best step
/// so far. While the sufficient-decrease test has never held with a
/// non-negative slope, the steps are chosen on the auxiliary function
/// `psi(t) = phi(t) - phi(0) - c1 t phi'(0)`.
///
/// Exits that only signal rounding limits (the trial sits at a bracket end,
/// the bracket is too narrow, or the step hit a bound) accept the trial if it
/// satisfies Armijo.
pub(super) fn search(
    delta: f64,
    config: &Config,
    trials: &mut Trials<'_>,
    t0: f64,
    state: &mut Iterate,
) -> bool {
    let origin = Step::origin(trials.origin());
    let gtest = config.c1 * origin.dg;
    let armijo = |s: &Step| s.f <= origin.f + s.t * gtest;

    let mut stage_one = true;
    let mut bracketed = false;

    let mut stp = t0;
    let mut stmin = 0.0;
    let mut stmax = stp + 4.0 * stp;
    let mut width = STPMAX - STPMIN;
    let mut width1 = 2.0 * width;

    let mut x = origin;
    let mut y = origin;

    if !trials.evaluate(state, stp) {
        return false;
    }

    loop {
        let trial = Step::from(&*state);
        let ftest = origin.f + stp * gtest;

        if stage_one && trial.f <= ftest && trial.dg >= 0.0 {
            stage_one = false;
        }

        // Rounding limits.
        if bracketed && (stp <= stmin || stp >= stmax) {
            return armijo(&trial);
        }
        if bracketed && stmax - stmin <= XTOL * stmax {
            return armijo(&trial);
        }
        if stp >= STPMAX && trial.f <= ftest && trial.dg <= gtest {
            return true;
        }
        if stp <= STPMIN && (trial.f > ftest || trial.dg >= gtest) {
            return armijo(&trial);
        }

        // Convergence.
        if trial.f <= ftest && trial.dg.abs() <= config.c2 * -origin.dg {
            return true;
        }

        if stage_one && trial.f <= x.f && trial.f > ftest {
            let modified = |s: Step| Step::new(s.t, s.f - s.t * gtest, s.dg - gtest);
            let restored = |s: Step| Step::new(s.t, s.f + s.t * gtest, s.dg + gtest);

            let mut xm = modified(x);
            let mut ym = modified(y);
            stp = dcstep(&mut xm, &mut ym, modified(trial), &mut bracketed, stmin, stmax, delta);
            x = restored(xm);
            y = restored(ym);
        } else {
            stp = dcstep(&mut x, &mut y, trial, &mut bracketed, stmin, stmax, delta);
        }

        if bracketed {
            if (y.t - x.t).abs() >= SHRINK * width1 {
                stp = x.t + 0.5 * (y.t - x.t);
            }
            width1 = width;
            width = (y.t - x.t).abs();

            stmin = x.t.min(y.t);
            stmax = x.t.max(y.t);
        } else {
            stmin = stp + 1.1 * (stp - x.t);
            stmax = stp + 4.0 * (stp - x.t);
        }

        stp = stp.clamp(STPMIN, STPMAX);

        // No further progress is possible, retry the best step.
        if bracketed && (stp <= stmin || stp >= stmax || stmax - stmin <= XTOL * stmax) {
            stp = x.t;
        }

        if !trials.evaluate(state, stp) {
            return false;
        }
    }
}

/// Updates the interval of uncertainty `[x, y]` with the new trial `p` and
/// returns the next step.
///
/// `x` is the step with the lowest value so far and `y` the other end of the
/// interval. Mirrors the four cases of MINPACK-2's `dcstep`.
fn dcstep(
    x: &mut Step,
    y: &mut Step,
    p: Step,
    bracketed: &mut bool,
    stpmin: f64,
    stpmax: f64,
    delta: f64,
) -> f64 {
    let sgnd = p.dg * x.dg.signum();

    let next = if p.f > x.f {
        // Higher value: the minimum is bracketed. Take the cubic step if it
        // is closer to x, else the average of cubic and quadratic.
        let stpc = Step::cubic_minimizer(x, &p);
        let (stpq, _) = Step::quadratic_minimizer(x, &p);
        *bracketed = true;

        if (stpc - x.t).abs() < (stpq - x.t).abs() {
            stpc
        } else {
            stpc + 0.5 * (stpq - stpc)
        }
    } else if sgnd < 0.0 {
        // Derivatives of opposite sign: the minimum is bracketed. Take the
        // step farther from p.
        let stpc = Step::cubic_minimizer(x, &p);
        let stpq = Step::secant_root(x, &p);
        *bracketed = true;

        if (stpc - p.t).abs() > (stpq - p.t).abs() {
            stpc
        } else {
            stpq
        }
    } else if p.dg.abs() < x.dg.abs() {
        // Same sign, shrinking slope: extrapolate, but carefully.
        let mut stpc = Step::cubic_minimizer(x, &p);
        let stpq = Step::secant_root(x, &p);

        if !(stpc.is_finite() && (p.t - x.t) * (stpc - p.t) > 0.0) {
            stpc = if p.t > x.t { stpmax } else { stpmin };
        }

        if *bracketed {
            let stpf = if (stpc - p.t).abs() < (stpq - p.t).abs() {
                stpc
            } else {
                stpq
            };
            let limit = p.t + delta * (y.t - p.t);
            if p.t > x.t {
                stpf.min(limit)
            } else {
                stpf.max(limit)
            }
        } else {
            let stpf = if (stpc - p.t).abs() > (stpq - p.t).abs() {
                stpc
            } else {
                stpq
            };
            stpf.min(stpmax).max(stpmin)
        }
    } else if *bracketed {
        // Same sign, slope not shrinking, but bracketed: cubic toward y.
        Step::cubic_minimizer(&p, y)
    } else if p.t > x.t {
        stpmax
    } else {
        stpmin
    };

    if p.f > x.f {
        *y = p;
    } else {
        if sgnd < 0.0 {
            *y = *x;
        }
        *x = p;
    }

    next
}
