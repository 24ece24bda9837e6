use log::trace;
use nalgebra::{DMatrix, DVector};

use crate::Iterate;

use super::{Beta, HessianInit, HessianUpdate, Method, lbfgs::History};

/// The per-solve direction generator of a [`Method`].
#[derive(Debug, Clone)]
pub(super) enum Direction {
    Gradient,
    Conjugate {
        beta: Beta,
        orthotest: f64,
        previous: Option<DVector<f64>>,
    },
    Quasi {
        update: HessianUpdate,
        init: HessianInit,
        inverse: DMatrix<f64>,
        scaled: bool,
    },
    Lbfgs {
        history: History,
        restarted: bool,
    },
}

impl Direction {
    pub(super) fn new(method: &Method, n: usize) -> Self {
        match *method {
            Method::GradientDescent => Self::Gradient,
            Method::ConjugateGradient { beta, orthotest } => Self::Conjugate {
                beta,
                orthotest,
                previous: None,
            },
            Method::QuasiNewton { update, init } => Self::Quasi {
                update,
                init,
                inverse: DMatrix::identity(n, n),
                scaled: false,
            },
            Method::Lbfgs { history } => Self::Lbfgs {
                history: History::new(history),
                restarted: false,
            },
        }
    }

    /// Sets `state.d` for the next line search.
    ///
    /// Falls back to `-g` and forgets the accumulated curvature whenever the
    /// method does not produce a descent direction.
    pub(super) fn compute(&mut self, state: &mut Iterate) {
        let restart = match self {
            Self::Gradient => {
                state.d = -&state.g;
                false
            }
            Self::Conjugate {
                beta,
                orthotest,
                previous,
            } => match previous.as_ref() {
                Some(pg) => {
                    // state.d still holds the direction of the last search.
                    let b = beta.value(pg, &state.d, &state.g);
                    state.d = &state.d * b - &state.g;

                    !state.has_descent()
                        || state.g.dot(pg).abs() >= *orthotest * state.g.norm_squared()
                }
                None => {
                    state.d = -&state.g;
                    false
                }
            },
            Self::Quasi { inverse, .. } => {
                state.d = -(&*inverse * &state.g);
                !state.has_descent()
            }
            Self::Lbfgs { history, restarted } => {
                state.d = history.direction(&state.g);
                *restarted = !state.has_descent();
                *restarted
            }
        };

        if restart {
            trace!(
                "iteration {}: restarting along -g (dg = {:e})",
                state.iterations,
                state.dg()
            );
            state.d = -&state.g;
            self.forget();
        }
    }

    /// Folds the accepted step from `previous` to `current` into the history.
    pub(super) fn update(&mut self, previous: &Iterate, current: &Iterate) {
        match self {
            Self::Gradient => {}
            Self::Conjugate { previous: pg, .. } => *pg = Some(previous.g.clone()),
            Self::Quasi {
                update,
                init,
                inverse,
                scaled,
            } => {
                let s = &current.x - &previous.x;
                let y = &current.g - &previous.g;

                if *init == HessianInit::Scaled && !*scaled {
                    let n = inverse.nrows();
                    *inverse = DMatrix::identity(n, n) * (s.dot(&y) / y.norm_squared());
                    *scaled = true;
                }

                update.apply(inverse, &s, &y);
                if !inverse.iter().all(|h| h.is_finite()) {
                    trace!("{update}: inverse Hessian is no longer finite, resetting");
                    inverse.fill_with_identity();
                    *scaled = false;
                }
            }
            Self::Lbfgs { history, restarted } => {
                if !*restarted {
                    history.push(&current.x - &previous.x, &current.g - &previous.g);
                }
                trace!("lbfgs: {} stored pairs", history.len());
            }
        }
    }

    fn forget(&mut self) {
        match self {
            Self::Gradient | Self::Conjugate { .. } => {}
            Self::Quasi {
                inverse, scaled, ..
            } => {
                inverse.fill_with_identity();
                *scaled = false;
            }
            Self::Lbfgs { history, .. } => history.clear(),
        }
    }
}
