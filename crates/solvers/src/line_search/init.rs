use std::fmt;
use std::str::FromStr;

use descent_core::Function;

use crate::{Iterate, Step, UnknownId};

use super::config::{ConfigError, check_open};

/// Strategies for choosing the first trial step of each line search.
///
/// The raw proposal is clamped into `[STPMIN, 1]` by the line search, and
/// replaced by 1 when it is not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Initializer {
    /// Always propose 1. Natural for quasi-Newton directions.
    Unit,

    /// Assume the first-order change matches the previous iteration:
    /// `t_prev * dg_prev / dg`.
    Linear,

    /// Minimize the quadratic through the previous and current values:
    /// `1.01 * 2 * (f - f_prev) / dg`.
    Quadratic,

    /// The CG-DESCENT initial step.
    ///
    /// The first step is scaled from `‖x‖∞ / ‖g‖∞` by `phi0`. Later steps
    /// probe `phi1 * t_prev` and take the minimizer of the quadratic fit when
    /// it is convex and the probe decreased the value, or `phi2 * t_prev`
    /// otherwise.
    CgDescent { phi0: f64, phi1: f64, phi2: f64 },
}

impl Initializer {
    const IDS: &'static [&'static str] = &["unit", "linear", "quadratic", "cgdescent"];

    /// The CG-DESCENT initializer with its published parameters.
    #[must_use]
    pub fn cg_descent() -> Self {
        Self::CgDescent {
            phi0: 0.01,
            phi1: 0.1,
            phi2: 2.0,
        }
    }

    /// Every initializer, with default parameters.
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self::Unit, Self::Linear, Self::Quadratic, Self::cg_descent()]
    }

    /// The identifier used by [`FromStr`] and [`Display`](fmt::Display).
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::CgDescent { .. } => "cgdescent",
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if let Self::CgDescent { phi0, phi1, phi2 } = *self {
            check_open("phi0", phi0, 0.0, 1.0, "0 < phi0 < 1")?;
            check_open("phi1", phi1, 0.0, 1.0, "0 < phi1 < 1")?;
            check_open("phi2", phi2, 1.0, f64::INFINITY, "phi2 > 1")?;
        }
        Ok(())
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Initializer {
    type Err = UnknownId;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|init| init.id() == id)
            .ok_or_else(|| UnknownId::new("initializer", id, Self::IDS))
    }
}

/// An initializer together with what it remembers between searches.
#[derive(Debug, Clone)]
pub(super) struct Initial {
    kind: Initializer,
    iteration: usize,
    prev_f: f64,
    prev_dg: f64,
}

impl Initial {
    pub(super) fn new(kind: Initializer) -> Self {
        Self {
            kind,
            iteration: 0,
            prev_f: f64::NAN,
            prev_dg: f64::NAN,
        }
    }

    /// Proposes the raw first trial step from `state`.
    ///
    /// The CG-DESCENT rule may evaluate the objective once; that evaluation
    /// is counted in `state.fcalls`.
    pub(super) fn propose<F: Function + ?Sized>(&mut self, function: &F, state: &mut Iterate) -> f64 {
        let dg = state.dg();

        let t0 = match self.kind {
            Initializer::CgDescent { phi0, .. } if self.iteration == 0 => {
                first_cg_descent(state, phi0)
            }
            Initializer::CgDescent { phi1, phi2, .. } => {
                quadratic_probe(function, state, dg, phi1, phi2)
            }
            _ if self.iteration == 0 => 1.0,
            Initializer::Unit => 1.0,
            Initializer::Linear => state.t * self.prev_dg / dg,
            Initializer::Quadratic => 1.01 * 2.0 * (state.f - self.prev_f) / dg,
        };

        self.iteration += 1;
        self.prev_f = state.f;
        self.prev_dg = dg;

        t0
    }
}

fn first_cg_descent(state: &Iterate, phi0: f64) -> f64 {
    let xnorm = state.x.amax();
    if xnorm > 0.0 {
        return phi0 * xnorm / state.g.amax();
    }
    if state.f != 0.0 {
        return phi0 * state.f.abs() / state.g.norm_squared();
    }
    1.0
}

fn quadratic_probe<F: Function + ?Sized>(
    function: &F,
    state: &mut Iterate,
    dg: f64,
    phi1: f64,
    phi2: f64,
) -> f64 {
    let t_prev = state.t;
    let probe = phi1 * t_prev;

    let x = &state.x + &state.d * probe;
    let f = function.value(&x);
    state.fcalls += 1;

    let here = Step::new(0.0, state.f, dg);
    let there = Step::new(probe, f, f64::NAN);
    let (t, convex) = Step::quadratic_minimizer(&here, &there);

    if f < state.f && convex && t.is_finite() && t > 0.0 {
        t
    } else {
        phi2 * t_prev
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use descent_core::functions::Sphere;
    use nalgebra::DVector;

    use super::*;

    /// A sphere iterate at `x` heading along `-g`, as if reached with step `t`.
    fn iterate(x: Vec<f64>, t: f64) -> Iterate {
        let mut state = Iterate::new(&Sphere::new(x.len()), DVector::from_vec(x));
        state.d = -state.g.clone();
        state.t = t;
        state
    }

    #[test]
    fn first_iteration_proposes_one() {
        let sphere = Sphere::new(1);
        for kind in [Initializer::Unit, Initializer::Linear, Initializer::Quadratic] {
            let mut state = iterate(vec![3.0], 0.0);
            assert_relative_eq!(Initial::new(kind).propose(&sphere, &mut state), 1.0);
        }
    }

    #[test]
    fn linear_and_quadratic_use_history() {
        let sphere = Sphere::new(1);

        // f = 9, dg = -36
        let mut first = iterate(vec![3.0], 0.0);
        // f = 1, dg = -4
        let mut second = iterate(vec![1.0], 0.25);

        let mut linear = Initial::new(Initializer::Linear);
        linear.propose(&sphere, &mut first);
        assert_relative_eq!(linear.propose(&sphere, &mut second), 0.25 * -36.0 / -4.0);

        let mut quadratic = Initial::new(Initializer::Quadratic);
        quadratic.propose(&sphere, &mut first);
        assert_relative_eq!(
            quadratic.propose(&sphere, &mut second),
            1.01 * 2.0 * (1.0 - 9.0) / -4.0
        );
    }

    #[test]
    fn cg_descent_scales_the_first_step() {
        let sphere = Sphere::new(2);
        let mut init = Initial::new(Initializer::cg_descent());

        // ‖x‖∞ = 2, ‖g‖∞ = 4
        let mut state = iterate(vec![1.0, -2.0], 0.0);
        assert_relative_eq!(init.propose(&sphere, &mut state), 0.01 * 2.0 / 4.0);
        assert_eq!(state.fcalls, 1);
    }

    #[test]
    fn cg_descent_falls_back_to_value_scaling_at_the_origin() {
        struct Tilted;

        impl Function for Tilted {
            fn size(&self) -> usize {
                1
            }

            fn value(&self, x: &DVector<f64>) -> f64 {
                x[0] * x[0] + 2.0 * x[0] + 3.0
            }

            fn value_and_gradient(&self, x: &DVector<f64>, g: &mut DVector<f64>) -> f64 {
                g[0] = 2.0 * x[0] + 2.0;
                self.value(x)
            }
        }

        let mut state = Iterate::new(&Tilted, DVector::zeros(1));
        state.d = -state.g.clone();

        let mut init = Initial::new(Initializer::cg_descent());
        assert_relative_eq!(init.propose(&Tilted, &mut state), 0.01 * 3.0 / 4.0);
    }

    #[test]
    fn cg_descent_probe_finds_the_exact_minimizer_of_a_quadratic() {
        let sphere = Sphere::new(1);
        let mut init = Initial::new(Initializer::cg_descent());

        let mut first = iterate(vec![3.0], 0.0);
        init.propose(&sphere, &mut first);

        // Along d = -2x the sphere is minimized at t = 0.5.
        let mut second = iterate(vec![1.0], 0.2);
        let t0 = init.propose(&sphere, &mut second);

        assert_relative_eq!(t0, 0.5, epsilon = 1e-12);
        assert_eq!(second.fcalls, 2);
    }

    #[test]
    fn parses_identifiers() {
        for init in Initializer::all() {
            assert_eq!(init.to_string().parse::<Initializer>(), Ok(init));
        }

        let error = "steepest".parse::<Initializer>().unwrap_err();
        assert_eq!(error.id, "steepest");
        assert!(error.to_string().contains("cgdescent"));
    }
}
