use crate::Iterate;

/// A step length with the value and directional derivative evaluated there.
///
/// Steps are the bracket endpoints line searches reason about. The raw
/// interpolation helpers (`cubic_minimizer`, `quadratic_minimizer`,
/// `secant_root`) may extrapolate and may return non-finite values; the
/// bracket-safe forms (`cubic`, `secant`, `bisect`) only ever return a
/// candidate strictly between the two steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The step length.
    pub t: f64,

    /// The objective value at `t`.
    pub f: f64,

    /// The directional derivative at `t`.
    pub dg: f64,
}

impl Step {
    /// Creates a new step.
    #[must_use]
    pub fn new(t: f64, f: f64, dg: f64) -> Self {
        Self { t, f, dg }
    }

    /// The start of a line search from `iterate`, at `t = 0`.
    ///
    /// `iterate.t` is the step that produced the iterate, not a point on the
    /// line being searched.
    #[must_use]
    pub fn origin(iterate: &Iterate) -> Self {
        Self::new(0.0, iterate.f, iterate.dg())
    }

    /// Minimizer of the cubic interpolating both values and derivatives.
    ///
    /// The discriminant is scaled by the largest slope, as in MINPACK's
    /// `dcstep`, so steep ends do not overflow it.
    #[must_use]
    pub fn cubic_minimizer(u: &Step, v: &Step) -> f64 {
        let d1 = u.dg + v.dg - 3.0 * (u.f - v.f) / (u.t - v.t);
        let s = d1.abs().max(u.dg.abs()).max(v.dg.abs());
        let d2 = (v.t - u.t).signum() * s * ((d1 / s).powi(2) - (u.dg / s) * (v.dg / s)).sqrt();
        v.t - (v.t - u.t) * (v.dg + d2 - d1) / (v.dg - u.dg + 2.0 * d2)
    }

    /// Minimizer of the quadratic through `u.f`, `u.dg` and `v.f`.
    ///
    /// The flag reports whether the fitted quadratic is convex.
    #[must_use]
    pub fn quadratic_minimizer(u: &Step, v: &Step) -> (f64, bool) {
        let dt = u.t - v.t;
        let df = u.f - v.f;
        let convex = (u.dg - df / dt) * dt > 0.0;
        (u.t - u.dg * dt * dt / (2.0 * (u.dg * dt - df)), convex)
    }

    /// Root of the linear interpolant of the two derivatives.
    #[must_use]
    pub fn secant_root(u: &Step, v: &Step) -> f64 {
        (v.t * u.dg - u.t * v.dg) / (u.dg - v.dg)
    }

    /// Cubic minimizer, if usable inside the bracket.
    #[must_use]
    pub fn cubic(u: &Step, v: &Step) -> Option<f64> {
        inside(Self::cubic_minimizer(u, v), u, v)
    }

    /// Secant root, if usable inside the bracket.
    #[must_use]
    pub fn secant(u: &Step, v: &Step) -> Option<f64> {
        inside(Self::secant_root(u, v), u, v)
    }

    /// Midpoint, if it is distinct from both ends.
    #[must_use]
    pub fn bisect(u: &Step, v: &Step) -> Option<f64> {
        inside(0.5 * (u.t + v.t), u, v)
    }

    /// Picks a new trial inside the bracket, trying cubic, then secant, then
    /// bisection.
    ///
    /// Falls back to the raw midpoint for degenerate brackets.
    #[must_use]
    pub fn interpolate(u: &Step, v: &Step) -> f64 {
        Self::cubic(u, v)
            .or_else(|| Self::secant(u, v))
            .or_else(|| Self::bisect(u, v))
            .unwrap_or(0.5 * (u.t + v.t))
    }
}

impl From<&Iterate> for Step {
    fn from(iterate: &Iterate) -> Self {
        Self::new(iterate.t, iterate.f, iterate.dg())
    }
}

fn inside(t: f64, u: &Step, v: &Step) -> Option<f64> {
    let lo = u.t.min(v.t);
    let hi = u.t.max(v.t);
    (t.is_finite() && lo < t && t < hi).then_some(t)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use descent_core::functions::Sphere;
    use nalgebra::DVector;
    use proptest::prelude::*;

    use super::*;

    /// Samples `phi(t) = 2 (t - 0.3)² + 1`.
    fn parabola(t: f64) -> Step {
        Step::new(t, 2.0 * (t - 0.3).powi(2) + 1.0, 4.0 * (t - 0.3))
    }

    /// Samples `phi(t) = t³ - 2t`, with a local minimum at `sqrt(2/3)`.
    fn cubic(t: f64) -> Step {
        Step::new(t, t.powi(3) - 2.0 * t, 3.0 * t * t - 2.0)
    }

    #[test]
    fn interpolants_are_exact_on_a_parabola() {
        let u = parabola(0.0);
        let v = parabola(1.0);

        assert_relative_eq!(Step::cubic_minimizer(&u, &v), 0.3, epsilon = 1e-12);
        assert_relative_eq!(Step::secant_root(&u, &v), 0.3, epsilon = 1e-12);

        let (t, convex) = Step::quadratic_minimizer(&u, &v);
        assert!(convex);
        assert_relative_eq!(t, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn cubic_minimizer_is_exact_on_a_cubic() {
        let u = cubic(0.0);
        let v = cubic(2.0);

        assert_relative_eq!(
            Step::cubic_minimizer(&u, &v),
            (2.0_f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn cubic_minimizer_survives_steep_slopes() {
        // Unscaled, the discriminant 1e400 overflows.
        let u = Step::new(0.0, 0.0, -1e200);
        let v = Step::new(1.0, 0.0, 1e200);

        assert_relative_eq!(Step::cubic_minimizer(&u, &v), 0.5);
        assert_eq!(Step::cubic(&u, &v), Some(0.5));
    }

    #[test]
    fn origin_sits_at_zero() {
        let sphere = Sphere::new(1);
        let mut iterate = Iterate::new(&sphere, DVector::from_vec(vec![3.0]));
        iterate.d = -iterate.g.clone();
        iterate.t = 0.75;

        assert_eq!(Step::origin(&iterate), Step::new(0.0, 9.0, -36.0));
        assert_eq!(Step::from(&iterate).t, 0.75);
    }

    #[test]
    fn concave_quadratic_is_flagged() {
        let u = Step::new(0.0, 0.0, -1.0);
        let v = Step::new(1.0, -2.0, f64::NAN);

        let (_, convex) = Step::quadratic_minimizer(&u, &v);
        assert!(!convex);
    }

    #[test]
    fn extrapolation_is_not_usable_inside_the_bracket() {
        // Both ends are still descending, so every model points beyond `v`.
        let u = parabola(0.0);
        let v = parabola(0.1);

        assert!(Step::cubic_minimizer(&u, &v) > v.t);
        assert_eq!(Step::cubic(&u, &v), None);
        assert_eq!(Step::secant(&u, &v), None);
        assert_relative_eq!(Step::interpolate(&u, &v), 0.05);
    }

    #[test]
    fn interpolate_prefers_the_cubic() {
        let u = cubic(0.0);
        let v = cubic(2.0);

        assert_relative_eq!(
            Step::interpolate(&u, &v),
            (2.0_f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn degenerate_bracket_falls_back_to_midpoint() {
        let u = parabola(0.5);

        assert_eq!(Step::bisect(&u, &u), None);
        assert_relative_eq!(Step::interpolate(&u, &u), 0.5);
    }

    fn finite() -> impl Strategy<Value = f64> {
        -1e3..1e3_f64
    }

    proptest! {
        #[test]
        fn bracket_safe_candidates_stay_inside(
            lo in finite(),
            width in 1e-9..1e3_f64,
            (fu, gu, fv, gv) in (finite(), finite(), finite(), finite()),
        ) {
            let u = Step::new(lo, fu, gu);
            let v = Step::new(lo + width, fv, gv);

            for candidate in [
                Step::cubic(&u, &v),
                Step::secant(&u, &v),
                Step::bisect(&u, &v),
                Step::cubic(&v, &u),
                Step::secant(&v, &u),
            ]
            .into_iter()
            .flatten()
            {
                prop_assert!(u.t < candidate && candidate < v.t);
            }

            let t = Step::interpolate(&u, &v);
            prop_assert!(u.t <= t && t <= v.t);
        }
    }
}
