use std::fmt;

use nalgebra::{DMatrix, DVector};

/// SR1 skip threshold.
const SR1_R: f64 = 1e-8;

/// Update formulas for the dense inverse-Hessian approximation `H`.
///
/// Each update takes the step `s = x+ - x` and the gradient change
/// `y = g+ - g` and enforces the secant condition `H+ y = s`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HessianUpdate {
    /// Davidon–Fletcher–Powell.
    Dfp,

    /// Broyden–Fletcher–Goldfarb–Shanno.
    Bfgs,

    /// Symmetric rank one, skipped when its denominator is tiny.
    Sr1,

    /// The Broyden family `(1 - phi) DFP + phi BFGS`.
    Broyden { phi: f64 },

    /// The Broyden family member with `phi = s·y / (s·y + yᵀHy)`.
    Hoshino,

    /// Fletcher's switch between DFP, BFGS and SR1.
    Fletcher,
}

/// How `H` starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HessianInit {
    /// The identity.
    #[default]
    Identity,

    /// The identity, rescaled to `(s·y / y·y) I` after the first step.
    Scaled,
}

impl HessianUpdate {
    /// The identifier used in method ids.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Dfp => "dfp",
            Self::Bfgs => "bfgs",
            Self::Sr1 => "sr1",
            Self::Broyden { .. } => "broyden",
            Self::Hoshino => "hoshino",
            Self::Fletcher => "fletcher",
        }
    }

    /// Applies the update to `h` in place.
    pub(super) fn apply(&self, h: &mut DMatrix<f64>, s: &DVector<f64>, y: &DVector<f64>) {
        let hy = &*h * y;
        let sy = s.dot(y);
        let yhy = y.dot(&hy);

        match *self {
            Self::Dfp => *h = dfp(h, s, &hy, sy, yhy),
            Self::Bfgs => *h = bfgs(h, s, &hy, sy, yhy),
            Self::Sr1 => {
                let u = s - &hy;
                let denom = u.dot(y);
                if denom != 0.0 && denom.abs() >= SR1_R * s.norm() * u.norm() {
                    *h = sr1(h, &u, denom);
                }
            }
            Self::Broyden { phi } => *h = broyden(h, s, &hy, sy, yhy, phi),
            Self::Hoshino => *h = broyden(h, s, &hy, sy, yhy, sy / (sy + yhy)),
            Self::Fletcher => {
                let phi = sy / (sy - yhy);
                *h = if phi < 0.0 {
                    dfp(h, s, &hy, sy, yhy)
                } else if phi > 1.0 {
                    bfgs(h, s, &hy, sy, yhy)
                } else {
                    sr1(h, &(s - &hy), sy - yhy)
                };
            }
        }
    }
}

impl fmt::Display for HessianUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn dfp(h: &DMatrix<f64>, s: &DVector<f64>, hy: &DVector<f64>, sy: f64, yhy: f64) -> DMatrix<f64> {
    h + s * s.transpose() / sy - hy * hy.transpose() / yhy
}

fn bfgs(h: &DMatrix<f64>, s: &DVector<f64>, hy: &DVector<f64>, sy: f64, yhy: f64) -> DMatrix<f64> {
    let rho = 1.0 / sy;
    h - (s * hy.transpose() + hy * s.transpose()) * rho
        + s * s.transpose() * (rho * rho * yhy + rho)
}

fn sr1(h: &DMatrix<f64>, u: &DVector<f64>, uy: f64) -> DMatrix<f64> {
    h + u * u.transpose() / uy
}

fn broyden(
    h: &DMatrix<f64>,
    s: &DVector<f64>,
    hy: &DVector<f64>,
    sy: f64,
    yhy: f64,
    phi: f64,
) -> DMatrix<f64> {
    dfp(h, s, hy, sy, yhy) * (1.0 - phi) + bfgs(h, s, hy, sy, yhy) * phi
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pair() -> (DVector<f64>, DVector<f64>) {
        (
            DVector::from_vec(vec![0.5, -1.0, 0.25]),
            DVector::from_vec(vec![1.0, -1.5, 0.75]),
        )
    }

    fn start() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[2.0, 0.1, 0.0, 0.1, 1.0, 0.2, 0.0, 0.2, 1.5])
    }

    #[test]
    fn updates_satisfy_the_secant_condition() {
        let (s, y) = pair();

        for update in [
            HessianUpdate::Dfp,
            HessianUpdate::Bfgs,
            HessianUpdate::Sr1,
            HessianUpdate::Broyden { phi: 0.5 },
            HessianUpdate::Hoshino,
            HessianUpdate::Fletcher,
        ] {
            let mut h = start();
            update.apply(&mut h, &s, &y);

            assert_relative_eq!(&h * &y, s.clone(), epsilon = 1e-10);
            assert_relative_eq!(h.clone(), h.transpose(), epsilon = 1e-10);
        }
    }

    #[test]
    fn broyden_endpoints_are_dfp_and_bfgs() {
        let (s, y) = pair();

        for (phi, base) in [(0.0, HessianUpdate::Dfp), (1.0, HessianUpdate::Bfgs)] {
            let mut family = start();
            HessianUpdate::Broyden { phi }.apply(&mut family, &s, &y);

            let mut expected = start();
            base.apply(&mut expected, &s, &y);

            assert_relative_eq!(family, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn sr1_skips_a_vanishing_denominator() {
        // y = H⁻¹ s, so s - H y = 0.
        let s = DVector::from_vec(vec![1.0, 1.0]);
        let y = DVector::from_vec(vec![1.0, 1.0]);
        let mut h = DMatrix::identity(2, 2);

        HessianUpdate::Sr1.apply(&mut h, &s, &y);

        assert_eq!(h, DMatrix::identity(2, 2));
    }
}
