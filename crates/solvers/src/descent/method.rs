use std::fmt;
use std::str::FromStr;

use crate::UnknownId;
use crate::line_search::{self, Initializer, Strategy};

use super::{Beta, HessianInit, HessianUpdate};

/// How the search direction is generated from the current gradient and the
/// history of the solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Steepest descent, `d = -g`.
    GradientDescent,

    /// Nonlinear conjugate gradient, `d = -g + beta d_prev`.
    ///
    /// Restarts with `-g` when two consecutive gradients are far from
    /// orthogonal, `|g·g_prev| >= orthotest g·g`.
    ConjugateGradient { beta: Beta, orthotest: f64 },

    /// Dense quasi-Newton, `d = -H g` with `H` approximating the inverse
    /// Hessian.
    QuasiNewton {
        update: HessianUpdate,
        init: HessianInit,
    },

    /// Limited-memory BFGS keeping the last `history` curvature pairs.
    Lbfgs { history: usize },
}

impl Method {
    const IDS: &'static [&'static str] = &[
        "gd", "cgd", "cgd-fr", "cgd-pr", "cgd-hs", "cgd-cd", "cgd-ls", "cgd-dy", "cgd-n",
        "cgd-dycd", "cgd-dyhs", "cgd-frpr", "dfp", "bfgs", "sr1", "broyden", "hoshino",
        "fletcher", "lbfgs",
    ];

    /// Conjugate gradient with the default orthogonality test.
    #[must_use]
    pub fn conjugate_gradient(beta: Beta) -> Self {
        Self::ConjugateGradient {
            beta,
            orthotest: 0.1,
        }
    }

    /// Dense quasi-Newton starting from the identity.
    #[must_use]
    pub fn quasi_newton(update: HessianUpdate) -> Self {
        Self::QuasiNewton {
            update,
            init: HessianInit::Identity,
        }
    }

    /// L-BFGS with six stored pairs.
    #[must_use]
    pub fn lbfgs() -> Self {
        Self::Lbfgs { history: 6 }
    }

    /// Every method, with default parameters.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut methods = vec![Self::GradientDescent];
        methods.extend(Beta::all().map(Self::conjugate_gradient));
        methods.extend(
            [
                HessianUpdate::Dfp,
                HessianUpdate::Bfgs,
                HessianUpdate::Sr1,
                HessianUpdate::Broyden { phi: 0.5 },
                HessianUpdate::Hoshino,
                HessianUpdate::Fletcher,
            ]
            .map(Self::quasi_newton),
        );
        methods.push(Self::lbfgs());
        methods
    }

    /// The identifier used by [`FromStr`] and [`Display`](fmt::Display).
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::GradientDescent => "gd".to_owned(),
            Self::ConjugateGradient { beta, .. } => format!("cgd-{}", beta.id()),
            Self::QuasiNewton { update, .. } => update.id().to_owned(),
            Self::Lbfgs { .. } => "lbfgs".to_owned(),
        }
    }

    /// The line-search settings this method works best with.
    ///
    /// Conjugate gradient and steepest descent need accurate steps and start
    /// from the quadratic guess. Quasi-Newton directions are well scaled, so
    /// the unit step is tried first and a loose curvature test suffices.
    #[must_use]
    pub fn line_search(&self) -> line_search::Config {
        let (initializer, c2) = match self {
            Self::GradientDescent | Self::ConjugateGradient { .. } => (Initializer::Quadratic, 0.1),
            Self::QuasiNewton { .. } | Self::Lbfgs { .. } => (Initializer::Unit, 0.9),
        };

        line_search::Config {
            c2,
            initializer,
            strategy: Strategy::more_thuente(),
            ..line_search::Config::default()
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for Method {
    type Err = UnknownId;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        if id == "cgd" {
            return Ok(Self::conjugate_gradient(Beta::PolakRibiere));
        }

        Self::all()
            .into_iter()
            .find(|method| method.id() == id)
            .ok_or_else(|| UnknownId::new("method", id, Self::IDS))
    }
}
