use std::fmt;
use std::str::FromStr;

use crate::{Iterate, UnknownId};

use super::config::{ConfigError, check_open};
use super::{Config, Trials, backtrack, cg_descent, lemarechal, more_thuente, nocedal_wright};

/// Line-search strategies.
///
/// Every strategy starts from the initializer's step and only accepts a
/// trial that satisfies the Armijo condition, plus the curvature condition
/// noted below.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Shrink the step by `ro` until the Armijo condition holds.
    Backtrack { ro: f64 },

    /// Lemarechal's bracketing search for the (weak) Wolfe conditions.
    ///
    /// Extrapolates by `tau1` until an upper bound is found, then
    /// interpolates, staying a `safeguard` fraction away from both ends.
    Lemarechal { tau1: f64, safeguard: f64 },

    /// The bracket-and-zoom search of Nocedal and Wright for the strong
    /// Wolfe conditions.
    ///
    /// Extrapolates by `tau1`; zoom trials stay a `tau2` fraction away from
    /// both ends of the bracket.
    NocedalWright { tau1: f64, tau2: f64 },

    /// More and Thuente's search for the strong Wolfe conditions.
    ///
    /// `delta` bounds extrapolation inside a bracket.
    MoreThuente { delta: f64 },

    /// Hager and Zhang's CG-DESCENT search for the Wolfe or approximate Wolfe
    /// conditions.
    CgDescent {
        epsilon: f64,
        theta: f64,
        gamma: f64,
        delta: f64,
        omega: f64,
        ro: f64,
    },
}

impl Strategy {
    const IDS: &'static [&'static str] = &[
        "backtrack",
        "lemarechal",
        "nocedalwright",
        "morethuente",
        "cgdescent",
    ];

    /// Backtracking that halves the step.
    #[must_use]
    pub fn backtrack() -> Self {
        Self::Backtrack { ro: 0.5 }
    }

    /// Lemarechal's search with default parameters.
    #[must_use]
    pub fn lemarechal() -> Self {
        Self::Lemarechal {
            tau1: 3.0,
            safeguard: 0.1,
        }
    }

    /// Nocedal–Wright bracket-and-zoom with default parameters.
    #[must_use]
    pub fn nocedal_wright() -> Self {
        Self::NocedalWright {
            tau1: 3.0,
            tau2: 0.1,
        }
    }

    /// More–Thuente with default parameters.
    #[must_use]
    pub fn more_thuente() -> Self {
        Self::MoreThuente { delta: 0.66 }
    }

    /// CG-DESCENT with its published parameters.
    #[must_use]
    pub fn cg_descent() -> Self {
        Self::CgDescent {
            epsilon: 1e-6,
            theta: 0.5,
            gamma: 0.66,
            delta: 0.7,
            omega: 1e-3,
            ro: 5.0,
        }
    }

    /// Every strategy, with default parameters.
    #[must_use]
    pub fn all() -> [Self; 5] {
        [
            Self::backtrack(),
            Self::lemarechal(),
            Self::nocedal_wright(),
            Self::more_thuente(),
            Self::cg_descent(),
        ]
    }

    /// The identifier used by [`FromStr`] and [`Display`](fmt::Display).
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Backtrack { .. } => "backtrack",
            Self::Lemarechal { .. } => "lemarechal",
            Self::NocedalWright { .. } => "nocedalwright",
            Self::MoreThuente { .. } => "morethuente",
            Self::CgDescent { .. } => "cgdescent",
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Backtrack { ro } => check_open("ro", ro, 0.0, 1.0, "0 < ro < 1"),
            Self::Lemarechal { tau1, safeguard } => {
                check_open("tau1", tau1, 1.0, f64::INFINITY, "tau1 > 1")?;
                check_open("safeguard", safeguard, 0.0, 0.5, "0 < safeguard < 0.5")
            }
            Self::NocedalWright { tau1, tau2 } => {
                check_open("tau1", tau1, 1.0, f64::INFINITY, "tau1 > 1")?;
                check_open("tau2", tau2, 0.0, 0.5, "0 < tau2 < 0.5")
            }
            Self::MoreThuente { delta } => check_open("delta", delta, 0.0, 1.0, "0 < delta < 1"),
            Self::CgDescent {
                epsilon,
                theta,
                gamma,
                delta,
                omega,
                ro,
            } => {
                check_open("epsilon", epsilon, 0.0, f64::INFINITY, "epsilon > 0")?;
                check_open("theta", theta, 0.0, 1.0, "0 < theta < 1")?;
                check_open("gamma", gamma, 0.0, 1.0, "0 < gamma < 1")?;
                check_open("delta", delta, 0.0, 1.0, "0 < delta < 1")?;
                check_open("omega", omega, 0.0, 1.0, "0 < omega < 1")?;
                check_open("ro", ro, 1.0, f64::INFINITY, "ro > 1")
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Strategy {
    type Err = UnknownId;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|strategy| strategy.id() == id)
            .ok_or_else(|| UnknownId::new("strategy", id, Self::IDS))
    }
}

/// A strategy together with what it carries from one search to the next.
#[derive(Debug, Clone)]
pub(super) struct Searcher {
    strategy: Strategy,
    memory: cg_descent::Memory,
}

impl Searcher {
    pub(super) fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            memory: cg_descent::Memory::default(),
        }
    }

    pub(super) fn search(
        &mut self,
        config: &Config,
        trials: &mut Trials<'_>,
        t0: f64,
        state: &mut Iterate,
    ) -> bool {
        match self.strategy {
            Strategy::Backtrack { ro } => backtrack::search(ro, config, trials, t0, state),
            Strategy::Lemarechal { tau1, safeguard } => {
                lemarechal::search(tau1, safeguard, config, trials, t0, state)
            }
            Strategy::NocedalWright { tau1, tau2 } => {
                nocedal_wright::search(tau1, tau2, config, trials, t0, state)
            }
            Strategy::MoreThuente { delta } => {
                more_thuente::search(delta, config, trials, t0, state)
            }
            Strategy::CgDescent {
                epsilon,
                theta,
                gamma,
                delta,
                omega,
                ro,
            } => {
                let params = cg_descent::Params {
                    epsilon,
                    theta,
                    gamma,
                    delta,
                    omega,
                    ro,
                };
                cg_descent::search(&params, &mut self.memory, config, trials, t0, state)
            }
        }
    }
}
