use descent_core::Observer;
use descent_solvers::{Action, Event};
use log::{Level, log};

/// An observer that writes solver progress to the [`log`] facade.
///
/// Every iteration is logged at the chosen level. Line-search trials are
/// logged one level lower (`Trace` stays `Trace`) when enabled with
/// [`with_trials`](Self::with_trials). The observer never stops a solve.
///
/// # Example
///
/// ```rust
/// use descent_core::functions::Rosenbrock;
/// use descent_observers::LogObserver;
/// use descent_solvers::descent::{Config, minimize};
/// use nalgebra::DVector;
///
/// let x0 = DVector::from_vec(vec![-1.2, 1.0]);
/// let observer = LogObserver::new(log::Level::Info);
/// let solution = minimize(&Rosenbrock::new(2), x0, &Config::default(), observer)?;
/// assert!(solution.f < 1e-8);
/// # Ok::<(), descent_solvers::descent::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogObserver {
    level: Level,
    trials: bool,
}

impl LogObserver {
    /// Creates an observer that logs iterations at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            trials: false,
        }
    }

    /// Also logs every line-search trial.
    #[must_use]
    pub fn with_trials(self) -> Self {
        Self {
            trials: true,
            ..self
        }
    }

    /// Returns the level iterations are logged at.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    fn trial_level(&self) -> Level {
        match self.level {
            Level::Error => Level::Warn,
            Level::Warn => Level::Info,
            Level::Info => Level::Debug,
            Level::Debug | Level::Trace => Level::Trace,
        }
    }
}

impl Observer<Event<'_>, Action> for LogObserver {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        match *event {
            Event::Iteration { iterate } => {
                log!(
                    self.level,
                    "iteration {:>4} [{:?}]: f = {:.6e}, criterion = {:.3e}, t = {:.3e}, calls = {}/{}",
                    iterate.iterations,
                    iterate.status,
                    iterate.f,
                    iterate.convergence_criterion(),
                    iterate.t,
                    iterate.fcalls,
                    iterate.gcalls,
                );
            }
            Event::Trial { origin, trial } if self.trials => {
                log!(
                    self.trial_level(),
                    "  trial t = {:.6e}: f = {:.6e} (f0 = {:.6e}), dg = {:.6e} (dg0 = {:.6e})",
                    trial.t,
                    trial.f,
                    origin.f,
                    trial.dg(),
                    origin.dg(),
                );
            }
            Event::Trial { .. } => {}
        }
        None
    }
}

impl Observer<Event<'_>, Action> for &mut LogObserver {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        (**self).observe(event)
    }
}
