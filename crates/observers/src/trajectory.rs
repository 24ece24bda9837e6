use descent_core::Observer;
use descent_solvers::{Action, Event, Status};
use nalgebra::DVector;

/// One recorded iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// The outer iteration counter.
    pub iteration: usize,

    /// The iterate's position.
    pub x: DVector<f64>,

    /// The objective value at `x`.
    pub f: f64,

    /// The convergence criterion at `x`.
    pub criterion: f64,

    /// Objective evaluations spent so far.
    pub fcalls: usize,

    /// The solve status when the point was recorded.
    pub status: Status,
}

/// An observer that records the path a solve takes.
///
/// Records one [`Point`] per iteration event, starting with `x0`. Trial
/// events are skipped unless [`with_trials`](Self::with_trials) is set, in
/// which case each trial is also kept in [`trials`](Self::trials).
///
/// Pass `&mut Trajectory` to a solver to inspect the record afterwards.
///
/// # Example
///
/// ```rust
/// use descent_core::functions::Sphere;
/// use descent_observers::Trajectory;
/// use descent_solvers::descent::{Config, minimize};
/// use nalgebra::DVector;
///
/// let mut trajectory = Trajectory::new();
/// let x0 = DVector::from_vec(vec![1.0, 2.0]);
/// minimize(&Sphere::new(2), x0, &Config::default(), &mut trajectory)?;
///
/// assert_eq!(trajectory.points()[0].f, 5.0);
/// # Ok::<(), descent_solvers::descent::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Point>,
    trials: Option<Vec<Point>>,
}

impl Trajectory {
    /// Creates an empty trajectory that skips line-search trials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also records line-search trials.
    #[must_use]
    pub fn with_trials(self) -> Self {
        Self {
            trials: Some(Vec::new()),
            ..self
        }
    }

    /// Returns the recorded iterations.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the recorded trials, empty unless enabled.
    #[must_use]
    pub fn trials(&self) -> &[Point] {
        self.trials.as_deref().unwrap_or_default()
    }

    /// Returns the objective value of each recorded iteration.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.f).collect()
    }

    /// Returns the last recorded iteration.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.points.clear();
        if let Some(trials) = &mut self.trials {
            trials.clear();
        }
    }

    fn record(&mut self, event: &Event<'_>) {
        let iterate = event.iterate();
        let point = Point {
            iteration: iterate.iterations,
            x: iterate.x.clone(),
            f: iterate.f,
            criterion: iterate.convergence_criterion(),
            fcalls: iterate.fcalls,
            status: iterate.status,
        };

        match (event, &mut self.trials) {
            (Event::Iteration { .. }, _) => self.points.push(point),
            (Event::Trial { .. }, Some(trials)) => trials.push(point),
            (Event::Trial { .. }, None) => {}
        }
    }
}

impl Observer<Event<'_>, Action> for Trajectory {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        self.record(event);
        None
    }
}

/// Allows `&mut Trajectory` to be passed to solvers that take an observer by
/// value, so the record can be read after the solve completes.
impl Observer<Event<'_>, Action> for &mut Trajectory {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        self.record(event);
        None
    }
}
