use descent_core::{Function, Observer};
use log::debug;
use nalgebra::DVector;

use crate::line_search::LineSearch;
use crate::{Action, Event, Iterate, Status};

use super::{Config, Error, direction::Direction};

/// Core descent loop shared by every [`Method`](super::Method).
pub(super) fn search<F, Obs>(
    function: &F,
    x0: DVector<f64>,
    config: &Config,
    mut observer: Obs,
) -> Result<Iterate, Error>
where
    F: Function + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let expected = function.size();
    if x0.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            found: x0.len(),
        });
    }

    let mut state = Iterate::new(function, x0);
    let mut line_search = LineSearch::new(*config.line_search());
    let mut direction = Direction::new(&config.method(), expected);

    state.status = status(&state, config, true);
    if report(&mut observer, &mut state) {
        return Ok(state);
    }

    loop {
        direction.compute(&mut state);
        let previous = state.clone();

        let found = line_search.search(function, &mut state, &mut observer);
        state.iterations += 1;
        state.status = status(&state, config, found);

        debug!(
            "{} iteration {}: f = {:.6e}, criterion = {:.3e}, t = {:.3e}, fcalls = {}, gcalls = {}",
            config.method(),
            state.iterations,
            state.f,
            state.convergence_criterion(),
            state.t,
            state.fcalls,
            state.gcalls,
        );

        if report(&mut observer, &mut state) {
            return Ok(state);
        }

        direction.update(&previous, &state);
    }
}

/// Classifies `state` after a line search that did or did not succeed.
fn status(state: &Iterate, config: &Config, found: bool) -> Status {
    if !found || !state.is_valid() {
        Status::Failed
    } else if state.converged(config.epsilon()) {
        Status::Converged
    } else if state.iterations >= config.max_iterations()
        || state.fcalls >= config.max_evaluations()
    {
        Status::MaxIterations
    } else {
        Status::Running
    }
}

/// Emits the iteration event and returns `true` if the solve is over.
///
/// A request to stop early ends a running solve with
/// [`Status::MaxIterations`].
fn report<Obs>(observer: &mut Obs, state: &mut Iterate) -> bool
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let action = observer.observe(&Event::Iteration { iterate: state });

    if state.status != Status::Running {
        return true;
    }
    if let Some(Action::StopEarly) = action {
        debug!("observer stopped the solve after {} iterations", state.iterations);
        state.status = Status::MaxIterations;
        return true;
    }
    false
}
