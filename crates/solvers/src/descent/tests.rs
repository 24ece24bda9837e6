use approx::assert_relative_eq;
use descent_core::Function;
use descent_core::functions::{Quadratic, Rosenbrock, Sphere, Trid};
use nalgebra::{DMatrix, DVector};

use crate::line_search::{self, Initializer, Strategy};
use crate::{Action, Event, Iterate, Status};

use super::{Beta, Config, Error, HessianUpdate, Method, minimize, minimize_unobserved};

/// Runs a solve and collects the iterates reported after each iteration.
fn trajectory<F: Function>(function: &F, x0: Vec<f64>, config: &Config) -> (Iterate, Vec<Iterate>) {
    let mut iterates = Vec::new();
    let observer = |event: &Event<'_>| -> Option<Action> {
        if let Event::Iteration { iterate } = event {
            iterates.push((*iterate).clone());
        }
        None
    };

    let solution = minimize(function, DVector::from_vec(x0), config, observer).expect("valid x0");
    (solution, iterates)
}

fn assert_non_increasing(iterates: &[Iterate]) {
    for pair in iterates.windows(2) {
        assert!(pair[1].f <= pair[0].f, "{} rose to {}", pair[0].f, pair[1].f);
    }
}

#[test]
fn gradient_descent_backtracks_onto_the_minimum() {
    let line_search = line_search::Config::new(
        Initializer::Unit,
        Strategy::Backtrack { ro: 0.5 },
        0.1,
        0.9,
    )
    .expect("valid line search");
    let config = Config::new(Method::GradientDescent, line_search, 100, 1e-6).expect("valid");

    let (solution, iterates) = trajectory(&Sphere::new(1), vec![3.0], &config);

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iterations, 1);
    assert_relative_eq!(solution.t, 0.5);
    assert_relative_eq!(solution.x[0], 0.0);
    assert_eq!(solution.fcalls, 3);

    let values: Vec<f64> = iterates.iter().map(|iterate| iterate.f).collect();
    assert_eq!(values, vec![9.0, 0.0]);
    assert_eq!(iterates.last(), Some(&solution));
}

#[test]
fn every_method_minimizes_a_convex_quadratic() {
    let trid = Trid::new(5);

    for method in Method::all() {
        let config = Config::for_method(method).expect("valid");
        let (solution, iterates) = trajectory(&trid, vec![0.0; 5], &config);

        assert_eq!(solution.status, Status::Converged, "{method}");
        assert_relative_eq!(solution.x, trid.minimizer(), epsilon = 1e-3);
        assert_relative_eq!(solution.f, -30.0, epsilon = 1e-6);
        assert_non_increasing(&iterates);
    }
}

#[test]
fn curvature_methods_solve_rosenbrock() {
    let rosenbrock = Rosenbrock::new(2);

    for method in [
        Method::lbfgs(),
        Method::quasi_newton(HessianUpdate::Bfgs),
        Method::conjugate_gradient(Beta::PolakRibiere),
        Method::conjugate_gradient(Beta::HagerZhang),
    ] {
        let config = Config::for_method(method).expect("valid");
        let (solution, iterates) = trajectory(&rosenbrock, vec![-1.2, 1.0], &config);

        assert_eq!(solution.status, Status::Converged, "{method}");
        assert_relative_eq!(solution.x, DVector::from_vec(vec![1.0, 1.0]), epsilon = 1e-4);
        assert_non_increasing(&iterates);
    }
}

#[test]
fn lbfgs_reaches_a_tight_tolerance_with_every_wolfe_search() {
    let rosenbrock = Rosenbrock::new(4);
    let x0 = vec![-1.2, 1.0, -1.2, 1.0];

    let default = Method::lbfgs().line_search();
    let mut line_searches = vec![default];
    for strategy in [
        Strategy::lemarechal(),
        Strategy::nocedal_wright(),
        Strategy::more_thuente(),
        Strategy::cg_descent(),
    ] {
        line_searches.push(line_search::Config {
            strategy,
            ..default
        });
    }

    for line_search in line_searches {
        let config = Config::new(Method::lbfgs(), line_search, 1000, 1e-10).expect("valid");
        let (solution, iterates) = trajectory(&rosenbrock, x0.clone(), &config);

        assert_eq!(solution.status, Status::Converged, "{}", line_search.strategy);
        assert!(solution.convergence_criterion() < 1e-10);
        assert_non_increasing(&iterates);
    }
}

#[test]
fn lbfgs_terminates_on_a_quadratic_with_exact_line_searches() {
    let a = DMatrix::from_row_slice(
        4,
        4,
        &[
            4.0, 1.0, 0.0, 0.0, //
            1.0, 3.0, 1.0, 0.0, //
            0.0, 1.0, 2.0, 0.5, //
            0.0, 0.0, 0.5, 1.5,
        ],
    );
    let b = DVector::from_vec(vec![1.0, -2.0, 0.5, 1.0]);
    let quadratic = Quadratic::new(a, b);

    let line_search =
        line_search::Config::new(Initializer::Unit, Strategy::more_thuente(), 1e-8, 1e-6)
            .expect("valid line search");
    let config = Config::new(Method::lbfgs(), line_search, 100, 1e-8).expect("valid");

    let solution = minimize_unobserved(&quadratic, DVector::zeros(4), &config).expect("valid x0");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.iterations <= 5, "took {} iterations", solution.iterations);
    let minimizer = quadratic.minimizer().expect("positive definite");
    assert_relative_eq!(solution.x, minimizer, epsilon = 1e-6);
}

#[test]
fn every_line_search_drives_lbfgs() {
    let trid = Trid::new(5);

    for initializer in Initializer::all() {
        for strategy in Strategy::all() {
            let line_search =
                line_search::Config::new(initializer, strategy, 1e-4, 0.9).expect("valid");
            let config = Config::default().with_line_search(line_search);

            let (solution, iterates) = trajectory(&trid, vec![0.0; 5], &config);

            assert_eq!(solution.status, Status::Converged, "{initializer} + {strategy}");
            assert_relative_eq!(solution.x, trid.minimizer(), epsilon = 1e-3);
            assert_non_increasing(&iterates);
        }
    }
}

#[test]
fn observer_can_stop_the_solve() {
    let observer = |event: &Event<'_>| match event {
        Event::Iteration { iterate } if iterate.iterations == 2 => Some(Action::StopEarly),
        _ => None,
    };

    let solution = minimize(
        &Rosenbrock::new(2),
        DVector::from_vec(vec![-1.2, 1.0]),
        &Config::default(),
        observer,
    )
    .expect("valid x0");

    assert_eq!(solution.status, Status::MaxIterations);
    assert_eq!(solution.iterations, 2);
}

#[test]
fn trials_are_reported_but_cannot_stop_the_solve() {
    let mut trials = 0;
    let observer = |event: &Event<'_>| {
        if event.is_trial() {
            trials += 1;
            Some(Action::StopEarly)
        } else {
            None
        }
    };

    let solution = minimize(
        &Rosenbrock::new(2),
        DVector::from_vec(vec![-1.2, 1.0]),
        &Config::default(),
        observer,
    )
    .expect("valid x0");

    assert_eq!(solution.status, Status::Converged);
    // The unit initializer never probes, so every other evaluation is a trial.
    assert_eq!(trials, solution.fcalls - 1);
}

#[test]
fn iteration_budget_is_respected() {
    let config = Config::new(Method::lbfgs(), Method::lbfgs().line_search(), 3, 1e-6)
        .expect("valid");

    let (solution, iterates) = trajectory(&Rosenbrock::new(2), vec![-1.2, 1.0], &config);

    assert_eq!(solution.status, Status::MaxIterations);
    assert_eq!(solution.iterations, 3);
    assert_eq!(iterates.len(), 4);
}

#[test]
fn evaluation_budget_is_respected() {
    let config = Config::default().with_max_evaluations(10);

    let (solution, iterates) = trajectory(&Rosenbrock::new(2), vec![-1.2, 1.0], &config);

    assert_eq!(solution.status, Status::MaxIterations);
    assert!(solution.fcalls >= 10);
    let before_last = &iterates[iterates.len() - 2];
    assert!(before_last.fcalls < 10);
}

#[test]
fn invalid_line_search_fails_without_evaluating() {
    let line_search = line_search::Config {
        c1: 0.6,
        ..line_search::Config::default()
    };
    let config = Config::default().with_line_search(line_search);

    let solution =
        minimize_unobserved(&Sphere::new(2), DVector::from_vec(vec![1.0, 2.0]), &config)
            .expect("valid x0");

    assert_eq!(solution.status, Status::Failed);
    assert_eq!(solution.fcalls, 1);
    assert_eq!(solution.x, DVector::from_vec(vec![1.0, 2.0]));
}

#[test]
fn dimension_mismatch_is_an_error() {
    let result = minimize_unobserved(&Sphere::new(3), DVector::zeros(2), &Config::default());

    assert_eq!(
        result,
        Err(Error::DimensionMismatch {
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn converged_start_reports_once() {
    let (solution, iterates) = trajectory(&Sphere::new(2), vec![0.0, 0.0], &Config::default());

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iterations, 0);
    assert_eq!(solution.fcalls, 1);
    assert_eq!(iterates.len(), 1);
}

#[test]
fn non_finite_start_fails() {
    let (solution, iterates) = trajectory(&Sphere::new(2), vec![f64::NAN, 0.0], &Config::default());

    assert_eq!(solution.status, Status::Failed);
    assert_eq!(solution.iterations, 0);
    assert_eq!(iterates.len(), 1);
}

#[test]
fn solves_are_repeatable() {
    let rosenbrock = Rosenbrock::new(2);

    for method in Method::all() {
        let config = Config::for_method(method).expect("valid");
        let first = trajectory(&rosenbrock, vec![-1.2, 1.0], &config);
        let second = trajectory(&rosenbrock, vec![-1.2, 1.0], &config);

        assert_eq!(first, second, "{method}");
    }
}
