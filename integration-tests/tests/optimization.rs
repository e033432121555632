use approx::assert_abs_diff_eq;
use ddn_core::Node;
use ddn_nodes::{Penalty, RobustAverage};
use ddn_observers::{History, StopBelow};
use ddn_solvers::optimization::gradient_descent::{self, Config, Status};
use integration_tests::{Average, gap_loss, mean_branches};
use ndarray::{Array1, Axis, concatenate, s};
use rand::{Rng, SeedableRng, rngs::StdRng};

const N: usize = 10;

fn starting_point(seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let x1 = Array1::from_shape_fn(N, |_| rng.gen_range(-1.0..1.0));
    let x2 = Array1::from_shape_fn(N, |_| rng.gen_range(2.0..4.0));
    concatenate![Axis(0), x1, x2]
}

#[test_log::test]
fn minimizing_the_gap_equalizes_half_means() {
    let network = gap_loss(N, Average::Mean).unwrap();
    let branches = mean_branches(N).unwrap();
    let mut history = History::new();

    let solution = gradient_descent::minimize(
        &network,
        starting_point(1),
        &Config::default(),
        &mut history,
    )
    .unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.objective <= solution.initial_objective);

    let upper = branches.upper.solve(solution.x.view()).unwrap().y[0];
    let lower = branches.lower.solve(solution.x.view()).unwrap().y[0];
    assert_abs_diff_eq!(upper, lower, epsilon = 1e-4);

    assert_eq!(history.len(), solution.iters);
    assert!(history.is_non_increasing());
}

#[test_log::test]
fn minimizing_the_robust_gap_equalizes_robust_averages() {
    let penalty = Penalty::PseudoHuber { alpha: 1.0 };
    let network = gap_loss(N, Average::Robust(penalty)).unwrap();
    let average = RobustAverage::new(N, penalty).unwrap();

    let mut x0 = starting_point(2);
    // One wild point per half; the robust averages barely notice.
    x0[0] = 50.0;
    x0[N] = -50.0;

    let solution =
        gradient_descent::minimize_unobserved(&network, x0, &Config::default()).unwrap();

    assert_ne!(solution.status, Status::MaxIters);
    assert!(solution.objective <= solution.initial_objective);

    let upper = average.solve(solution.x.slice(s![..N])).unwrap().y[0];
    let lower = average.solve(solution.x.slice(s![N..])).unwrap().y[0];
    assert_abs_diff_eq!(upper, lower, epsilon = 1e-4);
}

#[test]
fn robust_gap_survives_widely_spread_starts() {
    let network = gap_loss(N, Average::Robust(Penalty::PseudoHuber { alpha: 1.0 })).unwrap();
    let config = Config::new(200, 1e-10, 1e-14).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..10 {
        let x0 = Array1::from_shape_fn(2 * N, |_| rng.gen_range(-100.0..100.0));

        let solution = gradient_descent::minimize_unobserved(&network, x0, &config).unwrap();

        assert!(solution.objective <= solution.initial_objective);
    }
}

#[test]
fn observer_can_end_the_run_early() {
    let network = gap_loss(N, Average::Mean).unwrap();
    let x0 = starting_point(3);
    let initial = network.solve(x0.view()).unwrap().y[0];
    let threshold = initial / 100.0;

    let solution =
        gradient_descent::minimize(&network, x0, &Config::default(), StopBelow::new(threshold))
            .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(solution.objective < threshold);
    assert!(solution.iters > 1);
}

#[test]
fn final_loss_never_exceeds_initial_loss() {
    let config = Config::new(5, 0.0, 0.0).unwrap();

    for seed in 10..15 {
        let network = gap_loss(N, Average::Robust(Penalty::Welsch { alpha: 5.0 })).unwrap();

        let solution =
            gradient_descent::minimize_unobserved(&network, starting_point(seed), &config)
                .unwrap();

        assert!(solution.objective <= solution.initial_objective);
        assert!(solution.iters <= 5);
    }
}
