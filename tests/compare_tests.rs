#![recursion_limit = "2048"]

use noexcept_bench::{
    ComparisonAccumulator, Durations, Verdict, Winner, divide_by_positive,
    scenarios::{Scenario, ScenarioKind},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn scenario() -> Scenario {
    Scenario {
        kind: ScenarioKind::Recursive,
        name: "recursive function calls",
        n: 42,
        loopsize: 1000,
    }
}

#[test]
fn test_ratio_with_non_positive_denominator_is_finite() {
    for x in [0.0, 1e-300, 0.5, 1.0, 10.0, 1e300, f64::MAX] {
        for y in [0.0, -0.0, -1.0, -1e-300, f64::MIN, f64::NEG_INFINITY] {
            let ratio = divide_by_positive(x, y);
            assert!(ratio.is_finite(), "x={x} y={y}");
            assert!(ratio >= 0.0, "x={x} y={y}");
            let exact = x / f64::MIN_POSITIVE;
            if exact.is_finite() {
                assert_eq!(ratio, exact, "x={x} y={y}");
            } else {
                assert_eq!(ratio, f64::MAX, "x={x} y={y}");
            }
        }
    }
}

#[test]
fn test_ratio_of_ten_over_zero_is_large_and_finite() {
    let ratio = divide_by_positive(10.0, 0.0);
    assert!(ratio.is_finite());
    assert!(!ratio.is_nan());
    assert!(ratio > 1e300);
}

#[test]
fn test_ratio_with_positive_denominator_divides() {
    assert_eq!(divide_by_positive(6.0, 3.0), 2.0);
    assert_eq!(divide_by_positive(0.0, 3.0), 0.0);
}

#[test]
fn test_win_counts_and_ties_sum_to_iterations() {
    let mut rng = StdRng::seed_from_u64(0xC0117);
    for k in 0..50usize {
        let mut acc = ComparisonAccumulator::new();
        for _ in 0..k {
            let no_throw = f64::from(rng.gen_range(0u8..4));
            let may_throw = f64::from(rng.gen_range(0u8..4));
            acc.update(Durations {
                no_throw,
                may_throw,
            });
        }
        assert_eq!(acc.iterations(), k);
        assert_eq!(acc.no_throw_wins() + acc.may_throw_wins() + acc.ties(), k);
    }
}

#[test]
fn test_update_reports_iteration_winner() {
    let mut acc = ComparisonAccumulator::new();
    let winner = acc.update(Durations {
        no_throw: 2.0,
        may_throw: 1.0,
    });
    assert_eq!(winner, Winner::MayThrow);
    assert_eq!(acc.verdict(), Verdict::MayThrowAlwaysFaster);
}

#[test]
fn test_report_tracks_sums_minima_and_ratios() {
    let mut acc = ComparisonAccumulator::new();
    for (no_throw, may_throw) in [(1.0, 2.0), (3.0, 4.0), (2.0, 6.0)] {
        acc.update(Durations {
            no_throw,
            may_throw,
        });
    }
    let report = acc.finish(&scenario());
    assert_eq!(report.name, "recursive function calls");
    assert_eq!(report.n, 42);
    assert_eq!(report.iterations, 3);
    assert_eq!(report.sum_no_throw_ns, 6.0);
    assert_eq!(report.sum_may_throw_ns, 12.0);
    assert_eq!(report.shortest_no_throw_ns, Some(1.0));
    assert_eq!(report.shortest_may_throw_ns, Some(2.0));
    assert_eq!(report.ratio_no_throw_to_may_throw, 0.5);
    assert_eq!(report.ratio_may_throw_to_no_throw, 2.0);
    assert_eq!(report.verdict, Verdict::NoThrowAlwaysFaster);
}

#[test]
fn test_empty_report_has_no_minima() {
    let report = ComparisonAccumulator::new().finish(&scenario());
    assert_eq!(report.iterations, 0);
    assert_eq!(report.shortest_no_throw_ns, None);
    assert_eq!(report.verdict, Verdict::NoConsistentWinner);
    assert!(report.ratio_no_throw_to_may_throw.is_finite());
}
