//! Property tests for the `AocSolver` derive: part dispatch, rejection of
//! undeclared parts, and state carried between parts.

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

fn parse_costs(input: &str) -> Result<Vec<u64>, ParseError> {
    input
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|_| ParseError::InvalidFormat(format!("bad step cost '{s}'")))
        })
        .collect()
}

fn join(costs: &[u64]) -> String {
    costs
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Step costs along a route: part 1 totals them, part 2 finds the
/// most expensive step.
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct RouteCost;

impl AocParser for RouteCost {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_costs(input)
    }
}

impl PartSolver<1> for RouteCost {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<u64>().to_string())
    }
}

impl PartSolver<2> for RouteCost {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(u64::to_string)
            .ok_or_else(|| SolveError::SolveFailed("empty route".into()))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn solve_part_dispatches_to_matching_part_solver(
        costs in prop::collection::vec(1u64..1000, 1..8),
        part in 1u8..=2,
    ) {
        let input = join(&costs);
        let mut via_dispatch = RouteCost::parse(&input).unwrap();
        let mut direct = RouteCost::parse(&input).unwrap();

        let dispatched = RouteCost::solve_part(&mut via_dispatch, part).unwrap();
        let expected = match part {
            1 => <RouteCost as PartSolver<1>>::solve(&mut direct),
            _ => <RouteCost as PartSolver<2>>::solve(&mut direct),
        }
        .unwrap();

        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn undeclared_parts_are_not_implemented(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = RouteCost::parse("1,2,3").unwrap();
        match RouteCost::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
        }
    }
}

#[test]
fn declared_part_count_becomes_parts_const() {
    assert_eq!(<RouteCost as Solver>::PARTS, 2);
}

#[test]
fn part_errors_pass_through_dispatch() {
    let mut shared = RouteCost::parse("").unwrap();
    assert!(matches!(
        RouteCost::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
}

mod carried_state {
    use super::*;

    struct Route {
        costs: Vec<u64>,
        best: Option<u64>,
    }

    /// Part 1 records the cheapest step so part 2 can reuse it.
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct CheapestStep;

    impl AocParser for CheapestStep {
        type SharedData<'a> = Route;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Ok(Route {
                costs: parse_costs(input)?,
                best: None,
            })
        }
    }

    impl PartSolver<1> for CheapestStep {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let best = shared
                .costs
                .iter()
                .copied()
                .min()
                .ok_or_else(|| SolveError::SolveFailed("empty route".into()))?;
            shared.best = Some(best);
            Ok(best.to_string())
        }
    }

    impl PartSolver<2> for CheapestStep {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let best = shared
                .best
                .ok_or_else(|| SolveError::SolveFailed("part 1 has not run".into()))?;
            let ties = shared.costs.iter().filter(|&&c| c == best).count();
            Ok(ties.to_string())
        }
    }

    proptest! {
        #[test]
        fn later_part_sees_earlier_result(costs in prop::collection::vec(1u64..5, 1..10)) {
            let mut shared = CheapestStep::parse(&join(&costs)).unwrap();
            prop_assert!(CheapestStep::solve_part(&mut shared, 2).is_err());

            let best = *costs.iter().min().unwrap();
            prop_assert_eq!(CheapestStep::solve_part(&mut shared, 1).unwrap(), best.to_string());

            let ties = costs.iter().filter(|&&c| c == best).count();
            prop_assert_eq!(CheapestStep::solve_part(&mut shared, 2).unwrap(), ties.to_string());
        }
    }
}

mod borrowed_input {
    use super::*;

    /// Keeps slices of the input instead of copying it.
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 1)]
    struct LongestRow;

    impl AocParser for LongestRow {
        type SharedData<'a> = Vec<&'a str>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Ok(input.lines().collect())
        }
    }

    impl PartSolver<1> for LongestRow {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            shared
                .iter()
                .max_by_key(|row| row.len())
                .map(|row| row.to_string())
                .ok_or_else(|| SolveError::SolveFailed("no rows".into()))
        }
    }

    #[test]
    fn borrowed_shared_data_dispatches() {
        let input = String::from("#.#\n#...#\n.#");
        let mut shared = LongestRow::parse(&input).unwrap();
        assert_eq!(LongestRow::solve_part(&mut shared, 1).unwrap(), "#...#");
        assert_eq!(<LongestRow as Solver>::PARTS, 1);
    }
}
