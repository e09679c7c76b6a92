//! Property tests for part bounds checking, directly and through the
//! type-erased `DynSolver`.

use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverExt, SolverRegistryBuilder};
use proptest::prelude::*;

/// Echoes the part number; `N` parts.
struct Parts<const N: u8>;

impl<const N: u8> AocParser for Parts<N> {
    type SharedData<'a> = ();

    fn parse<'a>(_input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for Parts<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{part}"))
    }
}

fn checked(max_parts: u8, part: u8) -> Result<String, SolveError> {
    match max_parts {
        1 => Parts::<1>::solve_part_checked_range(&mut (), part),
        2 => Parts::<2>::solve_part_checked_range(&mut (), part),
        _ => Parts::<4>::solve_part_checked_range(&mut (), part),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn parts_outside_one_to_max_are_out_of_range(
        max_parts in prop::sample::select(vec![1u8, 2, 4]),
        part in 0u8..=255,
    ) {
        let result = checked(max_parts, part);
        if part == 0 || part > max_parts {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{part}"));
        }
    }

    #[test]
    fn dyn_solver_applies_the_same_bounds(part in 0u8..=10) {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Parts<2>>(2024, 18)
            .unwrap()
            .build();
        let mut solver = registry.create_solver(2024, 18, "").unwrap();

        match solver.solve(part) {
            Ok(result) => {
                prop_assert!((1..=2).contains(&part));
                prop_assert!(result.duration() >= chrono::TimeDelta::zero());
                prop_assert_eq!(result.answer, format!("part{part}"));
            }
            Err(SolveError::PartOutOfRange(p)) => {
                prop_assert_eq!(p, part);
                prop_assert!(part == 0 || part > 2);
            }
            Err(other) => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
