use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::dp_cache::{DashMapBackend, DpProblem, ParallelDpCache};
use crate::utils::pathfinding::{Coord, Cost, Direction, Edge, Graph, shortest_path};

const NUMERIC_LAYOUT: [&str; 4] = ["789", "456", "123", " 0A"];
const DIRECTIONAL_LAYOUT: [&str; 2] = [" ^A", "<v>"];
const DIRECTIONAL_KEYS: [char; 5] = ['^', 'A', '<', 'v', '>'];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["dijkstra", "dp", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct DoorCode<'a> {
    keys: &'a str,
    value: Cost,
}

#[derive(Debug)]
struct Keypad {
    keys: HashMap<char, Coord>,
    cells: HashSet<Coord>,
}

impl Keypad {
    fn new(layout: &[&str]) -> Self {
        let keys: HashMap<char, Coord> = layout
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, key)| key != ' ')
                    .map(move |(col, key)| (key, Coord::new(row as i32, col as i32)))
            })
            .collect();
        let cells = keys.values().copied().collect();
        Self { keys, cells }
    }

    fn numeric() -> Self {
        Self::new(&NUMERIC_LAYOUT)
    }

    fn directional() -> Self {
        Self::new(&DIRECTIONAL_LAYOUT)
    }

    fn position(&self, key: char) -> Option<Coord> {
        self.keys.get(&key).copied()
    }
}

/// State of one robot arm while it works toward pressing a key.
///
/// `controller` is the key last pressed on the keypad that steers this
/// arm, which is where that keypad's own arm is resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Arm {
    Hovering { at: Coord, controller: char },
    Pressed,
}

/// Moves of an arm over `keypad` toward `target`, weighted by what each
/// press costs on the controlling keypad.
struct PressGraph<'k, C> {
    keypad: &'k Keypad,
    target: Coord,
    controls: C,
}

impl<C> Graph for PressGraph<'_, C>
where
    C: Fn(char, char) -> Option<Cost>,
{
    type Node = Arm;

    fn edges(&self, node: Arm) -> impl Iterator<Item = Edge<Arm>> {
        let hovering = match node {
            Arm::Hovering { at, controller } => Some((at, controller)),
            Arm::Pressed => None,
        };

        let moves = hovering.into_iter().flat_map(move |(at, controller)| {
            Direction::ALL.into_iter().filter_map(move |direction| {
                let to = at.step(direction);
                if !self.keypad.cells.contains(&to) {
                    return None;
                }
                let key = direction.symbol();
                let weight = (self.controls)(controller, key)?;
                Some(Edge::new(Arm::Hovering { at: to, controller: key }, weight))
            })
        });
        let press = hovering
            .filter(|&(at, _)| at == self.target)
            .and_then(|(_, controller)| (self.controls)(controller, 'A'))
            .map(|weight| Edge::new(Arm::Pressed, weight));

        moves.chain(press)
    }
}

/// Cheapest way to move an arm resting on `from` over to `to` and press it,
/// with every controlling keypad starting and ending on `A`.
fn press_cost(
    keypad: &Keypad,
    from: char,
    to: char,
    controls: impl Fn(char, char) -> Option<Cost>,
) -> Option<Cost> {
    let graph = PressGraph {
        keypad,
        target: keypad.position(to)?,
        controls,
    };
    let start = Arm::Hovering {
        at: keypad.position(from)?,
        controller: 'A',
    };
    shortest_path(&graph, start, Arm::Pressed)
}

/// Pressing `to` after `from` on a directional keypad with `depth` robot
/// keypads between it and the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Press {
    depth: u8,
    from: char,
    to: char,
}

struct DirectionalPresses {
    keypad: Keypad,
}

impl DpProblem<Press, Option<Cost>> for DirectionalPresses {
    fn deps(&self, press: &Press) -> Vec<Press> {
        match press.depth.checked_sub(1) {
            None => vec![],
            Some(depth) => DIRECTIONAL_KEYS
                .into_iter()
                .flat_map(|from| {
                    DIRECTIONAL_KEYS
                        .into_iter()
                        .map(move |to| Press { depth, from, to })
                })
                .collect(),
        }
    }

    fn compute(&self, press: &Press, deps: Vec<Option<Cost>>) -> Option<Cost> {
        if press.depth == 0 {
            return Some(1);
        }
        let below: HashMap<(char, char), Option<Cost>> = self
            .deps(press)
            .into_iter()
            .zip(deps)
            .map(|(dep, cost)| ((dep.from, dep.to), cost))
            .collect();
        press_cost(&self.keypad, press.from, press.to, |from, to| {
            below.get(&(from, to)).copied().flatten()
        })
    }
}

type PressCache =
    ParallelDpCache<Press, Option<Cost>, DashMapBackend<Press, Option<Cost>>, DirectionalPresses>;

fn press_cache() -> PressCache {
    ParallelDpCache::with_problem(
        DashMapBackend::new(),
        DirectionalPresses {
            keypad: Keypad::directional(),
        },
    )
}

/// Human presses needed to type `keys` on the door with `robots`
/// directional keypads in between.
fn typing_cost(numeric: &Keypad, keys: &str, robots: u8, cache: &PressCache) -> Option<Cost> {
    let controls = |from, to| {
        cache.get(&Press {
            depth: robots,
            from,
            to,
        })
    };
    keys.chars()
        .try_fold(('A', 0), |(from, total), to| {
            Some((to, total + press_cost(numeric, from, to, controls)?))
        })
        .map(|(_, total)| total)
}

fn complexity(codes: &[DoorCode<'_>], robots: u8) -> Result<Cost, SolveError> {
    let numeric = Keypad::numeric();
    let cache = press_cache();
    codes
        .par_iter()
        .map(|code| typing_cost(&numeric, code.keys, robots, &cache).map(|cost| cost * code.value))
        .sum::<Option<Cost>>()
        .ok_or_else(|| SolveError::SolveFailed("a door code cannot be typed".into()))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<DoorCode<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numeric = Keypad::numeric();
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                let keys = line.trim();
                if keys.is_empty() || keys.chars().any(|key| numeric.position(key).is_none()) {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) '{keys}' is not a door code",
                        line_idx + 1
                    )));
                }
                let digits: String = keys.chars().filter(char::is_ascii_digit).collect();
                let value = if digits.is_empty() {
                    0
                } else {
                    digits.parse().map_err(|_| {
                        ParseError::InvalidFormat(format!(
                            "(line {}) value too large",
                            line_idx + 1
                        ))
                    })?
                };
                Ok(DoorCode { keys, value })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity(shared, 2)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity(shared, 25)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;

    const EXAMPLE: &str = "029A\n980A\n179A\n456A\n379A";

    #[test]
    fn directional_base_costs() {
        let cache = press_cache();
        let cost = |depth, from, to| cache.get(&Press { depth, from, to });
        assert_eq!(cost(0, 'A', '<'), Some(1));
        assert_eq!(cost(1, 'A', 'A'), Some(1));
        // v<<A
        assert_eq!(cost(1, 'A', '<'), Some(4));
        // <A
        assert_eq!(cost(1, 'A', '^'), Some(2));
    }

    #[test]
    fn typing_directly_on_the_door() {
        let numeric = Keypad::numeric();
        assert_eq!(typing_cost(&numeric, "029A", 0, &press_cache()), Some(12));
    }

    #[test]
    fn example_sequence_lengths() {
        let numeric = Keypad::numeric();
        let cache = press_cache();
        let lengths: Vec<Cost> = ["029A", "980A", "179A", "456A", "379A"]
            .iter()
            .map(|code| typing_cost(&numeric, code, 2, &cache).unwrap())
            .collect();
        assert_eq!(lengths, [68, 60, 68, 64, 64]);
    }

    #[test]
    fn example_complexity() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared[0].value, 29);
        assert_eq!(
            Solver::solve_part_checked_range(&mut shared, 1).unwrap(),
            "126384"
        );
    }

    #[test]
    fn more_robots_never_cost_less() {
        let numeric = Keypad::numeric();
        let cache = press_cache();
        let costs: Vec<Cost> = (0..=25)
            .map(|robots| typing_cost(&numeric, "379A", robots, &cache).unwrap())
            .collect();
        assert!(costs.windows(2).all(|pair| pair[0] <= pair[1]), "{costs:?}");
    }

    #[test]
    fn rejects_keys_off_the_keypad() {
        assert!(Solver::parse("02B9A").is_err());
    }
}
