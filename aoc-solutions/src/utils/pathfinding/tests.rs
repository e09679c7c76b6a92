use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rayon::prelude::*;

use super::*;

fn walls_from(cells: &[(i32, i32)]) -> HashSet<Coord> {
    cells.iter().map(|&(r, c)| Coord::new(r, c)).collect()
}

/// Cheapest simple path by exhaustive depth-first search.
fn brute_force(moves: &GridMoves<'_>, start: Coord, goal: Coord) -> Option<Cost> {
    fn walk(
        moves: &GridMoves<'_>,
        node: Coord,
        goal: Coord,
        cost: Cost,
        seen: &mut HashSet<Coord>,
        best: &mut Option<Cost>,
    ) {
        if node == goal {
            *best = Some(best.map_or(cost, |b| b.min(cost)));
            return;
        }
        for edge in moves.edges(node) {
            if seen.insert(edge.to) {
                walk(moves, edge.to, goal, cost + edge.weight, seen, best);
                seen.remove(&edge.to);
            }
        }
    }

    let mut best = None;
    walk(moves, start, goal, 0, &mut HashSet::from([start]), &mut best);
    best
}

/// Number of simple paths from `start` to `goal` costing exactly `cost`.
fn count_paths_of_cost(moves: &GridMoves<'_>, start: Coord, goal: Coord, cost: Cost) -> usize {
    fn walk(
        moves: &GridMoves<'_>,
        node: Coord,
        goal: Coord,
        left: Cost,
        seen: &mut HashSet<Coord>,
    ) -> usize {
        if node == goal {
            return usize::from(left == 0);
        }
        let mut total = 0;
        for edge in moves.edges(node) {
            if edge.weight <= left && seen.insert(edge.to) {
                total += walk(moves, edge.to, goal, left - edge.weight, seen);
                seen.remove(&edge.to);
            }
        }
        total
    }

    walk(moves, start, goal, cost, &mut HashSet::from([start]))
}

/// Cheapest cost to every oriented state, by relaxing every edge of every
/// state until nothing improves.
fn relax_all(
    moves: &TurnPenaltyMoves<'_>,
    bounds: Bounds,
    start: Oriented,
) -> HashMap<Oriented, Cost> {
    let states: Vec<Oriented> = bounds
        .cells()
        .flat_map(|c| Direction::ALL.map(|d| Oriented::new(c, d)))
        .collect();
    let mut best = HashMap::from([(start, 0)]);
    let mut changed = true;
    while changed {
        changed = false;
        for &state in &states {
            let Some(&here) = best.get(&state) else {
                continue;
            };
            for edge in moves.edges(state) {
                let cost = here + edge.weight;
                if best.get(&edge.to).is_none_or(|&known| cost < known) {
                    best.insert(edge.to, cost);
                    changed = true;
                }
            }
        }
    }
    best
}

#[test]
fn open_grid_costs_manhattan_distance() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::square(7));
    assert_eq!(
        shortest_path(&moves, Coord::new(0, 0), Coord::new(6, 6)),
        Some(12)
    );
}

#[test]
fn wall_with_gap_at_the_edge_adds_no_length() {
    let walls: HashSet<Coord> = (0..6).map(|col| Coord::new(3, col)).collect();
    let moves = GridMoves::bounded(&walls, Bounds::square(7));
    assert_eq!(
        shortest_path(&moves, Coord::new(0, 0), Coord::new(6, 6)),
        Some(12)
    );
}

#[test]
fn wall_forces_a_detour() {
    let walls: HashSet<Coord> = (0..=5).map(|row| Coord::new(row, 3)).collect();
    let moves = GridMoves::bounded(&walls, Bounds::square(7));
    assert_eq!(
        shortest_path(&moves, Coord::new(0, 0), Coord::new(0, 6)),
        Some(18)
    );
}

#[test]
fn enclosed_goal_is_unreachable() {
    let walls = walls_from(&[(2, 3), (4, 3), (3, 2), (3, 4)]);
    let moves = GridMoves::bounded(&walls, Bounds::square(7));
    let goal = Coord::new(3, 3);

    assert_eq!(shortest_path(&moves, Coord::new(0, 0), goal), None);
    assert!(!is_reachable(&moves, Coord::new(0, 0), goal));

    let trace = shortest_path_with_trace(&moves, Coord::new(0, 0), |c| *c == goal);
    assert_eq!(trace.cost(), None);
    assert!(!trace.table.contains(&goal));
    assert_eq!(trace.table.len(), 49 - 5);
}

#[test]
fn straight_corridor_needs_no_turns() {
    let walls = HashSet::new();
    let moves = TurnPenaltyMoves::new(&walls, 1000).with_bounds(Bounds::new(1, 5));
    let start = Oriented::new(Coord::new(0, 0), Direction::Right);

    let reached = shortest_path_by(&moves, start, |o| o.pos == Coord::new(0, 4));
    assert_eq!(
        reached,
        Some((Oriented::new(Coord::new(0, 4), Direction::Right), 4))
    );
}

#[test]
fn corridor_facing_away_is_a_dead_end_without_u_turns() {
    let walls = HashSet::new();
    let moves = TurnPenaltyMoves::new(&walls, 1000).with_bounds(Bounds::new(1, 5));
    let start = Oriented::new(Coord::new(0, 0), Direction::Left);
    assert_eq!(
        shortest_path_by(&moves, start, |o| o.pos == Coord::new(0, 4)),
        None
    );

    let reversible = moves.allowing_reverse();
    assert_eq!(
        shortest_path_by(&reversible, start, |o| o.pos == Coord::new(0, 4)).map(|(_, c)| c),
        Some(2004)
    );
}

#[test]
fn first_blocking_obstacle_by_binary_search() {
    let falling = [
        Coord::new(0, 2),
        Coord::new(1, 1),
        Coord::new(2, 0),
        Coord::new(1, 0),
    ];
    let (start, goal) = (Coord::new(0, 0), Coord::new(2, 2));
    let reachable_after = |count: usize| {
        let walls: HashSet<Coord> = falling[..count].iter().copied().collect();
        is_reachable(&GridMoves::bounded(&walls, Bounds::square(3)), start, goal)
    };

    let counts: Vec<usize> = (0..=falling.len()).collect();
    let first_cut = counts.partition_point(|&count| reachable_after(count));
    assert_eq!(falling[first_cut - 1], Coord::new(2, 0));
}

#[test]
fn search_moves_through_its_states() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::square(3));
    let mut search = Search::new(&moves, Coord::new(0, 0));
    assert_eq!(search.state(), SearchState::Initialized);

    assert_eq!(search.settle_next(), Some((Coord::new(0, 0), 0)));
    assert_eq!(search.state(), SearchState::Running);

    let goal = Coord::new(1, 1);
    assert_eq!(search.run_until(|c| *c == goal), Some((goal, 2)));
    assert_eq!(search.state(), SearchState::Done);

    // Terminal: further driving changes nothing.
    assert_eq!(search.settle_next(), None);
    assert_eq!(search.run_until(|c| *c == goal), Some((goal, 2)));
    assert_eq!(search.state(), SearchState::Done);
}

#[test]
fn exhausted_search_reports_unreachable_again() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::square(2));
    let mut search = Search::new(&moves, Coord::new(0, 0));
    assert_eq!(search.run_until(|c| c.row > 5), None);
    assert_eq!(search.state(), SearchState::Done);
    assert_eq!(search.table().len(), 4);
    assert_eq!(search.run_until(|_| true), None);
}

#[test]
fn distance_map_takes_nearest_source() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::new(1, 7));
    let table = distance_map(&moves, [Coord::new(0, 0), Coord::new(0, 6)]);

    let costs: Vec<Cost> = (0..7)
        .map(|c| table.cost(&Coord::new(0, c)).unwrap())
        .collect();
    assert_eq!(costs, [0, 1, 2, 3, 2, 1, 0]);
    assert_eq!(table.visit(&Coord::new(0, 0)).and_then(|v| v.predecessor), None);
}

#[test]
fn reversed_search_gives_remaining_cost() {
    let walls = walls_from(&[(1, 1)]);
    let moves = TurnPenaltyMoves::new(&walls, 1000).with_bounds(Bounds::square(3));
    let goal = Coord::new(2, 2);
    let remaining = distance_map(&Reversed(&moves), Direction::ALL.map(|f| Oriented::new(goal, f)));

    for node in Bounds::square(3)
        .cells()
        .filter(|c| !walls.contains(c))
        .flat_map(|c| Direction::ALL.map(|f| Oriented::new(c, f)))
    {
        let forward = shortest_path_by(&moves, node, |o| o.pos == goal).map(|(_, c)| c);
        assert_eq!(remaining.cost(&node), forward, "remaining cost from {node:?}");
    }
}

#[test]
fn unique_minimal_path_is_the_whole_coverage() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::new(1, 5));
    let (start, goal) = (Coord::new(0, 0), Coord::new(0, 4));
    let trace = shortest_path_with_trace(&moves, start, |c| *c == goal);
    let optimal = trace.cost().unwrap();
    let path = trace.path().unwrap();

    let paths = PathEnumerator::requerying(&moves, start, |c: &Coord| *c == goal, optimal)
        .minimal_paths();
    assert_eq!(paths, vec![path.clone()]);

    let covered = PathEnumerator::requerying(&moves, start, |c: &Coord| *c == goal, optimal)
        .covered_nodes();
    let expected: HashSet<Coord> = path.into_iter().collect();
    assert_eq!(covered, expected);
}

#[test]
fn open_square_has_every_staircase() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::square(3));
    let (start, goal) = (Coord::new(0, 0), Coord::new(2, 2));
    let is_goal = |c: &Coord| *c == goal;

    let paths = PathEnumerator::requerying(&moves, start, is_goal, 4).minimal_paths();
    assert_eq!(paths.len(), 6);
    assert!(paths.iter().all(|p| p.len() == 5 && p[0] == start && p[4] == goal));

    let table = distance_map(&moves, [goal]);
    let covered = PathEnumerator::new(&moves, start, is_goal, 4, table).covered_nodes();
    assert_eq!(covered.len(), 9);
}

#[test]
fn requery_remembers_answers() {
    let walls = HashSet::new();
    let moves = GridMoves::bounded(&walls, Bounds::square(3));
    let goal = Coord::new(2, 2);
    let mut remaining = RequeryRemaining::new(&moves, |c: &Coord| *c == goal);

    assert_eq!(remaining.remaining(Coord::new(0, 0)), Some(4));
    assert_eq!(remaining.remaining(Coord::new(0, 0)), Some(4));
    assert_eq!(remaining.remaining(Coord::new(2, 2)), Some(0));
    assert_eq!(remaining.searches(), 2);
}

#[test]
fn parallel_queries_match_sequential_ones() {
    let walls = walls_from(&[(1, 1), (1, 2), (1, 3), (3, 3), (4, 1), (5, 5)]);
    let moves = GridMoves::bounded(&walls, Bounds::square(7));
    let goal = Coord::new(6, 6);
    let starts: Vec<Coord> = Bounds::square(7)
        .cells()
        .filter(|c| !walls.contains(c))
        .collect();

    let sequential: Vec<_> = starts
        .iter()
        .map(|&s| shortest_path(&moves, s, goal))
        .collect();
    let parallel: Vec<_> = starts
        .par_iter()
        .map(|&s| shortest_path(&moves, s, goal))
        .collect();
    assert_eq!(sequential, parallel);
}

fn small_grid() -> impl Strategy<Value = HashSet<Coord>> {
    prop::collection::vec(any::<bool>(), 16).prop_map(|cells| {
        Bounds::square(4)
            .cells()
            .zip(cells)
            .filter(|&(c, wall)| wall && c != Coord::new(0, 0) && c != Coord::new(3, 3))
            .map(|(c, _)| c)
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_matches_brute_force(walls in small_grid()) {
        let moves = GridMoves::bounded(&walls, Bounds::square(4));
        let (start, goal) = (Coord::new(0, 0), Coord::new(3, 3));
        prop_assert_eq!(shortest_path(&moves, start, goal), brute_force(&moves, start, goal));
        prop_assert_eq!(
            shortest_path(&moves, start, goal).is_some(),
            is_reachable(&moves, start, goal)
        );
    }

    #[test]
    fn prop_extra_obstacle_never_shortens(walls in small_grid(), extra in (0..4i32, 0..4i32)) {
        let (start, goal) = (Coord::new(0, 0), Coord::new(3, 3));
        let extra = Coord::new(extra.0, extra.1);
        prop_assume!(extra != start && extra != goal);

        let before = shortest_path(&GridMoves::bounded(&walls, Bounds::square(4)), start, goal);
        let mut more = walls.clone();
        more.insert(extra);
        let after = shortest_path(&GridMoves::bounded(&more, Bounds::square(4)), start, goal);

        let as_finite = |c: Option<Cost>| c.unwrap_or(Cost::MAX);
        prop_assert!(as_finite(after) >= as_finite(before));
    }

    #[test]
    fn prop_repeated_queries_agree(walls in small_grid()) {
        let moves = GridMoves::bounded(&walls, Bounds::square(4));
        let (start, goal) = (Coord::new(0, 0), Coord::new(3, 3));
        prop_assert_eq!(shortest_path(&moves, start, goal), shortest_path(&moves, start, goal));
    }

    #[test]
    fn prop_trace_sums_to_cost(walls in small_grid(), turn in 0..5u64) {
        let moves = TurnPenaltyMoves::new(&walls, turn).with_bounds(Bounds::square(4));
        let start = Oriented::new(Coord::new(0, 0), Direction::Right);
        let goal = Coord::new(3, 3);
        let trace = shortest_path_with_trace(&moves, start, |o| o.pos == goal);

        if let (Some(cost), Some(path)) = (trace.cost(), trace.path()) {
            prop_assert_eq!(path[0], start);
            let walked: Cost = path
                .windows(2)
                .map(|step| {
                    moves
                        .edges(step[0])
                        .filter(|e| e.to == step[1])
                        .map(|e| e.weight)
                        .min()
                        .unwrap()
                })
                .sum();
            prop_assert_eq!(walked, cost);
        }
    }

    #[test]
    fn prop_enumerated_paths_match_brute_force(walls in small_grid()) {
        let moves = GridMoves::bounded(&walls, Bounds::square(4));
        let (start, goal) = (Coord::new(0, 0), Coord::new(3, 3));
        let is_goal = |c: &Coord| *c == goal;

        if let Some(optimal) = shortest_path(&moves, start, goal) {
            let requeried =
                PathEnumerator::requerying(&moves, start, is_goal, optimal).minimal_paths();
            prop_assert_eq!(requeried.len(), count_paths_of_cost(&moves, start, goal, optimal));

            let covered: HashSet<Coord> = requeried.into_iter().flatten().collect();
            let table = distance_map(&moves, [goal]);
            let from_table =
                PathEnumerator::new(&moves, start, is_goal, optimal, table).covered_nodes();
            prop_assert_eq!(from_table, covered);
        }
    }

    #[test]
    fn prop_weighted_moves_match_relaxation(
        walls in small_grid(),
        turn in 0..5u64,
        step in 1..4u64,
        reverse in any::<bool>(),
    ) {
        let bounds = Bounds::square(4);
        let moves = TurnPenaltyMoves::new(&walls, turn)
            .with_bounds(bounds)
            .with_step_cost(step);
        let moves = if reverse { moves.allowing_reverse() } else { moves };
        let start = Oriented::new(Coord::new(0, 0), Direction::Right);
        let goal = Coord::new(3, 3);

        let relaxed = relax_all(&moves, bounds, start);
        let expected = Direction::ALL
            .into_iter()
            .filter_map(|facing| relaxed.get(&Oriented::new(goal, facing)).copied())
            .min();
        let found = shortest_path_by(&moves, start, |o| o.pos == goal).map(|(_, cost)| cost);
        prop_assert_eq!(found, expected);

        let table = distance_map(&moves, [start]);
        prop_assert_eq!(table.len(), relaxed.len());
        for (state, cost) in &relaxed {
            prop_assert_eq!(table.cost(state), Some(*cost));
        }
    }
}
