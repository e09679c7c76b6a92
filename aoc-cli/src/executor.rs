//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// How an answer compares with the expected answer file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Checking is off, the part failed, or there is no answer file
    Unchecked,
    Correct,
    Incorrect { expected: String },
}

impl Verdict {
    pub fn judge(answer: &str, expected: Option<&str>) -> Self {
        match expected {
            None => Verdict::Unchecked,
            Some(expected) if expected == answer.trim() => Verdict::Correct,
            Some(expected) => Verdict::Incorrect {
                expected: expected.to_string(),
            },
        }
    }
}

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// Shared so one failed parse can be reported for every part
    pub answer: Result<String, Arc<SolverError>>,
    /// Set on the result whose solve included a fresh parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
    pub verdict: Verdict,
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedConfig,
    thread_pool: rayon::ThreadPool,
}

/// Everything worker threads read while solving
struct SharedConfig {
    registry: SolverRegistry,
    store: InputStore,
    check: bool,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedConfig {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                check: config.check,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn store(&self) -> &InputStore {
        &self.shared.store
    }

    /// Registered solvers passing the year, day and part filters, in
    /// (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.shared;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Runs every work item, sending one result per part to `tx`.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            work_items = work_items.len(),
            parallelize_by = ?self.shared.parallelize_by,
            "executing"
        );

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.shared) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part-level parallelism happens inside run_work_item.
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let groups = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel_grouped(groups, &tx)
            }
        }
    }

    /// Groups run in parallel; items within a group run in order.
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|items| {
                    items
                        .iter()
                        .filter_map(|work| run_work_item(work, tx, shared).err())
                        .reduce(ArcExecutorError::combine)
                })
                .reduce_with(ArcExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn failed_result(work: &WorkItem, part: u8, error: Arc<SolverError>) -> SolverResult {
    SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
        verdict: Verdict::Unchecked,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedConfig,
) -> Result<(), ArcExecutorError> {
    debug!(year = work.year, day = work.day, parts = ?work.parts, "running");

    let input = match shared.store.input(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year = work.year, day = work.day, error = %e, "no usable input");
            let error = Arc::new(SolverError::ParseError(ParseError::MissingData(
                e.to_string(),
            )));
            for part in work.parts.clone() {
                send(tx, failed_result(work, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if shared.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, &input, tx, shared)
    } else {
        run_parts_in_order(work, &input, tx, shared)
    }
}

/// Each part parses its own copy of the input; results are buffered so they
/// still leave in part order.
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    shared: &SharedConfig,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match shared.registry.create_solver(work.year, work.day, input) {
                Ok(mut solver) => {
                    let parse_duration = solver.parse_duration();
                    let mut result = solve_part(work, part, &mut *solver, shared);
                    result.parse_duration = Some(parse_duration);
                    result
                }
                Err(e) => failed_result(work, part, Arc::new(e)),
            };
            rtx.send(result).ok();
        });

    let start_part = *work.parts.start();
    let mut buffer: Vec<Option<SolverResult>> = work.parts.clone().map(|_| None).collect();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if let Some(slot) = buffer.get_mut(idx) {
            *slot = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            send(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Parses once on a scoped thread and streams each part as it finishes.
fn run_parts_in_order(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    shared: &SharedConfig,
) -> Result<(), ArcExecutorError> {
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();

    std::thread::scope(|s| -> Result<(), ArcExecutorError> {
        let solving = s.spawn(move || {
            match shared.registry.create_solver(work.year, work.day, input) {
                Ok(mut solver) => {
                    let mut parse_duration = Some(solver.parse_duration());
                    for part in work.parts.clone() {
                        let mut result = solve_part(work, part, &mut *solver, shared);
                        result.parse_duration = parse_duration.take();
                        if solve_tx.send(result).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    let error = Arc::new(e);
                    for part in work.parts.clone() {
                        if solve_tx.send(failed_result(work, part, error.clone())).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        for result in solve_rx {
            send(tx, result)?;
        }
        solving.join().map_err(|_| {
            ExecutorError::Panicked {
                year: work.year,
                day: work.day,
            }
            .into()
        })
    })
}

fn solve_part(
    work: &WorkItem,
    part: u8,
    solver: &mut dyn DynSolver,
    shared: &SharedConfig,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (Err(Arc::new(SolverError::from(e))), TimeDelta::zero()),
    };

    let verdict = match &answer {
        Ok(answer) if shared.check => check_answer(&shared.store, work, part, answer),
        _ => Verdict::Unchecked,
    };

    SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer,
        parse_duration: None,
        solve_duration,
        verdict,
    }
}

fn check_answer(store: &InputStore, work: &WorkItem, part: u8, answer: &str) -> Verdict {
    match store.expected_answer(work.year, work.day, part) {
        Ok(expected) => {
            if expected.is_none() {
                debug!(year = work.year, day = work.day, part, "no answer file");
            }
            Verdict::judge(answer, expected.as_deref())
        }
        Err(e) => {
            warn!(year = work.year, day = work.day, part, error = %e, "unreadable answer file");
            Verdict::Unchecked
        }
    }
}
