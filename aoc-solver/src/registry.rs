//! Solver registry: factories keyed by year and day

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years the registry can hold, starting at [`BASE_YEAR`]
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Parses an input and boxes the resulting instance.
///
/// Factories are shared across executor threads, hence `Send + Sync`.
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about a day without parsing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Collects solver factories, then freezes them into a [`SolverRegistry`].
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct Lines;
///
/// impl AocParser for Lines {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         Ok(input.lines().collect())
///     }
/// }
///
/// impl Solver for Lines {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.len().to_string())
///     }
/// }
///
/// let registry = SolverRegistryBuilder::new()
///     .register_solver::<Lines>(2024, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2024, 1, "a\nb\nc").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "3");
/// assert!(registry.create_solver(2024, 2, "").is_err());
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Registers `factory` for `year`/`day` with `parts` parts.
    ///
    /// Fails if the key is out of range or already taken.
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        let slot = &mut self.entries[index];
        if slot.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        *slot = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Registers solver type `S` for `year`/`day`.
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: crate::solver::Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
        })
    }

    /// Registers every plugin submitted through `inventory`.
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Registers the plugins for which `filter` returns `true`.
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"dijkstra"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable lookup from year/day to a solver factory
pub struct SolverRegistry {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistry {
    /// Parses `input` with the solver registered for `year`/`day`.
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self.entries[index]
            .as_ref()
            .ok_or(SolverError::NotFound(year, day))?;
        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    /// Registered days in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries[i].as_ref())
            .map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

/// A solver that can add itself to a builder without naming its type.
///
/// Implemented for every `Solver`; it is what lets [`SolverPlugin`] hold
/// different solver types behind one `&'static dyn`.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;
}

impl<S> RegisterableSolver for S
where
    S: crate::solver::Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day)
    }
}

/// A solver submitted with `inventory::submit!`, normally by
/// `#[derive(AutoRegisterSolver)]`.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels for filtering, such as `"grid"` or `"dijkstra"`
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::{AocParser, Solver};

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("empty input".into()));
            }
            Ok(input)
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            Ok(format!("{part}:{shared}"))
        }
    }

    #[test]
    fn index_round_trips_over_whole_capacity() {
        for index in 0..CAPACITY {
            let (year, day) = from_index(index);
            assert_eq!(calc_index(year, day), Some(index));
        }
        assert_eq!(calc_index(BASE_YEAR - 1, 1), None);
        assert_eq!(calc_index(BASE_YEAR + MAX_YEARS as u16, 1), None);
        assert_eq!(calc_index(2024, 0), None);
        assert_eq!(calc_index(2024, 26), None);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let result = SolverRegistryBuilder::new()
            .register_solver::<Echo>(2024, 16)
            .and_then(|b| b.register_solver::<Echo>(2024, 16));
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicateSolver(2024, 16))
        ));
    }

    #[test]
    fn out_of_range_keys_are_rejected() {
        assert!(matches!(
            SolverRegistryBuilder::new().register_solver::<Echo>(2014, 1),
            Err(RegistrationError::InvalidYearDay(2014, 1))
        ));
        let registry = SolverRegistryBuilder::new().build();
        assert!(matches!(
            registry.create_solver(2024, 26, "x"),
            Err(SolverError::InvalidYearDay(2024, 26))
        ));
    }

    #[test]
    fn info_is_listed_in_year_day_order() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Echo>(2024, 18)
            .and_then(|b| b.register_solver::<Echo>(2016, 3))
            .and_then(|b| b.register_solver::<Echo>(2024, 10))
            .unwrap()
            .build();

        let keys: Vec<(u16, u8)> = registry.iter_info().map(|i| (i.year, i.day)).collect();
        assert_eq!(keys, [(2016, 3), (2024, 10), (2024, 18)]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get_info(2024, 10).map(|i| i.parts), Some(2));
        assert!(!registry.contains(2024, 11));
    }

    #[test]
    fn created_solver_borrows_input_and_reports_errors() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Echo>(2024, 21)
            .unwrap()
            .build();

        let input = String::from("029A");
        let mut solver = registry.create_solver(2024, 21, &input).unwrap();
        assert_eq!((solver.year(), solver.day(), solver.parts()), (2024, 21, 2));
        assert_eq!(solver.solve(2).unwrap().answer, "2:029A");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));

        assert!(matches!(
            registry.create_solver(2024, 21, ""),
            Err(SolverError::ParseError(ParseError::MissingData(_)))
        ));
        assert!(matches!(
            registry.create_solver(2024, 20, "x"),
            Err(SolverError::NotFound(2024, 20))
        ));
    }
}
