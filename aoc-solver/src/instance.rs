//! Parsed solver instances behind a type-erased interface

use crate::error::{ConfigError, ParseError, SolveError};
use crate::solver::{Example, Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Answer to one part, with wall-clock bounds of the solve
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// Input parsed once for a year/day, shared by every part solved afterwards
///
/// Options applied through [`DynSolver::configure`] mutate the shared data,
/// so they affect every later [`DynSolver::solve`] call on this instance.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input`, recording how long it took
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], as handed out by the registry
///
/// # Example
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     solver.configure("workers", "2")?;
///
///     let result = solver.solve(2)?;
///     println!("Part 2: {} (took {})", result.answer, result.duration());
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`, rejecting parts outside `1..=parts()`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// Apply a `key=value` option to the parsed data
    fn configure(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;

    /// Worked examples shipped with the solver
    fn examples(&self) -> &'static [Example];

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        Ok(SolveResult {
            answer,
            solve_start,
            solve_end: Utc::now(),
        })
    }

    fn configure(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        S::configure(&mut self.shared, key, value)
    }

    fn examples(&self) -> &'static [Example] {
        S::examples()
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
