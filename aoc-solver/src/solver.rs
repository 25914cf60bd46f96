//! Core solver trait and related types

use crate::error::{ConfigError, ParseError, SolveError};

/// Trait for parsing AOC puzzle input into shared data
///
/// This trait defines the shared data type and parsing logic for a solver,
/// providing clean separation between parsing and solving concerns.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Day1::parse("1\n2").unwrap(), vec![1, 2]);
/// ```
pub trait AocParser {
    /// The shared data structure that holds parsed input and intermediate results.
    ///
    /// Use any ownership strategy:
    /// - `Vec<T>` or custom structs for owned data (simplest, supports mutation)
    /// - `&'a str` for zero-copy borrowed data when no transformation is needed
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Trait for solving a specific part of an AOC puzzle.
///
/// The const generic `N` represents the part number (1, 2, etc.).
/// This provides compile-time validation that the part is implemented.
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle.
    ///
    /// # Arguments
    /// * `shared` - Mutable reference to shared data
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError)` - An error occurred while solving
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A worked example shipped with a solver
///
/// Examples are checked against the solver before it is run on real input.
/// `options` are applied through [`Solver::configure`] before solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// The part this example validates
    pub part: u8,
    /// The example puzzle input
    pub input: &'static str,
    /// The expected answer
    pub expected: &'static str,
    /// `key=value` options the example must be solved under
    pub options: &'static [(&'static str, &'static str)],
}

/// Solvers that accept `key=value` options after parsing
///
/// Used by `#[aoc_solver(configurable)]` to fill in [`Solver::configure`].
pub trait SolverOptions: AocParser {
    /// Apply a single option to the parsed data
    fn configure(
        shared: &mut Self::SharedData<'_>,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError>;
}

/// Solvers that ship worked examples
///
/// Used by `#[aoc_solver(examples)]` to fill in [`Solver::examples`].
pub trait SolverExamples: AocParser {
    const EXAMPLES: &'static [Example];
}

/// Core trait that all Advent of Code solvers must implement.
///
/// Extends `AocParser` to inherit `SharedData` type and `parse()` function.
/// Usually derived with `#[derive(AocSolver)]`, which dispatches each part to
/// the matching [`PartSolver`] implementation.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Day1Solver;
///
/// impl AocParser for Day1Solver {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input.lines()
///             .map(|line| line.parse().map_err(|_|
///                 ParseError::InvalidFormat("Expected integer".to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Day1Solver {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<i32>().to_string()),
///             2 => Ok(shared.iter().product::<i32>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut shared = Day1Solver::parse("2\n3").unwrap();
/// assert_eq!(Day1Solver::solve_part(&mut shared, 2).unwrap(), "6");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Arguments
    /// * `shared` - Mutable reference to shared data (parsed input and intermediate results)
    /// * `part` - The part number (1, 2, etc.)
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;

    /// Apply a `key=value` option. Solvers without options reject every key.
    fn configure(
        _shared: &mut Self::SharedData<'_>,
        key: &str,
        _value: &str,
    ) -> Result<(), ConfigError> {
        Err(ConfigError::UnknownOption(key.to_string()))
    }

    /// Worked examples for this solver
    fn examples() -> &'static [Example] {
        &[]
    }
}

pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
