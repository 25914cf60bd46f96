//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),
}

/// Failure to load a puzzle input
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file for the year/day
    #[error("No input for {year}/{day:02}: {} does not exist", .path.display())]
    NotFound { year: u16, day: u8, path: PathBuf },

    /// The input file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-solver failure, shared by every part of the solver it stopped
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcRunError))]
pub enum RunError {
    /// Input could not be loaded
    #[error("{0}")]
    Input(#[from] InputError),

    /// Parsing, option or solving error from the solver
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// A worked example produced the wrong answer
    #[error("Example for part {part} failed: expected {expected}, got {actual}")]
    ExampleMismatch {
        part: u8,
        expected: String,
        actual: String,
    },

    /// A worked example could not be solved
    #[error("Example for part {part} failed: {source}")]
    ExampleError {
        part: u8,
        #[source]
        source: aoc_solver::SolverError,
    },
}
