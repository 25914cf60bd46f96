//! Advent of Code Solver Library
//!
//! A flexible and type-safe framework for solving Advent of Code problems across multiple years and days.
//! Each problem is implemented as a solver with custom input parsing and can produce results
//! for multiple parts.
//!
//! # Overview
//!
//! This library provides:
//! - A trait-based interface for defining solvers
//! - Shared data that parts may read and mutate in order
//! - Type-safe parsing and result handling
//! - `key=value` options and worked examples per solver
//! - A registry system for managing multiple solvers
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError};
//! use aoc_solver::{SolverRegistryBuilder, register_solver};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 1)]
//! pub struct MyDay1;
//!
//! impl AocParser for MyDay1 {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input.lines()
//!             .map(|line| line.parse().map_err(|_|
//!                 ParseError::InvalidFormat("Expected integer".to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for MyDay1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! register_solver!(builder, MyDay1, 2023, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```
//!
//! # Key Concepts
//!
//! ## Solver Trait
//!
//! The [`Solver`] trait is the core interface. `#[derive(AocSolver)]` implements it by
//! dispatching each part number to the matching [`PartSolver`] impl. The optional
//! `configurable` and `examples` flags forward [`Solver::configure`] and
//! [`Solver::examples`] to [`SolverOptions`] and [`SolverExamples`].
//!
//! ## DynSolver Trait
//!
//! The [`DynSolver`] trait provides type erasure for working with different solver types uniformly.
//!
//! ## Plugin System
//!
//! Use `#[derive(AutoRegisterSolver)]` to submit a solver to the plugin inventory:
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2018, day = 7, tags = ["graph"])]
//! struct Day7Solver;
//! ```

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ConfigError, ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{
    AocParser, Example, PartSolver, Solver, SolverExamples, SolverExt, SolverOptions,
};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
