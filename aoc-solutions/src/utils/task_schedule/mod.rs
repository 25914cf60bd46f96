//! Dependency-graph task scheduling
//!
//! Tasks are linked by "X must finish before Y can begin" edges and scheduled in
//! two modes:
//!
//! - [`serial_order`]: one task at a time with zero duration, producing a completion order
//! - [`timed_completion`]: a fixed pool of workers, each task taking
//!   `base_duration + letter index + 1` time units, producing the total elapsed time
//!
//! When several tasks are available at once, [`tie_break`] picks the
//! lexicographically smallest id. This decides both the serial order and which
//! tasks idle workers take first.
//!
//! # Warning: Cycles
//!
//! Cycles are not rejected when the graph is built. Both schedulers report them as
//! [`ScheduleError::Deadlock`] once no task can start.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::task_schedule::{
//!     DependencyGraph, ScheduleConfig, serial_order, timed_completion,
//! };
//!
//! let graph = DependencyGraph::from_edges([
//!     ("C", "A"), ("C", "F"), ("A", "B"), ("A", "D"),
//!     ("B", "E"), ("D", "E"), ("F", "E"),
//! ]).unwrap();
//!
//! let order = serial_order(&graph).unwrap();
//! assert_eq!(graph.concat_ids(&order), "CABDFE");
//!
//! let outcome = timed_completion(&graph, ScheduleConfig::EXAMPLE).unwrap();
//! assert_eq!(outcome.elapsed, 15);
//! ```

mod error;
mod graph;
mod progress;
mod scheduler;
mod worker;


pub use error::{GraphError, ScheduleError};
pub use graph::{DependencyGraph, DependencyGraphBuilder, Task, TaskKey, tie_break};
pub use progress::{Progress, TaskState};
pub use scheduler::{
    Assignment, ScheduleConfig, SerialScheduler, StepReport, TimedOutcome, TimedScheduler,
    serial_order, task_duration, timed_completion,
};
pub use worker::{Worker, WorkerBusy, WorkerPool};
