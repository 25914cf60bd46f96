//! Error types for graph construction and scheduling

use thiserror::Error;

/// Error building a [`DependencyGraph`](super::DependencyGraph)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A task id is empty or contains whitespace
    #[error("invalid task id '{0}'")]
    InvalidTaskId(String),
    /// An edge names the same task on both ends
    #[error("task {0} cannot be its own prerequisite")]
    SelfLoop(String),
}

/// Fatal error raised while scheduling; the run is aborted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Incomplete tasks remain but none can start: the graph has a cycle
    #[error(
        "deadlock after {completed} completed task(s): no task available among {}",
        .remaining.join(", ")
    )]
    Deadlock {
        completed: usize,
        remaining: Vec<String>,
    },
    /// A task was handed to a worker that still holds another one
    #[error("worker {worker} is busy with {current}, cannot take {requested}")]
    WorkerBusy {
        worker: usize,
        current: String,
        requested: String,
    },
    /// A task was started or completed while not available
    #[error("task {0} is not ready")]
    TaskNotReady(String),
    /// A task was completed twice
    #[error("task {0} is already completed")]
    AlreadyCompleted(String),
    /// The timed scheduler only knows durations for single letters A-Z
    #[error("no duration for task '{0}': expected a single letter A-Z")]
    NoDuration(String),
    /// `base_duration` plus the letter offset does not fit a `u32`
    #[error("duration of task {task} overflows with base duration {base_duration}")]
    DurationOverflow { task: String, base_duration: u32 },
    /// The elapsed time reached `u32::MAX` before every task completed
    #[error("elapsed time overflowed after {0} time units")]
    ClockOverflow(u32),
    /// The timed scheduler needs at least one worker
    #[error("worker pool must hold at least one worker")]
    EmptyWorkerPool,
}
