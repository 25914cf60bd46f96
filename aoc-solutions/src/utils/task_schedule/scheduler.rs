//! Serial and timed schedulers

use super::error::ScheduleError;
use super::graph::{DependencyGraph, TaskKey};
use super::progress::Progress;
use super::worker::{Worker, WorkerPool};
use itertools::Itertools;
use tracing::{debug, trace};

/// Worker pool size and duration offset for the timed scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub worker_pool_size: usize,
    /// Added to every task's letter-derived duration
    pub base_duration: u32,
}

impl ScheduleConfig {
    /// Puzzle walkthrough: 2 workers, no offset
    pub const EXAMPLE: Self = Self::new(2, 0);
    /// Real puzzle input: 5 workers, 60 time units offset
    pub const FULL_SCALE: Self = Self::new(5, 60);

    pub const fn new(worker_pool_size: usize, base_duration: u32) -> Self {
        Self {
            worker_pool_size,
            base_duration,
        }
    }

    pub fn duration(&self, id: &str) -> Result<u32, ScheduleError> {
        task_duration(id, self.base_duration)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::FULL_SCALE
    }
}

/// `base_duration + 1` for `A`, up to `base_duration + 26` for `Z`
pub fn task_duration(id: &str, base_duration: u32) -> Result<u32, ScheduleError> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(letter @ 'A'..='Z'), None) => base_duration
            .checked_add(letter as u32 - 'A' as u32 + 1)
            .ok_or_else(|| ScheduleError::DurationOverflow {
                task: id.to_string(),
                base_duration,
            }),
        _ => Err(ScheduleError::NoDuration(id.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SerialState {
    Running,
    Done,
}

/// Completes one available task per step, with zero duration
///
/// Yields tasks in completion order. A deadlock is yielded once as an error,
/// after which the iterator is exhausted.
pub struct SerialScheduler<'g> {
    progress: Progress<'g>,
    state: SerialState,
}

impl<'g> SerialScheduler<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            progress: Progress::new(graph),
            state: SerialState::Running,
        }
    }

    pub fn progress(&self) -> &Progress<'g> {
        &self.progress
    }
}

impl Iterator for SerialScheduler<'_> {
    type Item = Result<TaskKey, ScheduleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == SerialState::Done {
            return None;
        }
        if self.progress.all_completed() {
            self.state = SerialState::Done;
            return None;
        }

        let Some(key) = self.progress.first_available() else {
            self.state = SerialState::Done;
            return Some(Err(self.progress.deadlock()));
        };
        if let Err(e) = self.progress.complete(key) {
            self.state = SerialState::Done;
            return Some(Err(e));
        }
        trace!(task = self.progress.graph().id(key), "completed");
        Some(Ok(key))
    }
}

impl std::iter::FusedIterator for SerialScheduler<'_> {}

/// Completion order when every task takes zero time
pub fn serial_order(graph: &DependencyGraph) -> Result<Vec<TaskKey>, ScheduleError> {
    SerialScheduler::new(graph).collect()
}

/// A task handed to a worker during an assignment phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub worker: usize,
    pub task: TaskKey,
    pub duration: u32,
}

/// What happened during one simulation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Elapsed time when the step began
    pub time: u32,
    pub assigned: Vec<Assignment>,
    /// Tasks finished in this step's advance phase, in worker order
    pub completed: Vec<TaskKey>,
    /// Idle workers left after the assignment phase
    pub idle_workers: usize,
    /// Available tasks left unassigned after the assignment phase
    pub backlog: usize,
}

/// Final result of a timed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedOutcome {
    /// Elapsed time when the last task completed
    pub elapsed: u32,
    /// Tasks in the order they completed
    pub order: Vec<TaskKey>,
}

/// Discrete-time simulation of a worker pool working through the graph
///
/// Each [`step`](Self::step) runs an assignment phase, then an advance phase,
/// then adds one to the elapsed time. A worker freed in the advance phase of
/// step `T` takes new work in the assignment phase of step `T + 1`.
pub struct TimedScheduler<'g> {
    progress: Progress<'g>,
    pool: WorkerPool,
    base_duration: u32,
    elapsed: u32,
    order: Vec<TaskKey>,
}

impl<'g> TimedScheduler<'g> {
    pub fn new(graph: &'g DependencyGraph, config: ScheduleConfig) -> Result<Self, ScheduleError> {
        Ok(Self {
            progress: Progress::new(graph),
            pool: WorkerPool::new(config.worker_pool_size)?,
            base_duration: config.base_duration,
            elapsed: 0,
            order: Vec::with_capacity(graph.len()),
        })
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_done(&self) -> bool {
        self.progress.all_completed()
    }

    pub fn workers(&self) -> &[Worker] {
        self.pool.workers()
    }

    pub fn progress(&self) -> &Progress<'g> {
        &self.progress
    }

    /// Run one time unit
    pub fn step(&mut self) -> Result<StepReport, ScheduleError> {
        let time = self.elapsed;
        let assigned = self.assign_idle_workers()?;

        let idle_workers = self.pool.idle_count();
        if idle_workers == self.pool.len() && !self.progress.all_completed() {
            return Err(self.progress.deadlock());
        }
        let backlog = self.progress.available().count();

        debug!(time, workers = %self.render_workers(), "step");

        let mut completed = Vec::new();
        for (worker, task) in self.pool.tick() {
            self.progress.complete(task)?;
            trace!(time, worker, task = self.progress.graph().id(task), "completed");
            self.order.push(task);
            completed.push(task);
        }

        self.elapsed = self
            .elapsed
            .checked_add(1)
            .ok_or(ScheduleError::ClockOverflow(self.elapsed))?;

        Ok(StepReport {
            time,
            assigned,
            completed,
            idle_workers,
            backlog,
        })
    }

    /// Step until every task is completed
    pub fn run(mut self) -> Result<TimedOutcome, ScheduleError> {
        while !self.is_done() {
            self.step()?;
        }
        Ok(TimedOutcome {
            elapsed: self.elapsed,
            order: self.order,
        })
    }

    fn assign_idle_workers(&mut self) -> Result<Vec<Assignment>, ScheduleError> {
        let graph = self.progress.graph();
        let mut assigned = Vec::new();

        while let Some(worker) = self.pool.first_idle() {
            let Some(task) = self.progress.first_available() else {
                break;
            };
            let duration = task_duration(graph.id(task), self.base_duration)?;

            self.progress.start(task)?;
            self.pool
                .assign(worker, task, duration)
                .map_err(|busy| ScheduleError::WorkerBusy {
                    worker: busy.worker,
                    current: graph.id(busy.current).to_string(),
                    requested: graph.id(task).to_string(),
                })?;

            trace!(time = self.elapsed, worker, task = graph.id(task), duration, "assigned");
            assigned.push(Assignment {
                worker,
                task,
                duration,
            });
        }
        Ok(assigned)
    }

    /// Task held by each worker, `.` when idle
    fn render_workers(&self) -> String {
        let graph = self.progress.graph();
        self.pool
            .workers()
            .iter()
            .map(|worker| worker.task().map_or(".", |task| graph.id(task)))
            .join(" ")
    }
}

/// Total time for the worker pool to complete every task
pub fn timed_completion(
    graph: &DependencyGraph,
    config: ScheduleConfig,
) -> Result<TimedOutcome, ScheduleError> {
    TimedScheduler::new(graph, config)?.run()
}
