//! Simulated workers for the timed scheduler

use super::error::ScheduleError;
use super::graph::TaskKey;

/// A task slot counting down the remaining duration of its task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    id: usize,
    task: Option<TaskKey>,
    remaining: u32,
}

/// Returned when assigning to a worker that still holds a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerBusy {
    pub worker: usize,
    pub current: TaskKey,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            task: None,
            remaining: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn task(&self) -> Option<TaskKey> {
        self.task
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_idle(&self) -> bool {
        self.task.is_none()
    }

    pub fn assign(&mut self, task: TaskKey, duration: u32) -> Result<(), WorkerBusy> {
        if let Some(current) = self.task {
            return Err(WorkerBusy {
                worker: self.id,
                current,
            });
        }
        self.task = Some(task);
        self.remaining = duration;
        Ok(())
    }

    /// Advance one time unit; returns the task finished by this tick
    pub fn tick(&mut self) -> Option<TaskKey> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.task.take()
        } else {
            None
        }
    }
}

/// Fixed-size, ordered set of workers
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self, ScheduleError> {
        if size == 0 {
            return Err(ScheduleError::EmptyWorkerPool);
        }
        Ok(Self {
            workers: (0..size).map(Worker::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Lowest-ordinal idle worker
    pub fn first_idle(&self) -> Option<usize> {
        self.workers.iter().position(Worker::is_idle)
    }

    pub fn idle_count(&self) -> usize {
        self.workers.iter().filter(|w| w.is_idle()).count()
    }

    pub fn assign(&mut self, worker: usize, task: TaskKey, duration: u32) -> Result<(), WorkerBusy> {
        self.workers[worker].assign(task, duration)
    }

    /// Tick every worker in ordinal order, returning `(worker, task)` for each finished task
    pub fn tick(&mut self) -> Vec<(usize, TaskKey)> {
        self.workers
            .iter_mut()
            .filter_map(|worker| worker.tick().map(|task| (worker.id, task)))
            .collect()
    }
}
