//! Per-run task state and availability queries

use super::error::ScheduleError;
use super::graph::{DependencyGraph, TaskKey};

/// Lifecycle of a task during one scheduling run
///
/// Moves forward only: `Pending` → `InProgress` → `Completed`, or straight
/// from `Pending` to `Completed` for zero-duration scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskState {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Mutable state of every task in a graph, owned by a scheduler loop
#[derive(Debug, Clone)]
pub struct Progress<'g> {
    graph: &'g DependencyGraph,
    states: Vec<TaskState>,
    completed: usize,
}

impl<'g> Progress<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            states: vec![TaskState::Pending; graph.len()],
            completed: 0,
        }
    }

    pub fn graph(&self) -> &'g DependencyGraph {
        self.graph
    }

    pub fn state(&self, key: TaskKey) -> TaskState {
        self.states[key.index()]
    }

    /// Pending, and every prerequisite completed
    pub fn is_available(&self, key: TaskKey) -> bool {
        self.state(key) == TaskState::Pending
            && self
                .graph
                .task(key)
                .prerequisites()
                .iter()
                .all(|&prerequisite| self.state(prerequisite) == TaskState::Completed)
    }

    /// The available task that wins the tie-break, if any
    pub fn first_available(&self) -> Option<TaskKey> {
        self.available().next()
    }

    /// Available tasks in tie-break order
    pub fn available(&self) -> impl Iterator<Item = TaskKey> + '_ {
        self.graph.keys().filter(|&key| self.is_available(key))
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.states.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    /// Mark an available task as in progress
    pub fn start(&mut self, key: TaskKey) -> Result<(), ScheduleError> {
        if !self.is_available(key) {
            return Err(ScheduleError::TaskNotReady(self.graph.id(key).to_string()));
        }
        self.states[key.index()] = TaskState::InProgress;
        Ok(())
    }

    /// Mark a task completed. Pending tasks must be available.
    pub fn complete(&mut self, key: TaskKey) -> Result<(), ScheduleError> {
        match self.state(key) {
            TaskState::Completed => {
                return Err(ScheduleError::AlreadyCompleted(
                    self.graph.id(key).to_string(),
                ));
            }
            TaskState::Pending if !self.is_available(key) => {
                return Err(ScheduleError::TaskNotReady(self.graph.id(key).to_string()));
            }
            TaskState::Pending | TaskState::InProgress => {}
        }
        self.states[key.index()] = TaskState::Completed;
        self.completed += 1;
        Ok(())
    }

    /// Deadlock error describing the tasks that never completed
    pub fn deadlock(&self) -> ScheduleError {
        let remaining = self
            .graph
            .keys()
            .filter(|&key| self.state(key) != TaskState::Completed)
            .map(|key| self.graph.id(key).to_string())
            .collect();
        ScheduleError::Deadlock {
            completed: self.completed,
            remaining,
        }
    }
}
