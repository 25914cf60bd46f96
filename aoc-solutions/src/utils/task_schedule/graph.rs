//! Dependency graph arena
//!
//! Tasks live in a `Vec` sorted by [`tie_break`] order and refer to each other
//! through [`TaskKey`] sets, so comparing two keys compares their ids.

use super::error::GraphError;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Stable key of a task inside a [`DependencyGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskKey(usize);

impl TaskKey {
    /// Position of the task in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Order in which simultaneously available tasks are picked
pub fn tie_break(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// A task and its direct relations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: String,
    prerequisites: BTreeSet<TaskKey>,
    dependents: BTreeSet<TaskKey>,
}

impl Task {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tasks that must complete before this one may start
    pub fn prerequisites(&self) -> &BTreeSet<TaskKey> {
        &self.prerequisites
    }

    /// Tasks that list this one as a prerequisite
    pub fn dependents(&self) -> &BTreeSet<TaskKey> {
        &self.dependents
    }
}

/// Immutable dependency graph built from prerequisite edges
///
/// Cycles are accepted here; the schedulers report them as deadlocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    tasks: Vec<Task>,
}

impl DependencyGraph {
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::default()
    }

    /// Build a graph from `(prerequisite, dependent)` pairs
    pub fn from_edges<I, S>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = Self::builder();
        for (prerequisite, dependent) in edges {
            builder.edge(prerequisite.as_ref(), dependent.as_ref())?;
        }
        Ok(builder.build())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// # Panics
    /// If `key` does not belong to this graph.
    pub fn task(&self, key: TaskKey) -> &Task {
        &self.tasks[key.0]
    }

    pub fn id(&self, key: TaskKey) -> &str {
        self.task(key).id()
    }

    /// Look up the key of a task id
    pub fn key_of(&self, id: &str) -> Option<TaskKey> {
        self.tasks
            .binary_search_by(|task| tie_break(&task.id, id))
            .ok()
            .map(TaskKey)
    }

    /// All keys in tie-break order
    pub fn keys(&self) -> impl Iterator<Item = TaskKey> + '_ {
        (0..self.tasks.len()).map(TaskKey)
    }

    /// Concatenate the ids of `keys` in the given order
    pub fn concat_ids(&self, keys: &[TaskKey]) -> String {
        keys.iter().map(|&key| self.id(key)).join("")
    }
}

/// Collects tasks and edges, then freezes them into a [`DependencyGraph`]
///
/// Edges are stored as sets, so repeating an edge has no effect.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    nodes: BTreeMap<String, Relations>,
}

#[derive(Debug, Default)]
struct Relations {
    prerequisites: BTreeSet<String>,
    dependents: BTreeSet<String>,
}

impl DependencyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a task, with or without edges
    pub fn task(&mut self, id: &str) -> Result<&mut Self, GraphError> {
        validate_id(id)?;
        self.nodes.entry(id.to_string()).or_default();
        Ok(self)
    }

    /// Record that `prerequisite` must finish before `dependent` can begin
    pub fn edge(&mut self, prerequisite: &str, dependent: &str) -> Result<&mut Self, GraphError> {
        validate_id(prerequisite)?;
        validate_id(dependent)?;
        if prerequisite == dependent {
            return Err(GraphError::SelfLoop(prerequisite.to_string()));
        }

        self.nodes
            .entry(prerequisite.to_string())
            .or_default()
            .dependents
            .insert(dependent.to_string());
        self.nodes
            .entry(dependent.to_string())
            .or_default()
            .prerequisites
            .insert(prerequisite.to_string());
        Ok(self)
    }

    pub fn build(self) -> DependencyGraph {
        let ordered: Vec<(String, Relations)> = self
            .nodes
            .into_iter()
            .sorted_by(|(a, _), (b, _)| tie_break(a, b))
            .collect();

        let keys: HashMap<&str, TaskKey> = ordered
            .iter()
            .enumerate()
            .map(|(index, (id, _))| (id.as_str(), TaskKey(index)))
            .collect();
        let resolve = |ids: &BTreeSet<String>| -> BTreeSet<TaskKey> {
            ids.iter().map(|id| keys[id.as_str()]).collect()
        };

        let tasks = ordered
            .iter()
            .map(|(id, relations)| Task {
                id: id.clone(),
                prerequisites: resolve(&relations.prerequisites),
                dependents: resolve(&relations.dependents),
            })
            .collect();

        DependencyGraph { tasks }
    }
}

fn validate_id(id: &str) -> Result<(), GraphError> {
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return Err(GraphError::InvalidTaskId(id.to_string()));
    }
    Ok(())
}
