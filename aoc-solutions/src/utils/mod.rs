//! Shared building blocks for solutions

pub mod task_schedule;
