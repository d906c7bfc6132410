//! Task dependency graph analysis.
//!
//! Builds a directed graph in which every edge points from a task to a
//! task it depends on, and reports:
//!
//! - **Cycle membership**: every task lying on at least one dependency
//!   cycle, including tasks that depend on themselves.
//! - **Dependents counts**: how many dependency entries across the batch
//!   name each task ("unblocks N tasks").
//!
//! The graph is ephemeral: it is built once per scoring call from the
//! sanitized batch and discarded afterwards.
//!
//! # References
//!
//! Tarjan (1972), "Depth-First Search and Linear Graph Algorithms"

mod dependency;

pub use dependency::{DependencyGraph, TaskId};
