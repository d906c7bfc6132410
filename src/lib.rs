//! Multi-criteria task prioritization.
//!
//! Provides a scoring engine that ranks a batch of tasks:
//!
//! - **Scoring**: urgency, importance, effort and unblocking value are
//!   normalized across the batch and combined under a weighting strategy
//!   (`fastest`, `high_impact`, `deadline`, `smart_balance`) into a
//!   0-10 score with a short human-readable explanation.
//! - **Dependency graph**: detects every task that lies on a dependency
//!   cycle and counts how many tasks each one unblocks.
//! - **Dates**: best-effort ISO-8601 due date parsing that never fails.
//!
//! # Architecture
//!
//! The crate is a pure computation layer. Request handling, validation
//! of user input and persistence belong to the caller, which hands over
//! a batch of [`scoring::Task`] records and receives ranked
//! [`scoring::ScoredTask`] records.
//!
//! # Examples
//!
//! ```
//! use u_taskrank::scoring::{score_tasks, Task};
//!
//! let ranked = score_tasks(
//!     &[
//!         Task::new("Fix login bug").with_importance(9).with_estimated_hours(2.0),
//!         Task::new("Tidy README").with_importance(2).with_estimated_hours(0.5),
//!     ],
//!     Some("high_impact"),
//! );
//! assert_eq!(ranked[0].title, "Fix login bug");
//! ```

pub mod date;
pub mod error;
pub mod graph;
pub mod scoring;

pub use error::{ScoringError, ScoringResult};
