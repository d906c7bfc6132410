//! Multi-criteria task scoring.
//!
//! Ranks a batch of tasks by a composite score built from four criteria:
//!
//! - **Urgency**: days until the due date; past-due tasks are most urgent.
//! - **Importance**: the caller's 1-10 rating.
//! - **Effort**: estimated hours, inverted so that quick wins score high.
//! - **Dependents**: how many tasks in the batch wait on this one.
//!
//! Each criterion is min-max normalized across the batch, weighted by a
//! [`Strategy`] preset (or custom [`Weights`]) and scaled to `[0, 10]`.
//! Every scored task carries a short explanation naming its dominant
//! factors and any anomalies, such as a dependency cycle or an
//! unparsable due date.
//!
//! # Design
//!
//! Scoring is a pure function of the batch, the weights and a "today"
//! reference fixed once per call. No state survives between calls.
//!
//! # References
//!
//! Weighted-sum multi-criteria ranking: Triantaphyllou (2000),
//! "Multi-Criteria Decision Making Methods: A Comparative Study"

mod config;
mod criteria;
mod engine;
mod explain;
mod normalize;
mod strategy;
mod types;

pub use config::ScoringConfig;
pub use criteria::{normalize_batch, RawSignals};
pub use engine::{ScoringEngine, DEFAULT_SUGGESTIONS, MAX_SCORE};
pub use explain::{ExplainInput, Explainer};
pub use normalize::{normalize, Range};
pub use strategy::{Strategy, Weights};
pub use types::{Criterion, CriterionSet, DependencyRef, ScoredTask, Task};

/// Scores `tasks` with default settings and the named strategy.
///
/// Unknown or absent strategy names select `smart_balance`.
pub fn score_tasks(tasks: &[Task], strategy: Option<&str>) -> Vec<ScoredTask> {
    ScoringEngine::for_strategy(Strategy::from_name(strategy)).score(tasks)
}
