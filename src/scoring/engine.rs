//! Batch scoring engine.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use super::config::ScoringConfig;
use super::criteria::{normalize_batch, RawSignals};
use super::explain::{ExplainInput, Explainer};
use super::strategy::{Strategy, Weights};
use super::types::{ScoredTask, Task};
use crate::date::is_unparsable;
use crate::error::{ScoringError, ScoringResult};
use crate::graph::{DependencyGraph, TaskId};

/// Upper bound of the composite score.
pub const MAX_SCORE: f64 = 10.0;

/// Default number of tasks to request from [`ScoringEngine::suggest`].
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Scores and ranks batches of tasks.
///
/// The engine holds only immutable configuration, so one instance can be
/// shared across threads. Each call works on its own copy of the batch.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_taskrank::scoring::{ScoringConfig, ScoringEngine, Strategy, Task};
///
/// let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
/// let engine = ScoringEngine::new(
///     ScoringConfig::default()
///         .with_strategy(Strategy::Deadline)
///         .with_today(today),
/// )
/// .unwrap();
///
/// let ranked = engine.score(&[
///     Task::new("later").with_due_date("2025-06-30"),
///     Task::new("overdue").with_due_date("2025-05-18"),
/// ]);
///
/// assert_eq!(ranked[0].title, "overdue");
/// assert!(ranked[0].explanation.starts_with("Past due"));
/// ```
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    weights: Weights,
    explainer: Explainer,
}

impl ScoringEngine {
    /// Creates an engine from a validated configuration.
    pub fn new(config: ScoringConfig) -> ScoringResult<Self> {
        config.validate()?;
        Ok(Self {
            weights: config.effective_weights(),
            explainer: Explainer::new(config.max_factors, config.quick_win_threshold),
            config,
        })
    }

    /// Creates an engine with default settings and the given preset.
    pub fn for_strategy(strategy: Strategy) -> Self {
        let config = ScoringConfig::default().with_strategy(strategy);
        Self {
            weights: config.effective_weights(),
            explainer: Explainer::new(config.max_factors, config.quick_win_threshold),
            config,
        }
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The resolved criterion weights.
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// The reference date for the next call.
    fn today(&self) -> NaiveDate {
        self.config
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Scores `tasks` and returns them ranked by descending score.
    ///
    /// "Today" is read once for the whole batch.
    pub fn score(&self, tasks: &[Task]) -> Vec<ScoredTask> {
        self.score_at(tasks, self.today())
    }

    /// Scores `tasks` against an explicit reference date.
    pub fn score_at(&self, tasks: &[Task], today: NaiveDate) -> Vec<ScoredTask> {
        tracing::debug!(
            tasks = tasks.len(),
            strategy = %self.config.strategy,
            %today,
            "scoring task batch"
        );

        let ids = assign_ids(tasks);
        let known: HashSet<TaskId> = ids.iter().copied().collect();
        let dependencies: Vec<Vec<TaskId>> = tasks
            .iter()
            .zip(&ids)
            .map(|(task, &id)| sanitize_dependencies(task, id, &known))
            .collect();

        let graph =
            DependencyGraph::from_edges(ids.iter().copied().zip(dependencies.iter().cloned()));
        let cycles = graph.cycle_members();
        if !cycles.is_empty() {
            tracing::debug!(count = cycles.len(), "tasks on dependency cycles");
        }
        let dependents = graph.dependents_counts();

        let signals: Vec<RawSignals> = tasks
            .iter()
            .zip(&ids)
            .map(|(task, id)| {
                let count = dependents.get(id).copied().unwrap_or(0);
                RawSignals::from_task(task, count, today, self.config.undated_days)
            })
            .collect();
        let criteria = normalize_batch(&signals);

        let mut scored: Vec<ScoredTask> = Vec::with_capacity(tasks.len());
        for (i, (task, deps)) in tasks.iter().zip(dependencies).enumerate() {
            let id = ids[i];
            let raw = &signals[i];
            let set = criteria[i];
            let in_cycle = cycles.contains(&id);
            let invalid_due_date = is_unparsable(task.due_date.as_ref());
            if invalid_due_date {
                tracing::debug!(id, "unparsable due date treated as undated");
            }

            let explanation = self.explainer.explain(&ExplainInput {
                criteria: &set,
                weights: &self.weights,
                days_left: raw.days_left,
                importance: raw.importance,
                dependents: raw.dependents,
                in_cycle,
                invalid_due_date,
            });

            scored.push(ScoredTask {
                id,
                title: task.title.clone(),
                due_date: task.due_date.clone(),
                estimated_hours: task.estimated_hours,
                importance: task.importance,
                dependencies: deps,
                score: round4(MAX_SCORE * self.weights.aggregate(&set)).clamp(0.0, MAX_SCORE),
                explanation,
                in_cycle,
                criteria: set,
            });
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            tasks = scored.len(),
            top = ?scored.first().map(|t| t.id),
            "scored task batch"
        );
        scored
    }

    /// Scores a dynamically typed batch.
    ///
    /// Fails with [`ScoringError::NotASequence`] before any scoring if
    /// `value` is not an array, and with [`ScoringError::InvalidTask`] if an
    /// element cannot be read as a task record.
    pub fn score_json(&self, value: &Value) -> ScoringResult<Vec<ScoredTask>> {
        let items = value.as_array().ok_or(ScoringError::NotASequence {
            found: json_type_name(value),
        })?;

        let tasks = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Task::deserialize(item).map_err(|source| ScoringError::InvalidTask { index, source })
            })
            .collect::<ScoringResult<Vec<Task>>>()?;

        Ok(self.score(&tasks))
    }

    /// Returns the `n` highest-ranked tasks.
    pub fn suggest(&self, tasks: &[Task], n: usize) -> Vec<ScoredTask> {
        let mut ranked = self.score(tasks);
        ranked.truncate(n);
        ranked
    }

    /// Scores independent batches against one shared reference date.
    ///
    /// With the `parallel` feature the batches are scored on the rayon pool.
    pub fn score_batches(&self, batches: &[Vec<Task>]) -> Vec<Vec<ScoredTask>> {
        let today = self.today();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            batches
                .par_iter()
                .map(|batch| self.score_at(batch, today))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            batches
                .iter()
                .map(|batch| self.score_at(batch, today))
                .collect()
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::for_strategy(Strategy::default())
    }
}

/// Gives every task a unique id.
///
/// Explicit ids win in batch order; tasks without one take their 1-based
/// position. Anything left over (repeated explicit ids, positions already
/// claimed) takes the smallest free positive id.
fn assign_ids(tasks: &[Task]) -> Vec<TaskId> {
    let mut taken: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    let mut ids: Vec<Option<TaskId>> = vec![None; tasks.len()];

    for (i, task) in tasks.iter().enumerate() {
        if let Some(id) = task.id {
            if taken.insert(id) {
                ids[i] = Some(id);
            } else {
                tracing::warn!(id, index = i, "duplicate task id, reassigning");
            }
        }
    }

    for (i, task) in tasks.iter().enumerate() {
        if task.id.is_none() {
            let position = i as TaskId + 1;
            if taken.insert(position) {
                ids[i] = Some(position);
            }
        }
    }

    let mut next: TaskId = 0;
    ids.into_iter()
        .map(|id| {
            id.unwrap_or_else(|| {
                loop {
                    next += 1;
                    if taken.insert(next) {
                        break;
                    }
                }
                next
            })
        })
        .collect()
}

/// Resolves dependency references, keeping only ids present in the batch.
fn sanitize_dependencies(task: &Task, id: TaskId, known: &HashSet<TaskId>) -> Vec<TaskId> {
    task.dependencies
        .iter()
        .filter_map(|dep| {
            let resolved = dep.resolve().filter(|d| known.contains(d));
            if resolved.is_none() {
                tracing::trace!(task = id, dependency = ?dep, "dropping unresolved dependency");
            }
            resolved
        })
        .collect()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
