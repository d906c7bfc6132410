//! Task records, scored output, and per-criterion values.

use serde::{Deserialize, Deserializer, Serialize};

use crate::date::DueDate;
use crate::error::{ScoringError, ScoringResult};
use crate::graph::TaskId;

/// A reference to another task, as supplied by the caller.
///
/// Integers are taken as-is, booleans read as `1` and `0`, and strings of
/// ASCII digits are coerced to integers. Every other value is kept only so
/// that a batch can still be read; it never resolves to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyRef {
    Id(TaskId),
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

impl DependencyRef {
    /// Returns the task id this reference names, if it is well formed.
    pub fn resolve(&self) -> Option<TaskId> {
        match self {
            DependencyRef::Id(id) => Some(*id),
            DependencyRef::Flag(flag) => Some(TaskId::from(*flag)),
            DependencyRef::Text(text)
                if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) =>
            {
                text.parse().ok()
            }
            _ => None,
        }
    }
}

impl From<TaskId> for DependencyRef {
    fn from(id: TaskId) -> Self {
        DependencyRef::Id(id)
    }
}

impl From<&str> for DependencyRef {
    fn from(text: &str) -> Self {
        DependencyRef::Text(text.to_string())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A task to be ranked.
///
/// Every field but the title may be omitted; the engine fills in defaults
/// (position-based id, 1.0 hours, importance 5, no dependencies).
///
/// # Examples
///
/// ```
/// use u_taskrank::scoring::Task;
///
/// let task = Task::new("Write release notes")
///     .with_due_date("2025-06-01")
///     .with_importance(7)
///     .with_estimated_hours(0.5)
///     .with_dependencies([2, 3]);
/// assert!(task.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Caller-assigned id; the 1-based position is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Due date, typed or as ISO-8601 text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,

    /// Estimated effort in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    /// Importance on a 1-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i64>,

    /// Tasks this one waits on.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<DependencyRef>,
}

impl Task {
    pub const DEFAULT_HOURS: f64 = 1.0;
    pub const DEFAULT_IMPORTANCE: i64 = 5;

    /// Creates a task with the given title and all other fields unset.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit id.
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the due date from a typed date or text.
    pub fn with_due_date(mut self, due: impl Into<DueDate>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    /// Sets the estimated effort in hours.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the importance.
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Replaces the dependencies with the given task ids.
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies = deps.into_iter().map(DependencyRef::Id).collect();
        self
    }

    /// Replaces the dependencies with raw references.
    pub fn with_dependency_refs(mut self, deps: Vec<DependencyRef>) -> Self {
        self.dependencies = deps;
        self
    }

    /// Estimated hours, defaulting to 1.0.
    pub fn hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(Self::DEFAULT_HOURS)
    }

    /// Importance, defaulting to 5.
    pub fn importance_or_default(&self) -> i64 {
        self.importance.unwrap_or(Self::DEFAULT_IMPORTANCE)
    }

    /// Checks field shapes: non-blank title, importance within 1-10 and
    /// positive finite hours.
    ///
    /// The engine itself never calls this; it is meant for the layer that
    /// accepts records from users.
    pub fn validate(&self) -> ScoringResult<()> {
        let label = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("'{}'", self.title));

        if self.title.trim().is_empty() {
            return Err(ScoringError::validation(label, "title must not be blank"));
        }
        if let Some(importance) = self.importance {
            if !(1..=10).contains(&importance) {
                return Err(ScoringError::validation(
                    label,
                    format!("importance must be 1-10, got {importance}"),
                ));
            }
        }
        if let Some(hours) = self.estimated_hours {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(ScoringError::validation(
                    label,
                    format!("estimated hours must be positive, got {hours}"),
                ));
            }
        }
        Ok(())
    }
}

/// One of the four ranking criteria.
///
/// The declaration order is also the tie-break order when ranking
/// contributions for explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Urgency,
    Importance,
    Effort,
    Dependents,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Urgency,
        Criterion::Importance,
        Criterion::Effort,
        Criterion::Dependents,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Urgency => "urgency",
            Criterion::Importance => "importance",
            Criterion::Effort => "effort",
            Criterion::Dependents => "dependents",
        }
    }
}

/// Normalized criterion values of one task, each in `[0, 1]`.
///
/// Higher is always better: effort is already inverted so that short
/// tasks score high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionSet {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependents: f64,
}

impl CriterionSet {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Urgency => self.urgency,
            Criterion::Importance => self.importance,
            Criterion::Effort => self.effort,
            Criterion::Dependents => self.dependents,
        }
    }
}

/// A task with its score, cycle flag and explanation.
///
/// `due_date`, `estimated_hours` and `importance` echo the input exactly;
/// `dependencies` holds the sanitized ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// Unique id after assignment.
    pub id: TaskId,
    pub title: String,
    pub due_date: Option<DueDate>,
    pub estimated_hours: Option<f64>,
    pub importance: Option<i64>,
    /// Dependency ids that name a task in the batch.
    pub dependencies: Vec<TaskId>,

    /// Priority score in `[0, 10]`, rounded to four decimals.
    pub score: f64,
    /// Dominant factors followed by anomaly notes.
    pub explanation: String,
    /// Whether the task lies on a dependency cycle.
    pub in_cycle: bool,
    /// Normalized criterion values behind the score.
    pub criteria: CriterionSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_ref_resolution() {
        assert_eq!(DependencyRef::Id(4).resolve(), Some(4));
        assert_eq!(DependencyRef::from("12").resolve(), Some(12));
        assert_eq!(DependencyRef::from("").resolve(), None);
        assert_eq!(DependencyRef::from("-3").resolve(), None);
        assert_eq!(DependencyRef::from("task-2").resolve(), None);
        assert_eq!(DependencyRef::from(" 2").resolve(), None);
        assert_eq!(DependencyRef::Other(serde_json::json!(1.5)).resolve(), None);
        assert_eq!(DependencyRef::Flag(true).resolve(), Some(1));
        assert_eq!(DependencyRef::Flag(false).resolve(), Some(0));
    }

    #[test]
    fn test_boolean_dependencies_read_as_ids() {
        let task: Task =
            serde_json::from_str(r#"{"title": "A", "dependencies": [true, false]}"#).unwrap();
        assert_eq!(
            task.dependencies,
            vec![DependencyRef::Flag(true), DependencyRef::Flag(false)]
        );
        let resolved: Vec<_> = task.dependencies.iter().filter_map(DependencyRef::resolve).collect();
        assert_eq!(resolved, vec![1, 0]);
    }

    #[test]
    fn test_task_deserialize_minimal() {
        let task: Task = serde_json::from_str(r#"{"title": "A"}"#).unwrap();
        assert_eq!(task.id, None);
        assert_eq!(task.hours(), 1.0);
        assert_eq!(task.importance_or_default(), 5);
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_task_deserialize_mixed_dependencies() {
        let task: Task =
            serde_json::from_str(r#"{"title": "A", "dependencies": [1, "2", "x", 3.5, null]}"#)
                .unwrap();
        let resolved: Vec<_> = task.dependencies.iter().filter_map(DependencyRef::resolve).collect();
        assert_eq!(resolved, vec![1, 2]);
        assert_eq!(task.dependencies.len(), 5);
    }

    #[test]
    fn test_task_null_dependencies() {
        let task: Task = serde_json::from_str(r#"{"title": "A", "dependencies": null}"#).unwrap();
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_validate_rules() {
        assert!(Task::new("ok").with_importance(10).validate().is_ok());
        assert!(Task::new("  ").validate().is_err());
        assert!(Task::new("a").with_importance(0).validate().is_err());
        assert!(Task::new("a").with_importance(11).validate().is_err());
        assert!(Task::new("a").with_estimated_hours(0.0).validate().is_err());
        assert!(Task::new("a").with_estimated_hours(f64::NAN).validate().is_err());

        let err = Task::new("a").with_id(7).with_importance(42).validate().unwrap_err();
        assert_eq!(err.to_string(), "task 7: importance must be 1-10, got 42");
    }

    #[test]
    fn test_criterion_set_lookup() {
        let set = CriterionSet {
            urgency: 0.1,
            importance: 0.2,
            effort: 0.3,
            dependents: 0.4,
        };
        let values: Vec<f64> = Criterion::ALL.iter().map(|&c| set.get(c)).collect();
        assert_eq!(values, vec![0.1, 0.2, 0.3, 0.4]);
    }
}
