//! Per-task raw signals and their batch-wide normalization.
//!
//! Degenerate ranges are not handled uniformly. Urgency and importance
//! fall back to a neutral `0.5`; effort falls back to `0.5` before
//! inversion and so also ends at `0.5`; dependents fall back to `0.0`.
//! Ranking outcomes depend on this asymmetry, so it is kept as is.

use chrono::NaiveDate;

use super::normalize::Range;
use super::types::{CriterionSet, Task};
use crate::date::parse_due_date;

/// Fallback for urgency and importance when every task has the same value.
const NEUTRAL: f64 = 0.5;

/// Raw, un-normalized signals of one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSignals {
    /// Days until the due date; negative when past due.
    pub days_left: i64,
    pub importance: i64,
    pub hours: f64,
    /// Number of dependency entries in the batch naming this task.
    pub dependents: usize,
}

impl RawSignals {
    /// Derives the raw signals of `task`.
    ///
    /// `today` must be fixed for the whole batch. Tasks without a parseable
    /// due date are treated as due in `undated_days`.
    pub fn from_task(task: &Task, dependents: usize, today: NaiveDate, undated_days: i64) -> Self {
        let days_left = parse_due_date(task.due_date.as_ref())
            .map(|due| (due - today).num_days())
            .unwrap_or(undated_days);

        Self {
            days_left,
            importance: task.importance_or_default(),
            hours: task.hours(),
            dependents,
        }
    }

    /// Urgency grows as the due date approaches and keeps growing once past due.
    pub fn urgency(&self) -> f64 {
        -(self.days_left as f64)
    }
}

/// Normalizes the raw signals of a whole batch.
///
/// The output is aligned with `signals`. Non-finite raw values do not
/// widen a range and take the criterion's degenerate fallback.
pub fn normalize_batch(signals: &[RawSignals]) -> Vec<CriterionSet> {
    let urgency = Range::of(signals.iter().map(RawSignals::urgency)).unwrap_or_default();
    let importance = Range::of(signals.iter().map(|s| s.importance as f64)).unwrap_or_default();
    let effort = Range::of(signals.iter().map(|s| s.hours)).unwrap_or_default();
    let dependents = Range::of(signals.iter().map(|s| s.dependents as f64)).unwrap_or_default();

    signals
        .iter()
        .map(|s| CriterionSet {
            urgency: urgency.normalize_or(s.urgency(), NEUTRAL),
            importance: importance.normalize_or(s.importance as f64, NEUTRAL),
            effort: 1.0 - effort.normalize_or(s.hours, NEUTRAL),
            dependents: dependents.normalize(s.dependents as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn signals(days_left: i64, importance: i64, hours: f64, dependents: usize) -> RawSignals {
        RawSignals {
            days_left,
            importance,
            hours,
            dependents,
        }
    }

    #[test]
    fn test_days_left_from_due_date() {
        let task = Task::new("t").with_due_date(today() - Days::new(3));
        assert_eq!(RawSignals::from_task(&task, 0, today(), 30).days_left, -3);

        let task = Task::new("t").with_due_date("2025-05-25");
        assert_eq!(RawSignals::from_task(&task, 0, today(), 30).days_left, 5);
    }

    #[test]
    fn test_undated_uses_placeholder() {
        let raw = RawSignals::from_task(&Task::new("t"), 2, today(), 30);
        assert_eq!(raw.days_left, 30);
        assert_eq!(raw.importance, 5);
        assert_eq!(raw.hours, 1.0);
        assert_eq!(raw.dependents, 2);

        let bad = Task::new("t").with_due_date("not-a-date");
        assert_eq!(RawSignals::from_task(&bad, 0, today(), 30).days_left, 30);
    }

    #[test]
    fn test_single_task_fallbacks() {
        let out = normalize_batch(&[signals(4, 7, 3.0, 1)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].urgency, 0.5);
        assert_eq!(out[0].importance, 0.5);
        assert_eq!(out[0].effort, 0.5);
        assert_eq!(out[0].dependents, 0.0);
    }

    #[test]
    fn test_spread_batch() {
        let out = normalize_batch(&[signals(-2, 10, 1.0, 0), signals(8, 2, 5.0, 4)]);

        // Past-due task is the most urgent.
        assert_eq!(out[0].urgency, 1.0);
        assert_eq!(out[1].urgency, 0.0);
        assert_eq!(out[0].importance, 1.0);
        assert_eq!(out[1].importance, 0.0);
        // Shorter task gets the higher (inverted) effort value.
        assert_eq!(out[0].effort, 1.0);
        assert_eq!(out[1].effort, 0.0);
        assert_eq!(out[0].dependents, 0.0);
        assert_eq!(out[1].dependents, 1.0);
    }

    #[test]
    fn test_identical_dependents_collapse_to_zero() {
        let out = normalize_batch(&[signals(1, 3, 1.0, 2), signals(2, 4, 2.0, 2)]);
        assert!(out.iter().all(|c| c.dependents == 0.0));
    }

    #[test]
    fn test_empty_batch() {
        assert!(normalize_batch(&[]).is_empty());
    }

    #[test]
    fn test_non_finite_hours_take_fallback() {
        let out = normalize_batch(&[
            signals(1, 3, f64::INFINITY, 0),
            signals(2, 4, 2.0, 0),
            signals(3, 5, 4.0, 0),
            signals(4, 6, f64::NAN, 0),
        ]);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].effort, 0.5);
        assert_eq!(out[1].effort, 1.0);
        assert_eq!(out[2].effort, 0.0);
        assert_eq!(out[3].effort, 0.5);
    }

    #[test]
    fn test_all_non_finite_hours_stay_aligned() {
        let out = normalize_batch(&[signals(1, 3, f64::INFINITY, 0), signals(2, 4, f64::INFINITY, 1)]);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.effort == 0.5));
        assert_eq!(out[1].dependents, 1.0);
    }
}
