//! Human-readable explanations.
//!
//! An explanation names the dominant weighted criteria of a task and then
//! any anomalies found while scoring it. It is a pure function of an
//! [`ExplainInput`], independent of how the score itself was aggregated.

use super::strategy::Weights;
use super::types::{Criterion, CriterionSet};

/// Separator between explanation phrases.
pub const SEPARATOR: &str = "; ";

/// Explanation used when no phrase applies.
pub const NO_FACTORS: &str = "No special factors";

pub const CYCLE_NOTE: &str = "Circular dependency detected";
pub const INVALID_DATE_NOTE: &str = "Invalid due date format";

/// Everything the explainer needs to know about one task.
#[derive(Debug, Clone, Copy)]
pub struct ExplainInput<'a> {
    pub criteria: &'a CriterionSet,
    pub weights: &'a Weights,
    pub days_left: i64,
    pub importance: i64,
    pub dependents: usize,
    pub in_cycle: bool,
    pub invalid_due_date: bool,
}

/// Builds explanation strings from ranked criterion contributions.
#[derive(Debug, Clone, Copy)]
pub struct Explainer {
    max_factors: usize,
    quick_win_threshold: f64,
}

impl Default for Explainer {
    fn default() -> Self {
        Self {
            max_factors: 2,
            quick_win_threshold: 0.6,
        }
    }
}

impl Explainer {
    pub fn new(max_factors: usize, quick_win_threshold: f64) -> Self {
        Self {
            max_factors,
            quick_win_threshold,
        }
    }

    /// Criteria ordered by weighted contribution, highest first.
    ///
    /// Ties keep [`Criterion::ALL`] order.
    pub fn ranked_criteria(criteria: &CriterionSet, weights: &Weights) -> Vec<(Criterion, f64)> {
        let mut ranked: Vec<(Criterion, f64)> = Criterion::ALL
            .iter()
            .map(|&c| (c, weights.contribution(criteria, c)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Produces the explanation for one task.
    pub fn explain(&self, input: &ExplainInput<'_>) -> String {
        let mut parts: Vec<String> = Self::ranked_criteria(input.criteria, input.weights)
            .into_iter()
            .take(self.max_factors)
            .filter_map(|(criterion, _)| self.phrase(criterion, input))
            .collect();

        if input.in_cycle {
            parts.push(CYCLE_NOTE.to_string());
        }
        if input.invalid_due_date {
            parts.push(INVALID_DATE_NOTE.to_string());
        }

        if parts.is_empty() {
            NO_FACTORS.to_string()
        } else {
            parts.join(SEPARATOR)
        }
    }

    fn phrase(&self, criterion: Criterion, input: &ExplainInput<'_>) -> Option<String> {
        match criterion {
            Criterion::Urgency => Some(match input.days_left {
                d if d < 0 => "Past due".to_string(),
                0 => "Due today".to_string(),
                d => format!("Due in {d}d"),
            }),
            Criterion::Importance => Some(format!("Importance {}", input.importance)),
            Criterion::Effort => Some(if input.criteria.effort > self.quick_win_threshold {
                "Quick win".to_string()
            } else {
                "High effort".to_string()
            }),
            Criterion::Dependents => {
                (input.dependents > 0).then(|| format!("Unblocks {} task(s)", input.dependents))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::strategy::Strategy;

    fn criteria(urgency: f64, importance: f64, effort: f64, dependents: f64) -> CriterionSet {
        CriterionSet {
            urgency,
            importance,
            effort,
            dependents,
        }
    }

    fn input<'a>(criteria: &'a CriterionSet, weights: &'a Weights) -> ExplainInput<'a> {
        ExplainInput {
            criteria,
            weights,
            days_left: 5,
            importance: 8,
            dependents: 0,
            in_cycle: false,
            invalid_due_date: false,
        }
    }

    #[test]
    fn test_top_two_urgency_importance() {
        let c = criteria(1.0, 0.8, 0.0, 0.0);
        let w = Strategy::SmartBalance.weights();
        let text = Explainer::default().explain(&input(&c, &w));
        assert_eq!(text, "Due in 5d; Importance 8");
    }

    #[test]
    fn test_urgency_phrases() {
        let c = criteria(1.0, 0.0, 0.0, 0.0);
        let w = Strategy::Deadline.weights();
        let explainer = Explainer::new(1, 0.6);

        let mut i = input(&c, &w);
        i.days_left = -1;
        assert_eq!(explainer.explain(&i), "Past due");
        i.days_left = 0;
        assert_eq!(explainer.explain(&i), "Due today");
        i.days_left = 12;
        assert_eq!(explainer.explain(&i), "Due in 12d");
    }

    #[test]
    fn test_effort_phrase_uses_normalized_value() {
        let w = Strategy::Fastest.weights();
        let explainer = Explainer::new(1, 0.6);

        let c = criteria(0.0, 0.0, 0.61, 0.0);
        assert_eq!(explainer.explain(&input(&c, &w)), "Quick win");

        let c = criteria(0.0, 0.0, 0.6, 0.0);
        assert_eq!(explainer.explain(&input(&c, &w)), "High effort");
    }

    #[test]
    fn test_dependents_phrase_omitted_when_zero() {
        // Dependents is the only non-zero contribution.
        let c = criteria(0.0, 0.0, 0.0, 1.0);
        let w = Strategy::SmartBalance.weights();
        let explainer = Explainer::new(1, 0.6);

        let mut i = input(&c, &w);
        assert_eq!(explainer.explain(&i), NO_FACTORS);
        i.dependents = 3;
        assert_eq!(explainer.explain(&i), "Unblocks 3 task(s)");
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let c = criteria(0.0, 0.0, 0.0, 0.0);
        let w = Strategy::SmartBalance.weights();
        let ranked = Explainer::ranked_criteria(&c, &w);
        let order: Vec<Criterion> = ranked.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Criterion::ALL.to_vec());

        // Zero contributions still name urgency and importance.
        assert_eq!(Explainer::default().explain(&input(&c, &w)), "Due in 5d; Importance 8");
    }

    #[test]
    fn test_anomaly_notes_appended_in_order() {
        let c = criteria(0.0, 0.0, 0.0, 1.0);
        let w = Strategy::SmartBalance.weights();
        let explainer = Explainer::new(1, 0.6);

        let mut i = input(&c, &w);
        i.in_cycle = true;
        i.invalid_due_date = true;
        assert_eq!(
            explainer.explain(&i),
            "Circular dependency detected; Invalid due date format"
        );
    }

    #[test]
    fn test_high_impact_ranking() {
        let c = criteria(0.5, 0.5, 1.0, 0.0);
        let w = Strategy::HighImpact.weights();
        let ranked = Explainer::ranked_criteria(&c, &w);
        assert_eq!(ranked[0].0, Criterion::Importance);
        assert_eq!(ranked[1].0, Criterion::Urgency);
        assert!((ranked[0].1 - 0.3).abs() < 1e-12);
    }
}
