//! Named weighting strategies.

use std::fmt;

use super::types::{Criterion, CriterionSet};
use crate::error::{ScoringError, ScoringResult};

/// Tolerance when checking that custom weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight of each criterion in the composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependents: f64,
}

impl Weights {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependents: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependents,
        }
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Urgency => self.urgency,
            Criterion::Importance => self.importance,
            Criterion::Effort => self.effort,
            Criterion::Dependents => self.dependents,
        }
    }

    pub fn sum(&self) -> f64 {
        Criterion::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Weighted contribution of `criterion` for a task.
    pub fn contribution(&self, criteria: &CriterionSet, criterion: Criterion) -> f64 {
        criteria.get(criterion) * self.get(criterion)
    }

    /// Weighted sum of all criteria, in `[0, 1]` for valid weights.
    pub fn aggregate(&self, criteria: &CriterionSet) -> f64 {
        Criterion::ALL
            .iter()
            .map(|&c| self.contribution(criteria, c))
            .sum()
    }

    /// Validates that every weight is finite and non-negative and that
    /// the weights sum to one. Negative zero is rejected so scores never
    /// carry a negative sign.
    pub fn validate(&self) -> ScoringResult<()> {
        for c in Criterion::ALL {
            let w = self.get(c);
            if !w.is_finite() || w.is_sign_negative() {
                return Err(ScoringError::config(format!(
                    "{} weight must be finite and non-negative, got {w}",
                    c.name()
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::config(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// A named preset over the four criteria.
///
/// | strategy | urgency | importance | effort | dependents |
/// |---|---|---|---|---|
/// | `fastest` | 0.20 | 0.20 | 0.50 | 0.10 |
/// | `high_impact` | 0.20 | 0.60 | 0.10 | 0.10 |
/// | `deadline` | 0.60 | 0.20 | 0.10 | 0.10 |
/// | `smart_balance` | 0.35 | 0.35 | 0.15 | 0.15 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Favors quick wins.
    Fastest,
    /// Favors important tasks.
    HighImpact,
    /// Favors tasks closest to (or past) their due date.
    Deadline,
    /// Balanced default.
    #[default]
    SmartBalance,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Fastest,
        Strategy::HighImpact,
        Strategy::Deadline,
        Strategy::SmartBalance,
    ];

    /// Looks up a strategy by name, case-insensitively.
    ///
    /// Absent or unrecognized names fall back to [`Strategy::SmartBalance`].
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::to_lowercase).as_deref() {
            Some("fastest") => Strategy::Fastest,
            Some("high_impact") => Strategy::HighImpact,
            Some("deadline") => Strategy::Deadline,
            _ => Strategy::SmartBalance,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Fastest => "fastest",
            Strategy::HighImpact => "high_impact",
            Strategy::Deadline => "deadline",
            Strategy::SmartBalance => "smart_balance",
        }
    }

    pub fn weights(&self) -> Weights {
        match self {
            Strategy::Fastest => Weights::new(0.2, 0.2, 0.5, 0.1),
            Strategy::HighImpact => Weights::new(0.2, 0.6, 0.1, 0.1),
            Strategy::Deadline => Weights::new(0.6, 0.2, 0.1, 0.1),
            Strategy::SmartBalance => Weights::new(0.35, 0.35, 0.15, 0.15),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
