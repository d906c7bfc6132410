//! Scoring engine configuration.

use chrono::NaiveDate;

use super::strategy::{Strategy, Weights};
use crate::error::{ScoringError, ScoringResult};

/// Configuration for the [`ScoringEngine`](super::ScoringEngine).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_taskrank::scoring::{ScoringConfig, Strategy};
///
/// let config = ScoringConfig::default()
///     .with_strategy(Strategy::Deadline)
///     .with_today(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Named weight preset.
    pub strategy: Strategy,

    /// Custom weights; overrides `strategy` when set.
    pub weights: Option<Weights>,

    /// Reference date for urgency. `None` reads the local date once per call.
    pub today: Option<NaiveDate>,

    /// Days-left placeholder for tasks without a parseable due date.
    pub undated_days: i64,

    /// Normalized effort above which a task is called a quick win.
    pub quick_win_threshold: f64,

    /// Number of top contributing criteria named in an explanation.
    pub max_factors: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            weights: None,
            today: None,
            undated_days: 30,
            quick_win_threshold: 0.6,
            max_factors: 2,
        }
    }
}

impl ScoringConfig {
    /// Sets the weighting preset.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Selects a strategy by name; unknown names select the default.
    pub fn with_strategy_name(mut self, name: Option<&str>) -> Self {
        self.strategy = Strategy::from_name(name);
        self
    }

    /// Sets custom weights, overriding the strategy preset.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Fixes the reference date instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Sets the days-left placeholder for tasks without a parseable due date.
    pub fn with_undated_days(mut self, days: i64) -> Self {
        self.undated_days = days;
        self
    }

    /// Sets the normalized effort above which a task reads as a quick win.
    pub fn with_quick_win_threshold(mut self, threshold: f64) -> Self {
        self.quick_win_threshold = threshold;
        self
    }

    /// Sets how many top criteria an explanation names.
    pub fn with_max_factors(mut self, n: usize) -> Self {
        self.max_factors = n;
        self
    }

    /// Weights in effect: custom weights if set, else the strategy preset.
    pub fn effective_weights(&self) -> Weights {
        self.weights.unwrap_or_else(|| self.strategy.weights())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ScoringResult<()> {
        if let Some(weights) = &self.weights {
            weights.validate()?;
        }
        if !(0.0..=1.0).contains(&self.quick_win_threshold) {
            return Err(ScoringError::config(format!(
                "quick_win_threshold must be in [0, 1], got {}",
                self.quick_win_threshold
            )));
        }
        Ok(())
    }
}
