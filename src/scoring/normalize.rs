//! Min-max normalization over a batch.

/// Maps `value` into `[0, 1]` relative to `[min, max]`.
///
/// Returns `0.0` when the range is degenerate (`max <= min`), which covers
/// single-task batches and batches where every value is identical. A
/// non-finite `value` also yields `0.0`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if !value.is_finite() || !span.is_finite() || span <= 0.0 {
        return 0.0;
    }
    (value - min) / span
}

/// Observed `[min, max]` range of one raw criterion across a batch.
///
/// The default range is the degenerate `[0, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Computes the range of the finite `values`, or `None` if there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Range { min: v, max: v }),
                Some(r) => Some(Range {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Returns `true` if every observed value was the same.
    pub fn is_degenerate(&self) -> bool {
        self.max - self.min == 0.0
    }

    /// Normalizes with the plain `0.0` degenerate behavior.
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }

    /// Normalizes, substituting `fallback` when the range is degenerate or
    /// `value` is not finite.
    pub fn normalize_or(&self, value: f64, fallback: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            fallback
        } else {
            self.normalize(value)
        }
    }
}
