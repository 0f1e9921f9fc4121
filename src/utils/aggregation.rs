//! Reductions from metric rows to the scalars shown on cards and bars.
//!
//! Every function here is pure. Selectors pull one numeric field out of a
//! row so the same reduction works across all response types.

/// Add one numeric field across all rows. Zero for an empty slice.
pub fn sum<T>(rows: &[T], selector: impl Fn(&T) -> f64) -> f64 {
    rows.iter().map(selector).sum()
}

/// Arithmetic mean of one field, or `None` when there are no rows.
pub fn mean<T>(rows: &[T], selector: impl Fn(&T) -> f64) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(sum(rows, selector) / rows.len() as f64)
}

/// Largest value of one field, or `None` when there are no rows.
pub fn max<T>(rows: &[T], selector: impl Fn(&T) -> f64) -> Option<f64> {
    rows.iter().map(selector).fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

/// A row's share of some total, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share {
    /// Unclamped percentage, shown as text
    pub percent: f64,
}

impl Share {
    /// Width of the progress bar for this share, clamped to `[0, 1]`.
    pub fn bar_fraction(&self) -> f32 {
        bar_fraction(self.percent)
    }
}

/// `selector(row) / total * 100`, computed as `value * 100 / total` so whole
/// percentages come out exact.
///
/// A non-positive total yields a zero share rather than a division by zero.
pub fn normalized_share<T>(row: &T, selector: impl Fn(&T) -> f64, total: f64) -> Share {
    if total <= 0.0 || !total.is_finite() {
        return Share { percent: 0.0 };
    }
    Share {
        percent: selector(row) * 100.0 / total,
    }
}

/// Shares of every row relative to the largest row, so the top row fills
/// the whole bar.
pub fn max_normalized<T>(rows: &[T], selector: impl Fn(&T) -> f64) -> Vec<Share> {
    let top = max(rows, &selector).unwrap_or(0.0);
    rows.iter()
        .map(|row| normalized_share(row, &selector, top))
        .collect()
}

/// Clamp a value that is already a percentage into a `[0, 1]` bar width.
pub fn bar_fraction(percent: f64) -> f32 {
    if percent.is_nan() {
        return 0.0;
    }
    (percent / 100.0).clamp(0.0, 1.0) as f32
}
