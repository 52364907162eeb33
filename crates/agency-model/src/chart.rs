//! Chart data points

use serde::{Deserialize, Serialize};

/// One `{category, value}` tuple for bar, line and pie charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
}

impl ChartPoint {
    /// Create a point
    #[inline]
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}
