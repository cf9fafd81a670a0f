#![forbid(unsafe_code)]

//! Logarithmic metric scales.
//!
//! Row and db-hit counts span many orders of magnitude; the scales
//! compress them onto small pixel ranges. Each domain has a comparability
//! floor so the encoding is stable across separate plans: a plan whose
//! heaviest operator costs 10,000 hits must not render the same
//! full-height bar as one costing 10,000,000.

use planviz_core::consts::{
    COMPARABLE_DB_HITS, COMPARABLE_ROWS, MAX_COST_HEIGHT, MAX_LINK_WIDTH, MIN_LINK_WIDTH,
};
use planviz_plan::FlatPlan;

/// A logarithmic scale as a value type: domain `[1, domain_max]`, range
/// `[range_min, range_max]`.
///
/// `apply` takes `value + 1`, so a zero count maps to the low end of the
/// range rather than hitting the log singularity. Inputs beyond the
/// domain clamp to the range bounds. Pure and monotone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LogScale {
    /// Create a scale. A domain max below 1 degenerates to 1 (everything
    /// maps to `range_min`).
    #[must_use]
    pub fn new(domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_max: if domain_max.is_finite() {
                domain_max.max(1.0)
            } else {
                1.0
            },
            range_min,
            range_max,
        }
    }

    /// Upper end of the domain.
    #[inline]
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Map a count onto the range.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        if self.domain_max <= 1.0 {
            return self.range_min;
        }
        let v = (value.max(0.0) + 1.0).min(self.domain_max);
        let t = v.ln() / self.domain_max.ln();
        self.range_min + (self.range_max - self.range_min) * t
    }
}

/// The two scales of one layout pass, derived from the operator set.
///
/// Domain maxima depend on the whole set, so the scales are rebuilt
/// whenever the plan changes.
#[derive(Debug, Clone, Copy)]
pub struct PlanScales {
    /// Db-hits to cost-bar height, `[0, MAX_COST_HEIGHT]`.
    pub cost_height: LogScale,
    /// Rows to link width, `[MIN_LINK_WIDTH, MAX_LINK_WIDTH]`.
    pub link_width: LogScale,
}

impl PlanScales {
    /// Build both scales from a flattened plan.
    #[must_use]
    pub fn from_plan(plan: &FlatPlan<'_>) -> Self {
        let max_db_hits = plan
            .operators()
            .iter()
            .map(|op| op.db_hit_count())
            .fold(0.0, f64::max);
        let max_rows = plan
            .operators()
            .iter()
            .map(|op| op.row_count())
            .fold(0.0, f64::max);
        Self {
            cost_height: LogScale::new(max_db_hits.max(COMPARABLE_DB_HITS), 0.0, MAX_COST_HEIGHT),
            link_width: LogScale::new(
                max_rows.max(COMPARABLE_ROWS),
                MIN_LINK_WIDTH,
                MAX_LINK_WIDTH,
            ),
        }
    }
}
