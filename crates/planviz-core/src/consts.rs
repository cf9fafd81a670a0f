#![forbid(unsafe_code)]

//! Visual constants of the plan diagram.
//!
//! All lengths are in CSS pixels. The operator box has a fixed width; only
//! heights vary (with expanded detail and cost bars). Scale floors keep
//! cost/cardinality encodings comparable across separate plans, not just
//! within one.

/// Fixed width of every operator box.
pub const OPERATOR_WIDTH: f64 = 180.0;

/// Corner radius of the operator box. Also the minimum cost-bar height,
/// so a non-empty bar never degenerates below the rounded corner.
pub const OPERATOR_CORNER_RADIUS: f64 = 4.0;

/// Height of the operator header row (the operator-type title).
pub const OPERATOR_HEADER_HEIGHT: f64 = 18.0;

/// Height of one text detail line inside an expanded operator.
pub const OPERATOR_DETAIL_HEIGHT: f64 = 14.0;

/// Inner padding of the operator box.
pub const OPERATOR_PADDING: f64 = 3.0;

/// Minimum horizontal gap between two operators in the same rank.
pub const OPERATOR_MARGIN: f64 = 50.0;

/// Vertical gap between consecutive ranks.
pub const RANK_MARGIN: f64 = 50.0;

/// Upper bound of the cost-bar height scale.
pub const MAX_COST_HEIGHT: f64 = 80.0;

/// Lower bound of the link-width scale. Links never vanish while their
/// cardinality is defined.
pub const MIN_LINK_WIDTH: f64 = 2.0;

/// Sibling budget for link widths: at most this many children share the
/// parent's width, so the scale's upper bound is the parent width divided
/// by this count.
pub const MAX_CHILD_OPERATORS: f64 = 2.0;

/// Upper bound of the link-width scale.
pub const MAX_LINK_WIDTH: f64 = (OPERATOR_WIDTH - 2.0 * OPERATOR_CORNER_RADIUS) / MAX_CHILD_OPERATORS;

/// Comparability floor for the db-hits scale domain. Two plans whose
/// heaviest operators differ in absolute cost must not render identical
/// full-height bars.
pub const COMPARABLE_DB_HITS: f64 = 1_000_000.0;

/// Comparability floor for the row-count scale domain.
pub const COMPARABLE_ROWS: f64 = 1_000_000.0;

/// Default number of relaxation iterations.
pub const RELAX_ITERATIONS: usize = 300;

/// Default per-iteration damping decay.
pub const ALPHA_DECAY: f64 = 0.98;

/// Font family used for detail-line measurement.
pub const STANDARD_FONT: &str = "'Helvetica Neue',Helvetica,Arial,sans-serif";

/// Font size of detail lines, in pixels.
pub const DETAIL_FONT_SIZE: f64 = 10.0;

/// Pixel budget for a wrapped detail line (operator width minus padding).
pub const DETAIL_WIDTH_BUDGET: f64 = OPERATOR_WIDTH - 2.0 * OPERATOR_PADDING;
