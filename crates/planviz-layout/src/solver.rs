#![forbid(unsafe_code)]

//! The layout solver: rank placement, collision resolution, relaxation.
//!
//! Vertical placement is a single deterministic pass (ranks stack upward,
//! separated by the tallest operator plus the rank margin). Horizontal
//! placement starts degenerate (everything at `x = 0`) and is driven
//! entirely by the collision sweep and the damped relaxation loop:
//!
//! 1. upward pass - each parent moves toward the link-width-weighted
//!    center of its children
//! 2. collision resolution
//! 3. downward pass - each child moves toward its parent's center
//! 4. collision resolution
//!
//! The damping factor decays geometrically per iteration, so alternating
//! pulls converge instead of oscillating, and the hard collision fix-up
//! after every pass keeps the no-overlap invariant even transiently.
//! There is no randomness anywhere: identical input yields identical
//! output.

use planviz_core::consts::{
    ALPHA_DECAY, OPERATOR_MARGIN, OPERATOR_WIDTH, RANK_MARGIN, RELAX_ITERATIONS,
};
use planviz_core::{Extent, Point};
use planviz_plan::{FlatPlan, OperatorId};
use tracing::trace;

/// Relaxation tunables.
///
/// The defaults reproduce the reference behavior; the iteration count is
/// exposed because very large plans may tolerate fewer passes.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Number of relaxation iterations.
    pub iterations: usize,
    /// Per-iteration damping decay (multiplied into alpha each round).
    pub alpha_decay: f64,
}

impl SolverOptions {
    /// Set the iteration count.
    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the damping decay.
    #[must_use]
    pub fn alpha_decay(mut self, alpha_decay: f64) -> Self {
        self.alpha_decay = alpha_decay;
        self
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            iterations: RELAX_ITERATIONS,
            alpha_decay: ALPHA_DECAY,
        }
    }
}

/// Solver output: a position per operator and the tight bounding box.
///
/// Positions live here, not on the plan: the input tree and the flat view
/// stay read-only, so concurrent layouts of different plans can never
/// interfere.
#[derive(Debug)]
pub struct SolvedLayout {
    positions: Vec<Point>,
    extent: Extent,
}

impl SolvedLayout {
    /// Top-left corner of an operator's bounding box.
    #[inline]
    #[must_use]
    pub fn position(&self, id: OperatorId) -> Point {
        self.positions[id.index()]
    }

    /// All positions, indexed by operator id.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Tight bounding box of the diagram.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }
}

/// Horizontal center of an operator at position `x`.
#[inline]
fn center(x: f64) -> f64 {
    x + OPERATOR_WIDTH / 2.0
}

/// Resolve overlaps within every rank.
///
/// Left-to-right, any operator overlapping its left neighbor (margin
/// included) is pushed right; the rank's left edge is clamped at 0. If
/// the rank then exceeds its width allotment, a right-to-left corrective
/// sweep pulls operators back left, closing up to the margin with the
/// right neighbor and never reintroducing an overlap.
fn collide(ranks: &[Vec<OperatorId>], xs: &mut [f64], width: f64) {
    for rank in ranks {
        let mut x0 = 0.0;
        for &id in rank {
            let dx = x0 - xs[id.index()];
            if dx > 0.0 {
                xs[id.index()] += dx;
            }
            x0 = xs[id.index()] + OPERATOR_WIDTH + OPERATOR_MARGIN;
        }

        let overflow = x0 - OPERATOR_MARGIN - width;
        if overflow > 0.0 {
            let last = rank[rank.len() - 1].index();
            xs[last] -= overflow;
            for pair in rank.windows(2).rev() {
                let (left, right) = (pair[0].index(), pair[1].index());
                let dx = xs[left] + OPERATOR_WIDTH + OPERATOR_MARGIN - xs[right];
                if dx > 0.0 {
                    xs[left] -= dx;
                }
            }
        }
    }
}

/// Pull every parent toward the link-width-weighted center of its
/// children. Wider links (higher cardinality) pull harder.
fn relax_upward(
    plan: &FlatPlan<'_>,
    ranks: &[Vec<OperatorId>],
    xs: &mut [f64],
    link_widths: &[f64],
    alpha: f64,
) {
    for rank in ranks {
        for &id in rank {
            let op = plan.operator(id);
            if op.children().is_empty() {
                continue;
            }
            let mut weighted = 0.0;
            let mut total = 0.0;
            for &child in op.children() {
                let w = link_widths[child.index()];
                weighted += w * center(xs[child.index()]);
                total += w;
            }
            if total > 0.0 {
                xs[id.index()] += (weighted / total - center(xs[id.index()])) * alpha;
            }
        }
    }
}

/// Pull every child toward its parent's center, deepest ranks first.
fn relax_downward(plan: &FlatPlan<'_>, ranks: &[Vec<OperatorId>], xs: &mut [f64], alpha: f64) {
    for rank in ranks.iter().rev() {
        for &id in rank {
            let op = plan.operator(id);
            if let Some(parent) = op.parent() {
                xs[id.index()] += (center(xs[parent.index()]) - center(xs[id.index()])) * alpha;
            }
        }
    }
}

/// Assign every operator a collision-free position.
///
/// `heights` and `link_widths` are indexed by operator id; `link_widths`
/// holds the width of the link from each operator to its parent (unused
/// for the root). The solver never fails: degenerate plans produce
/// degenerate but valid geometry.
#[must_use]
pub fn solve(
    plan: &FlatPlan<'_>,
    heights: &[f64],
    link_widths: &[f64],
    options: &SolverOptions,
) -> SolvedLayout {
    let ranks = plan.ranks();
    let mut xs = vec![0.0; plan.operators().len()];
    let mut ys = vec![0.0; plan.operators().len()];

    // Vertical placement: every operator in a rank shares the rank's y,
    // one tallest-operator-plus-margin step above the previous rank.
    let mut current_y = 0.0;
    for rank in &ranks {
        let tallest = rank
            .iter()
            .map(|id| heights[id.index()])
            .fold(0.0, f64::max);
        current_y -= tallest + RANK_MARGIN;
        for &id in rank {
            ys[id.index()] = current_y;
        }
    }
    let height = -current_y - RANK_MARGIN;

    // Width allotment for the corrective collision sweep: the widest rank
    // at margin spacing.
    let width = ranks
        .iter()
        .map(|rank| rank.len() as f64 * (OPERATOR_WIDTH + OPERATOR_MARGIN))
        .fold(0.0, f64::max);

    collide(&ranks, &mut xs, width);

    let mut alpha = 1.0;
    for _ in 0..options.iterations {
        relax_upward(plan, &ranks, &mut xs, link_widths, alpha);
        collide(&ranks, &mut xs, width);
        relax_downward(plan, &ranks, &mut xs, alpha);
        collide(&ranks, &mut xs, width);
        alpha *= options.alpha_decay;
    }

    // Normalize to a zero-based origin and the tight content width.
    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for x in &mut xs {
        *x -= min_x;
    }

    trace!(
        operators = xs.len(),
        ranks = ranks.len(),
        final_alpha = alpha,
        "solved plan layout"
    );

    SolvedLayout {
        positions: xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| Point::new(x, y))
            .collect(),
        extent: Extent::new(max_x - min_x + OPERATOR_WIDTH, height),
    }
}
