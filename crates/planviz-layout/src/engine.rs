#![forbid(unsafe_code)]

//! Layout assembly: the one-call engine entry point.
//!
//! Flatten the plan, derive the scales from the operator set, estimate
//! dimensions, solve positions, and assemble the output the rendering
//! layer consumes. The engine draws nothing and parses nothing.

use planviz_core::consts::{ALPHA_DECAY, RELAX_ITERATIONS};
use planviz_plan::{FlatPlan, OperatorId, PlanNode};
use planviz_text::{DetailLine, DetailOptions, TextMeasurer};
use serde::Serialize;
use tracing::debug;

use crate::dims::estimate_dims;
use crate::scale::PlanScales;
use crate::solver::{SolverOptions, solve};

/// Tunables for one layout computation.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Relaxation iteration count.
    pub iterations: usize,
    /// Relaxation damping decay.
    pub alpha_decay: f64,
    /// Detail-formatting options (wrap budget, measurement font).
    pub detail: DetailOptions,
}

impl LayoutOptions {
    /// Set the relaxation iteration count.
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

    /// Set the detail-formatting options.
    #[must_use]
    pub fn detail(mut self, detail: DetailOptions) -> Self {
        self.detail = detail;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            iterations: RELAX_ITERATIONS,
            alpha_decay: ALPHA_DECAY,
            detail: DetailOptions::default(),
        }
    }
}

/// One positioned operator, ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct NodeLayout {
    /// Operator id (index into the layout's node list).
    pub id: OperatorId,
    /// Operator type identifier (`"Result"` for the synthetic root).
    pub operator_type: String,
    /// Rank (vertical tier).
    pub rank: u32,
    /// Left edge of the bounding box.
    pub x: f64,
    /// Top edge of the bounding box.
    pub y: f64,
    /// Total box height.
    pub height: f64,
    /// Cost-bar height.
    pub cost_height: f64,
    /// Whether the cost bar carries an inline label.
    pub always_show_cost: bool,
    /// Link anchor offset relative to the parent's left edge.
    pub tx: f64,
    /// Formatted detail lines (empty when collapsed).
    pub details: Vec<DetailLine>,
}

/// One positioned link; `source` is the child, `target` its parent.
#[derive(Debug, Clone, Serialize)]
pub struct LinkLayout {
    pub source: OperatorId,
    pub target: OperatorId,
    /// Link stroke width, encoding the child's cardinality.
    pub width: f64,
}

/// The computed layout of one plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanLayout {
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
    /// Tight content width.
    pub width: f64,
    /// Tight content height.
    pub height: f64,
}

impl PlanLayout {
    /// Node lookup by id.
    #[inline]
    #[must_use]
    pub fn node(&self, id: OperatorId) -> &NodeLayout {
        &self.nodes[id.index()]
    }
}

/// Compute the layout of a plan tree.
///
/// The tree is only read; all derived state lives in the returned layout,
/// so concurrent calls for different plans cannot interact. This function
/// never fails - degenerate plans produce degenerate but valid geometry.
#[must_use]
pub fn compute_layout<M>(root: &PlanNode, measurer: &mut M, options: &LayoutOptions) -> PlanLayout
where
    M: TextMeasurer + ?Sized,
{
    let plan = FlatPlan::from_root(root);
    layout_plan(&plan, measurer, options)
}

/// Compute the layout of an already-flattened plan.
#[must_use]
pub fn layout_plan<M>(
    plan: &FlatPlan<'_>,
    measurer: &mut M,
    options: &LayoutOptions,
) -> PlanLayout
where
    M: TextMeasurer + ?Sized,
{
    let scales = PlanScales::from_plan(plan);
    let dims = estimate_dims(plan, &scales, &options.detail, measurer);

    let heights: Vec<f64> = dims.iter().map(|d| d.height).collect();
    let link_widths: Vec<f64> = plan
        .operators()
        .iter()
        .map(|op| scales.link_width.apply(op.row_count()))
        .collect();

    let solver_options = SolverOptions::default()
        .iterations(options.iterations)
        .alpha_decay(options.alpha_decay);
    let solved = solve(plan, &heights, &link_widths, &solver_options);

    let nodes = plan
        .operators()
        .iter()
        .zip(dims)
        .map(|(op, dim)| {
            let position = solved.position(op.id());
            NodeLayout {
                id: op.id(),
                operator_type: op.operator_type().to_string(),
                rank: op.rank(),
                x: position.x,
                y: position.y,
                height: dim.height,
                cost_height: dim.cost_height,
                always_show_cost: dim.always_show_cost,
                tx: dim.tx,
                details: dim.details,
            }
        })
        .collect();

    let links = plan
        .links()
        .iter()
        .map(|link| LinkLayout {
            source: link.source,
            target: link.target,
            width: link_widths[link.source.index()],
        })
        .collect();

    let extent = solved.extent();
    debug!(
        operators = plan.operators().len(),
        links = plan.links().len(),
        width = extent.width,
        height = extent.height,
        "computed plan layout"
    );

    PlanLayout {
        nodes,
        links,
        width: extent.width,
        height: extent.height,
    }
}
