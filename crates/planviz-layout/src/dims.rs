#![forbid(unsafe_code)]

//! Per-operator pixel dimensions and link anchoring.
//!
//! Heights combine the fixed header, the formatted detail block (expanded
//! operators only), and the cost bar. Link anchor offsets (`tx`) center
//! each operator's bundle of child links under it; they are fixed here
//! and never move during relaxation.

use planviz_core::consts::{
    OPERATOR_CORNER_RADIUS, OPERATOR_DETAIL_HEIGHT, OPERATOR_HEADER_HEIGHT, OPERATOR_PADDING,
    OPERATOR_WIDTH,
};
use planviz_plan::FlatPlan;
use planviz_text::{DetailLine, DetailOptions, TextMeasurer, operator_details};

use crate::scale::PlanScales;

/// Computed dimensions of one operator, valid for a single layout pass.
#[derive(Debug, Clone)]
pub struct NodeDims {
    /// Total box height: header + detail block + cost bar.
    pub height: f64,
    /// Cost-bar height; 0 when the operator has no db-hit statistic,
    /// otherwise at least the corner radius.
    pub cost_height: f64,
    /// Whether the cost bar is tall enough to carry an inline label
    /// (which suppresses the db-hits detail line).
    pub always_show_cost: bool,
    /// Link anchor offset relative to the parent's left edge.
    pub tx: f64,
    /// Formatted detail lines (empty when collapsed).
    pub details: Vec<DetailLine>,
}

/// Compute dimensions for every operator in the plan.
///
/// The cost bar must be sized before the details are formatted: a bar tall
/// enough for an inline label suppresses the db-hits detail line.
#[must_use]
pub fn estimate_dims<M>(
    plan: &FlatPlan<'_>,
    scales: &PlanScales,
    options: &DetailOptions,
    measurer: &mut M,
) -> Vec<NodeDims>
where
    M: TextMeasurer + ?Sized,
{
    let mut dims: Vec<NodeDims> = plan
        .operators()
        .iter()
        .map(|op| {
            let cost_height = match op.node().and_then(|n| n.db_hits) {
                Some(db_hits) => scales
                    .cost_height
                    .apply(db_hits)
                    .max(OPERATOR_CORNER_RADIUS),
                None => 0.0,
            };
            let always_show_cost = cost_height > OPERATOR_DETAIL_HEIGHT;

            let details = match op.node() {
                Some(node) => operator_details(node, always_show_cost, options, &mut *measurer),
                None => Vec::new(),
            };

            let mut height = OPERATOR_HEADER_HEIGHT;
            if let Some(last) = details.last() {
                height += last.y + options.line_height + OPERATOR_PADDING * 2.0;
            }
            height += cost_height;

            NodeDims {
                height,
                cost_height,
                always_show_cost,
                tx: 0.0,
                details,
            }
        })
        .collect();

    // Anchor child links: the bundle is centered under the parent, each
    // child taking a slot as wide as its link.
    for op in plan.operators() {
        let widths: Vec<f64> = op
            .children()
            .iter()
            .map(|&child| scales.link_width.apply(plan.operator(child).row_count()))
            .collect();
        let total: f64 = widths.iter().sum();
        let mut tx = (OPERATOR_WIDTH - total) / 2.0;
        for (&child, width) in op.children().iter().zip(&widths) {
            dims[child.index()].tx = tx;
            tx += width;
        }
    }

    dims
}

#[cfg(test)]
mod tests {
    use super::*;
    use planviz_core::consts::{MAX_COST_HEIGHT, MIN_LINK_WIDTH};
    use planviz_plan::PlanNode;
    use planviz_text::HeuristicMeasurer;

    fn dims_for(root: &PlanNode) -> (Vec<NodeDims>, FlatPlan<'_>) {
        let plan = FlatPlan::from_root(root);
        let scales = PlanScales::from_plan(&plan);
        let mut measurer = HeuristicMeasurer::default();
        let dims = estimate_dims(&plan, &scales, &DetailOptions::default(), &mut measurer);
        (dims, plan)
    }

    #[test]
    fn collapsed_height_is_header_plus_cost() {
        let mut root = PlanNode::leaf("AllNodesScan");
        root.db_hits = Some(100.0);
        let (dims, plan) = dims_for(&root);
        let scan = &dims[1];
        assert_eq!(scan.height, OPERATOR_HEADER_HEIGHT + scan.cost_height);
        assert!(plan.operators()[1].node().is_some());
    }

    #[test]
    fn missing_db_hits_means_no_cost_bar() {
        let root = PlanNode::leaf("Projection");
        let (dims, _plan) = dims_for(&root);
        assert_eq!(dims[1].cost_height, 0.0);
        assert_eq!(dims[1].height, OPERATOR_HEADER_HEIGHT);
        assert!(!dims[1].always_show_cost);
    }

    #[test]
    fn synthetic_root_is_header_only() {
        let root = PlanNode::leaf("ProduceResults");
        let (dims, _plan) = dims_for(&root);
        assert_eq!(dims[0].height, OPERATOR_HEADER_HEIGHT);
        assert_eq!(dims[0].cost_height, 0.0);
        assert!(dims[0].details.is_empty());
    }

    #[test]
    fn tiny_cost_is_floored_at_corner_radius() {
        let mut root = PlanNode::leaf("Filter");
        root.db_hits = Some(0.0);
        let (dims, _plan) = dims_for(&root);
        assert_eq!(dims[1].cost_height, OPERATOR_CORNER_RADIUS);
    }

    #[test]
    fn heavy_cost_reaches_max_and_labels_bar() {
        let mut root = PlanNode::leaf("AllNodesScan");
        root.db_hits = Some(2_000_000.0);
        let (dims, _plan) = dims_for(&root);
        assert!((dims[1].cost_height - MAX_COST_HEIGHT).abs() < 0.01);
        assert!(dims[1].always_show_cost);
    }

    #[test]
    fn expanded_details_extend_height() {
        let mut collapsed = PlanNode::leaf("Filter");
        collapsed.expression = Some("n.age > 30 AND n.active".into());
        let mut expanded = collapsed.clone();
        expanded.expanded = true;

        let (collapsed_dims, _p1) = dims_for(&collapsed);
        let (expanded_dims, _p2) = dims_for(&expanded);
        assert!(expanded_dims[1].height > collapsed_dims[1].height);
        assert!(!expanded_dims[1].details.is_empty());
    }

    #[test]
    fn expanded_without_details_stays_header_height() {
        let mut root = PlanNode::leaf("Argument");
        root.expanded = true;
        let (dims, _plan) = dims_for(&root);
        assert_eq!(dims[1].height, OPERATOR_HEADER_HEIGHT);
    }

    #[test]
    fn single_child_link_is_centered() {
        let mut scan = PlanNode::leaf("AllNodesScan");
        scan.rows = Some(100.0);
        let mut root = PlanNode::leaf("ProduceResults");
        root.children.push(scan);
        let (dims, plan) = dims_for(&root);

        let scales = PlanScales::from_plan(&plan);
        let width = scales.link_width.apply(100.0);
        // Child link slot is centered under the parent box.
        let child_dims = &dims[2];
        assert!((child_dims.tx - (OPERATOR_WIDTH - width) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn sibling_links_are_adjacent_and_centered() {
        let mut lhs = PlanNode::leaf("Lhs");
        lhs.rows = Some(10.0);
        let mut rhs = PlanNode::leaf("Rhs");
        rhs.rows = Some(10.0);
        let mut join = PlanNode::leaf("NodeHashJoin");
        join.children.push(lhs);
        join.children.push(rhs);
        let (dims, plan) = dims_for(&join);

        let scales = PlanScales::from_plan(&plan);
        let w = scales.link_width.apply(10.0);
        let join_op = &plan.operators()[1];
        let &[left, right] = join_op.children() else {
            panic!("join has two children");
        };
        let left_tx = dims[left.index()].tx;
        let right_tx = dims[right.index()].tx;
        assert!((right_tx - left_tx - w).abs() < 1e-9);
        // Bundle midpoint sits at the parent's horizontal center.
        let mid = (left_tx + right_tx + w) / 2.0;
        assert!((mid - OPERATOR_WIDTH / 2.0).abs() < 1e-9);
    }

    #[test]
    fn link_widths_never_drop_below_minimum() {
        let mut child = PlanNode::leaf("Argument");
        child.rows = Some(0.0);
        let mut root = PlanNode::leaf("Apply");
        root.children.push(child);
        let (_dims, plan) = dims_for(&root);
        let scales = PlanScales::from_plan(&plan);
        assert!(scales.link_width.apply(0.0) >= MIN_LINK_WIDTH);
    }
}
