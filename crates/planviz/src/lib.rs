#![forbid(unsafe_code)]

//! Planviz public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users of the
//! query-plan layout engine. It re-exports common types from the internal
//! crates and offers a lightweight prelude for day-to-day usage.
//!
//! # Overview
//!
//! The engine takes a query execution plan (a tree of operators annotated
//! with cost statistics) plus an injected text-measurement capability, and
//! computes a non-overlapping, visually proportioned 2D layout: box
//! heights encode cost (db hits), link widths encode cardinality (rows).
//! It neither parses driver responses nor draws anything - the rendering
//! host consumes the returned [`PlanLayout`].
//!
//! # Example
//! ```
//! use planviz::prelude::*;
//!
//! // A profiled two-operator plan.
//! let mut scan = PlanNode::leaf("NodeByLabelScan");
//! scan.db_hits = Some(13_000.0);
//! scan.rows = Some(12_000.0);
//! let mut root = PlanNode::leaf("ProduceResults");
//! root.rows = Some(12_000.0);
//! root.children.push(scan);
//!
//! // Measure with the built-in heuristic (a rendering host would inject
//! // real font metrics here).
//! let mut measurer = HeuristicMeasurer::default();
//! let layout = compute_layout(&root, &mut measurer, &LayoutOptions::default());
//!
//! assert_eq!(layout.nodes.len(), 3);
//! assert_eq!(layout.links.len(), 2);
//! assert!(layout.width >= 180.0);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use planviz_core::consts;
pub use planviz_core::{Extent, Point, format_thousands};

// --- Plan re-exports -------------------------------------------------------

pub use planviz_plan::{FlatPlan, Link, Operator, OperatorId, PlanNode, RESULT_OPERATOR};

// --- Text re-exports -------------------------------------------------------

pub use planviz_text::{
    DetailClass, DetailLine, DetailOptions, HeuristicMeasurer, MeasureCacheStats,
    MeasuredWidthCache, TextMeasurer,
};

// --- Layout re-exports -----------------------------------------------------

pub use planviz_layout::{
    LayoutOptions, LinkLayout, LogScale, NodeDims, NodeLayout, PlanLayout, PlanScales,
    SolvedLayout, SolverOptions, compute_layout, estimate_dims, layout_plan, solve,
};

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::{
        DetailOptions, FlatPlan, HeuristicMeasurer, LayoutOptions, MeasuredWidthCache, PlanLayout,
        PlanNode, TextMeasurer, compute_layout,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn facade_end_to_end() {
        let json = r#"{
            "operatorType": "ProduceResults",
            "Rows": 3,
            "EstimatedRows": 10,
            "children": [{
                "operatorType": "Filter",
                "Expression": "n.name STARTS WITH 'A'",
                "Rows": 3,
                "DbHits": 42,
                "expanded": true,
                "children": [{
                    "operatorType": "AllNodesScan",
                    "Rows": 100,
                    "DbHits": 101,
                    "identifiers": ["n"],
                    "children": []
                }]
            }]
        }"#;
        let root: PlanNode = serde_json::from_str(json).unwrap();

        let mut measurer = MeasuredWidthCache::with_default_capacity(HeuristicMeasurer::default());
        let layout = compute_layout(&root, &mut measurer, &LayoutOptions::default());

        assert_eq!(layout.nodes.len(), 4);
        assert_eq!(layout.links.len(), 3);

        let filter = layout
            .nodes
            .iter()
            .find(|n| n.operator_type == "Filter")
            .unwrap();
        assert!(!filter.details.is_empty());

        // The deepest scan feeds the widest link.
        let scan = layout
            .nodes
            .iter()
            .find(|n| n.operator_type == "AllNodesScan")
            .unwrap();
        let scan_link = layout.links.iter().find(|l| l.source == scan.id).unwrap();
        for link in &layout.links {
            assert!(scan_link.width >= link.width);
        }
    }

    #[test]
    fn injected_closure_measurer() {
        let root = PlanNode::leaf("ProduceResults");
        let mut measurer = |text: &str, _family: &str, size: f64| text.len() as f64 * size * 0.5;
        let layout = compute_layout(&root, &mut measurer, &LayoutOptions::default());
        assert_eq!(layout.nodes.len(), 2);
    }
}
