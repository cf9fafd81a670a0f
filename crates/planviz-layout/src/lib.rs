#![forbid(unsafe_code)]

//! The query-plan layout engine.
//!
//! Given a plan tree with cost statistics, compute a non-overlapping,
//! visually proportioned 2D layout: box heights encode cost (db hits),
//! link widths encode cardinality (rows), and an iterative damped
//! relaxation balances parent/child alignment under a hard per-rank
//! collision constraint.
//!
//! - [`LogScale`] / [`PlanScales`] - logarithmic cost and cardinality
//!   scales with comparability floors
//! - [`estimate_dims`] - per-operator pixel heights and link anchoring
//! - [`solve`] - the collision + relaxation solver
//! - [`compute_layout`] - the one-call entry: flatten, scale, dimension,
//!   solve, assemble a [`PlanLayout`]
//!
//! # Example
//! ```
//! use planviz_layout::{LayoutOptions, compute_layout};
//! use planviz_plan::PlanNode;
//! use planviz_text::HeuristicMeasurer;
//!
//! let mut scan = PlanNode::leaf("AllNodesScan");
//! scan.db_hits = Some(1000.0);
//! scan.rows = Some(500.0);
//! let mut root = PlanNode::leaf("ProduceResults");
//! root.children.push(scan);
//!
//! let mut measurer = HeuristicMeasurer::default();
//! let layout = compute_layout(&root, &mut measurer, &LayoutOptions::default());
//!
//! assert_eq!(layout.nodes.len(), 3); // synthetic Result + 2 operators
//! assert_eq!(layout.links.len(), 2);
//! assert!(layout.width > 0.0 && layout.height > 0.0);
//! ```
//!
//! The engine never fails: missing statistics degrade to minimum visual
//! dimensions and degenerate plans produce degenerate (but valid)
//! geometry. Recomputing an unmodified plan yields bit-identical output.

pub mod dims;
pub mod engine;
pub mod scale;
pub mod solver;

pub use dims::{NodeDims, estimate_dims};
pub use engine::{LayoutOptions, LinkLayout, NodeLayout, PlanLayout, compute_layout, layout_plan};
pub use scale::{LogScale, PlanScales};
pub use solver::{SolvedLayout, SolverOptions, solve};
