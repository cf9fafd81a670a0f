#![forbid(unsafe_code)]

//! Plan input model and flattener.
//!
//! This crate turns the nested operator tree delivered by the plan
//! extraction layer into the flat structures the layout engine operates on:
//!
//! - [`PlanNode`] - one node of the input tree, read-only, permissive
//!   (every field except `operator_type` and `children` is optional)
//! - [`FlatPlan`] - the flattened view: [`Operator`] records with ranks and
//!   id-based parent/child references, plus [`Link`] records per tree edge
//! - [`OperatorId`] - index handle into the flat operator list
//!
//! The flattener wraps the real plan root in a synthetic `Result` operator
//! at rank 0, so the diagram always terminates in a result node.
//!
//! # Example
//! ```
//! use planviz_plan::{FlatPlan, PlanNode};
//!
//! let root = PlanNode::leaf("ProduceResults");
//! let plan = FlatPlan::from_root(&root);
//!
//! // Synthetic root + the real root.
//! assert_eq!(plan.operators().len(), 2);
//! assert_eq!(plan.links().len(), 1);
//! assert_eq!(plan.operators()[0].operator_type(), "Result");
//! ```
//!
//! The input tree is assumed finite; a cyclic `children` structure is a
//! precondition violation and recurses unboundedly.

pub mod flatten;
pub mod node;

pub use flatten::{FlatPlan, Link, Operator, OperatorId, RESULT_OPERATOR};
pub use node::PlanNode;
