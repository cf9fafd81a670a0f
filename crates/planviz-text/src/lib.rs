#![forbid(unsafe_code)]

//! Detail-text formatting for the plan diagram.
//!
//! This crate turns an operator's textual attributes into the ordered,
//! word-wrapped list of detail lines shown inside an expanded operator box:
//!
//! - [`TextMeasurer`] - injected text-measurement capability (the engine
//!   has no built-in font metrics); any `FnMut(&str, &str, f64) -> f64`
//!   closure qualifies
//! - [`MeasuredWidthCache`] - LRU cache over a measurer (measurement is the
//!   hot path of formatting; repeated tokens are common)
//! - [`HeuristicMeasurer`] - display-width-based fallback for callers and
//!   tests without real font metrics
//! - [`operator_details`] - the formatter itself: field selection in fixed
//!   priority order, greedy token wrapping against a pixel budget, numeric
//!   lines with thousands separators, cumulative vertical offsets
//!
//! # Example
//! ```
//! use planviz_plan::PlanNode;
//! use planviz_text::{operator_details, DetailOptions, HeuristicMeasurer};
//!
//! let mut node = PlanNode::leaf("Filter");
//! node.expression = Some("n.age > 30".into());
//! node.expanded = true;
//!
//! let mut measurer = HeuristicMeasurer::default();
//! let lines = operator_details(&node, false, &DetailOptions::default(), &mut measurer);
//! assert!(!lines.is_empty());
//!
//! // A collapsed operator formats to nothing.
//! node.expanded = false;
//! let lines = operator_details(&node, false, &DetailOptions::default(), &mut measurer);
//! assert!(lines.is_empty());
//! ```

pub mod detail;
pub mod measure;
pub mod wrap;

pub use detail::{DetailClass, DetailLine, DetailOptions, operator_details};
pub use measure::{HeuristicMeasurer, MeasureCacheStats, MeasuredWidthCache, TextMeasurer};
pub use wrap::{split_tokens, wrap_tokens};
