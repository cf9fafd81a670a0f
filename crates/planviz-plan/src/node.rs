#![forbid(unsafe_code)]

//! The read-only plan input tree.

use serde::{Deserialize, Serialize};

/// One node of a query execution plan, as delivered by the plan extraction
/// layer.
///
/// Only `operator_type` and `children` are guaranteed; every cost statistic
/// and display attribute is optional and defaults to absent. Numeric
/// accessors substitute 0 for missing statistics so downstream scales never
/// see undefined input.
///
/// Field names follow the driver response: operator arguments arrive in
/// PascalCase (`DbHits`, `EstimatedRows`, ...) while `operatorType`,
/// `identifiers`, and the caller-owned `expanded` toggle are camelCase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanNode {
    /// Operator type identifier, e.g. `"NodeByLabelScan"`.
    #[serde(rename = "operatorType", default)]
    pub operator_type: String,

    /// Child operators, in plan order. Order determines left-to-right
    /// layout order before relaxation.
    #[serde(default)]
    pub children: Vec<PlanNode>,

    /// Actual row count flowing out of this operator.
    #[serde(rename = "Rows", default)]
    pub rows: Option<f64>,

    /// Planner-estimated row count.
    #[serde(rename = "EstimatedRows", default)]
    pub estimated_rows: Option<f64>,

    /// Storage-engine accesses attributed to this operator.
    #[serde(rename = "DbHits", default)]
    pub db_hits: Option<f64>,

    /// Peak memory in bytes.
    #[serde(rename = "Memory", default)]
    pub memory: Option<f64>,

    /// Page cache hit count.
    #[serde(rename = "PageCacheHits", default)]
    pub page_cache_hits: Option<f64>,

    /// Page cache miss count.
    #[serde(rename = "PageCacheMisses", default)]
    pub page_cache_misses: Option<f64>,

    /// Identifiers introduced by this operator.
    #[serde(default)]
    pub identifiers: Option<Vec<String>>,

    /// Comma-joined key names; fallback when `identifiers` is absent.
    #[serde(rename = "KeyNames", default)]
    pub key_names: Option<String>,

    /// Index used by this operator.
    #[serde(rename = "Index", default)]
    pub index: Option<String>,

    /// Pre-rendered operator details.
    #[serde(rename = "Details", default)]
    pub details: Option<String>,

    /// Expression list text.
    #[serde(rename = "Expressions", default)]
    pub expressions: Option<String>,

    /// Predicate/expression text.
    #[serde(rename = "Expression", default)]
    pub expression: Option<String>,

    /// Legacy predicate text.
    #[serde(rename = "LegacyExpression", default)]
    pub legacy_expression: Option<String>,

    /// Expansion pattern text.
    #[serde(rename = "ExpandExpression", default)]
    pub expand_expression: Option<String>,

    /// Label scanned by this operator.
    #[serde(rename = "LabelName", default)]
    pub label_name: Option<String>,

    /// Procedure signature text.
    #[serde(rename = "Signature", default)]
    pub signature: Option<String>,

    /// Ordering clause this operator maintains.
    #[serde(rename = "Order", default)]
    pub order: Option<String>,

    /// Whether the detail block is shown. Toggled by the caller between
    /// layout invocations; everything else on the node is read-only.
    #[serde(default)]
    pub expanded: bool,
}

impl PlanNode {
    /// Create a childless node with the given operator type.
    #[must_use]
    pub fn leaf(operator_type: impl Into<String>) -> Self {
        Self {
            operator_type: operator_type.into(),
            ..Self::default()
        }
    }

    /// Cardinality flowing out of this operator: actual rows when profiled,
    /// the planner estimate otherwise, 0 when neither is present.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> f64 {
        self.rows.or(self.estimated_rows).unwrap_or(0.0)
    }

    /// Db-hit count, 0 when absent.
    #[inline]
    #[must_use]
    pub fn db_hit_count(&self) -> f64 {
        self.db_hits.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_prefers_actual_rows() {
        let node = PlanNode {
            rows: Some(10.0),
            estimated_rows: Some(99.0),
            ..PlanNode::default()
        };
        assert_eq!(node.row_count(), 10.0);
    }

    #[test]
    fn row_count_falls_back_to_estimate() {
        let node = PlanNode {
            estimated_rows: Some(42.0),
            ..PlanNode::default()
        };
        assert_eq!(node.row_count(), 42.0);
    }

    #[test]
    fn missing_statistics_default_to_zero() {
        let node = PlanNode::leaf("AllNodesScan");
        assert_eq!(node.row_count(), 0.0);
        assert_eq!(node.db_hit_count(), 0.0);
    }

    #[test]
    fn deserializes_driver_shaped_json() {
        let json = r#"{
            "operatorType": "NodeIndexSeek",
            "Rows": 12,
            "EstimatedRows": 10.5,
            "DbHits": 24,
            "Index": ":Person(name)",
            "identifiers": ["p"],
            "children": [
                { "operatorType": "Filter", "Expression": "p.age > 30" }
            ]
        }"#;
        let node: PlanNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.operator_type, "NodeIndexSeek");
        assert_eq!(node.rows, Some(12.0));
        assert_eq!(node.estimated_rows, Some(10.5));
        assert_eq!(node.db_hits, Some(24.0));
        assert_eq!(node.index.as_deref(), Some(":Person(name)"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(
            node.children[0].expression.as_deref(),
            Some("p.age > 30")
        );
        assert!(!node.expanded);
    }

    #[test]
    fn deserializes_minimal_node() {
        // Only operatorType and children are guaranteed; even those
        // tolerate absence.
        let node: PlanNode = serde_json::from_str("{}").unwrap();
        assert_eq!(node.operator_type, "");
        assert!(node.children.is_empty());
    }
}
