#![forbid(unsafe_code)]

//! Plan flattening: nested tree to ranked operator and link lists.

use serde::Serialize;
use smallvec::SmallVec;

use crate::node::PlanNode;

/// Operator type of the synthetic root.
pub const RESULT_OPERATOR: &str = "Result";

/// Handle to an operator in a [`FlatPlan`].
///
/// Parent/child references are ids, never pointers, so the flat view stays
/// cycle-free and the input tree stays untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OperatorId(u32);

impl OperatorId {
    /// Id of the synthetic root, always present.
    pub const ROOT: Self = Self(0);

    /// Position of this operator in [`FlatPlan::operators`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A flat operator record: one per plan node, plus the synthetic root.
#[derive(Debug)]
pub struct Operator<'p> {
    id: OperatorId,
    rank: u32,
    parent: Option<OperatorId>,
    children: SmallVec<[OperatorId; 2]>,
    node: Option<&'p PlanNode>,
}

impl<'p> Operator<'p> {
    /// This operator's id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> OperatorId {
        self.id
    }

    /// Tree depth from the synthetic root (root = 0).
    #[inline]
    #[must_use]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Parent back-reference; `None` only for the synthetic root.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<OperatorId> {
        self.parent
    }

    /// Child ids in plan order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[OperatorId] {
        &self.children
    }

    /// The underlying plan node; `None` for the synthetic root.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<&'p PlanNode> {
        self.node
    }

    /// Operator type identifier; `"Result"` for the synthetic root.
    #[must_use]
    pub fn operator_type(&self) -> &str {
        self.node
            .map_or(RESULT_OPERATOR, |n| n.operator_type.as_str())
    }

    /// Cardinality (actual or estimated rows, 0 when absent).
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> f64 {
        self.node.map_or(0.0, PlanNode::row_count)
    }

    /// Db-hit count (0 when absent).
    #[inline]
    #[must_use]
    pub fn db_hit_count(&self) -> f64 {
        self.node.map_or(0.0, PlanNode::db_hit_count)
    }

    /// Whether the detail block is shown. The synthetic root never expands.
    #[inline]
    #[must_use]
    pub fn expanded(&self) -> bool {
        self.node.is_some_and(|n| n.expanded)
    }
}

/// A parent-child edge: `source` is the child, `target` its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub source: OperatorId,
    pub target: OperatorId,
}

/// The flattened plan: operators in depth-first traversal order, links in
/// edge-visit order, and rank grouping.
#[derive(Debug)]
pub struct FlatPlan<'p> {
    operators: Vec<Operator<'p>>,
    links: Vec<Link>,
    rank_count: u32,
}

impl<'p> FlatPlan<'p> {
    /// A plan holding only the synthetic root. The degenerate case when the
    /// upstream extraction produced no operators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            operators: vec![Operator {
                id: OperatorId::ROOT,
                rank: 0,
                parent: None,
                children: SmallVec::new(),
                node: None,
            }],
            links: Vec::new(),
            rank_count: 1,
        }
    }

    /// Flatten a plan tree, wrapping `root` in a synthetic `Result`
    /// operator at rank 0.
    ///
    /// Depth-first preorder traversal assigns `rank = parent rank + 1` to
    /// every node and records one [`Link`] per tree edge. The input tree is
    /// only read; all derived structure lives in the returned plan.
    #[must_use]
    pub fn from_root(root: &'p PlanNode) -> Self {
        let mut plan = Self::empty();
        plan.visit(root, OperatorId::ROOT, 1);
        plan
    }

    fn visit(&mut self, node: &'p PlanNode, parent: OperatorId, rank: u32) {
        let id = OperatorId(self.operators.len() as u32);
        self.operators.push(Operator {
            id,
            rank,
            parent: Some(parent),
            children: SmallVec::new(),
            node: Some(node),
        });
        self.operators[parent.index()].children.push(id);
        self.links.push(Link {
            source: id,
            target: parent,
        });
        self.rank_count = self.rank_count.max(rank + 1);
        for child in &node.children {
            self.visit(child, id, rank + 1);
        }
    }

    /// All operators, synthetic root first, then depth-first preorder.
    #[inline]
    #[must_use]
    pub fn operators(&self) -> &[Operator<'p>] {
        &self.operators
    }

    /// Look up an operator by id.
    #[inline]
    #[must_use]
    pub fn operator(&self, id: OperatorId) -> &Operator<'p> {
        &self.operators[id.index()]
    }

    /// All links, in edge-visit order.
    #[inline]
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of distinct ranks (tree depth + 1).
    #[inline]
    #[must_use]
    pub fn rank_count(&self) -> usize {
        self.rank_count as usize
    }

    /// Group operator ids by rank, preserving traversal order within each
    /// rank. This ordering is the left-to-right layout order before
    /// relaxation.
    #[must_use]
    pub fn ranks(&self) -> Vec<Vec<OperatorId>> {
        let mut ranks = vec![Vec::new(); self.rank_count()];
        for op in &self.operators {
            ranks[op.rank as usize].push(op.id);
        }
        ranks
    }
}
