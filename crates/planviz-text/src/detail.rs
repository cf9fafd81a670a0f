#![forbid(unsafe_code)]

//! The detail formatter: an expanded operator's attribute lines.
//!
//! Fields are selected in a fixed priority order (identifiers, index, the
//! first populated expression field, ordering), each word-wrapped to the
//! pixel budget, followed by fixed-format numeric lines. Populated groups
//! are separated by padding lines; a trailing separator is trimmed. Each
//! line carries the cumulative vertical offset the dimension estimator
//! reads back.

use planviz_core::consts::{
    DETAIL_FONT_SIZE, DETAIL_WIDTH_BUDGET, OPERATOR_DETAIL_HEIGHT, OPERATOR_PADDING, STANDARD_FONT,
};
use planviz_core::format_thousands;
use planviz_plan::PlanNode;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::measure::TextMeasurer;
use crate::wrap::wrap_tokens;

/// Semantic class of a detail line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailClass {
    /// Identifiers introduced by the operator.
    Identifiers,
    /// Index used by the operator.
    Index,
    /// Predicate/expression text.
    Expression,
    /// Ordering clause.
    Order,
    /// Peak memory.
    Memory,
    /// Page cache hit counter.
    PageCacheHits,
    /// Page cache miss counter.
    PageCacheMisses,
    /// Actual-vs-estimated cardinality.
    EstimatedRows,
    /// Db-hit count (suppressed when the cost bar carries its own label).
    DbHits,
    /// Group separator; advances the offset by less than a text line.
    Padding,
}

/// One formatted detail line with its vertical offset inside the block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    pub class: DetailClass,
    pub text: String,
    pub y: f64,
}

impl DetailLine {
    fn text_line(class: DetailClass, text: String) -> Self {
        Self {
            class,
            text,
            y: 0.0,
        }
    }

    fn padding() -> Self {
        Self {
            class: DetailClass::Padding,
            text: String::new(),
            y: 0.0,
        }
    }

    /// Whether this is a group separator.
    #[inline]
    #[must_use]
    pub fn is_padding(&self) -> bool {
        self.class == DetailClass::Padding
    }
}

/// Formatting options: pixel budget, measurement font, and line advances.
#[derive(Debug, Clone)]
pub struct DetailOptions {
    /// Maximum measured width of a wrapped line.
    pub width_budget: f64,
    /// Font family passed to the measurer.
    pub font_family: String,
    /// Font size passed to the measurer.
    pub font_size: f64,
    /// Vertical advance of a text line.
    pub line_height: f64,
    /// Vertical advance of a padding separator.
    pub padding_advance: f64,
}

impl DetailOptions {
    /// Set the wrap budget.
    #[must_use]
    pub fn width_budget(mut self, budget: f64) -> Self {
        self.width_budget = budget;
        self
    }

    /// Set the measurement font.
    #[must_use]
    pub fn font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            width_budget: DETAIL_WIDTH_BUDGET,
            font_family: STANDARD_FONT.to_string(),
            font_size: DETAIL_FONT_SIZE,
            line_height: OPERATOR_DETAIL_HEIGHT,
            padding_advance: OPERATOR_PADDING * 2.0,
        }
    }
}

/// Identifiers the planner invented; meaningless to the user.
fn is_anonymous(identifier: &str) -> bool {
    identifier.starts_with("anon_") || identifier.starts_with(' ')
}

/// Identifiers line text: `identifiers` when present, otherwise the
/// comma-joined `key_names`, anonymous entries filtered either way.
fn identifiers_text(node: &PlanNode) -> Option<String> {
    let named: Vec<&str> = if let Some(ids) = &node.identifiers {
        ids.iter()
            .map(String::as_str)
            .filter(|id| !is_anonymous(id))
            .collect()
    } else if let Some(keys) = &node.key_names {
        keys.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty() && !is_anonymous(id))
            .collect()
    } else {
        return None;
    };
    if named.is_empty() {
        None
    } else {
        Some(named.join(", "))
    }
}

/// First populated expression-like field, in fixed priority order.
fn expression_text(node: &PlanNode) -> Option<&str> {
    [
        &node.details,
        &node.expressions,
        &node.expression,
        &node.legacy_expression,
        &node.expand_expression,
        &node.label_name,
        &node.signature,
    ]
    .into_iter()
    .find_map(|field| field.as_deref())
}

/// Format the detail lines of one operator.
///
/// Returns an empty list for a collapsed operator. `always_show_cost`
/// suppresses the db-hits line (the cost bar renders its own label
/// instead, so the figure is never shown twice).
#[must_use]
pub fn operator_details<M>(
    node: &PlanNode,
    always_show_cost: bool,
    options: &DetailOptions,
    measurer: &mut M,
) -> Vec<DetailLine>
where
    M: TextMeasurer + ?Sized,
{
    if !node.expanded {
        return Vec::new();
    }

    let mut details: Vec<DetailLine> = Vec::new();

    let mut push_wrapped = |details: &mut Vec<DetailLine>, text: &str, class: DetailClass| {
        for line in wrap_tokens(
            text,
            options.width_budget,
            &options.font_family,
            options.font_size,
            &mut *measurer,
        ) {
            details.push(DetailLine::text_line(class, line));
        }
        details.push(DetailLine::padding());
    };

    if let Some(identifiers) = identifiers_text(node) {
        push_wrapped(&mut details, &identifiers, DetailClass::Identifiers);
    }

    if let Some(index) = node.index.as_deref() {
        push_wrapped(&mut details, index, DetailClass::Index);
    }

    if let Some(expression) = expression_text(node) {
        push_wrapped(&mut details, expression, DetailClass::Expression);
    }

    if let Some(order) = node.order.as_deref() {
        push_wrapped(&mut details, &format!("Ordered by {order}"), DetailClass::Order);
    }

    if let Some(memory) = node.memory.filter(|m| *m > 0.0) {
        details.push(DetailLine::text_line(
            DetailClass::Memory,
            format!("{} B memory", format_thousands(memory)),
        ));
        details.push(DetailLine::padding());
    }

    let cache_hits = node.page_cache_hits.unwrap_or(0.0);
    let cache_misses = node.page_cache_misses.unwrap_or(0.0);
    if cache_hits > 0.0 || cache_misses > 0.0 {
        details.push(DetailLine::text_line(
            DetailClass::PageCacheHits,
            format!("{} page cache hits", format_thousands(cache_hits)),
        ));
        details.push(DetailLine::text_line(
            DetailClass::PageCacheMisses,
            format!("{} page cache misses", format_thousands(cache_misses)),
        ));
        details.push(DetailLine::padding());
    }

    if let (Some(rows), Some(estimated)) = (node.rows, node.estimated_rows) {
        details.push(DetailLine::text_line(
            DetailClass::EstimatedRows,
            format!(
                "{} rows ({} estimated)",
                format_thousands(rows),
                format_thousands(estimated)
            ),
        ));
        details.push(DetailLine::padding());
    }

    if let Some(db_hits) = node.db_hits
        && !always_show_cost
    {
        details.push(DetailLine::text_line(
            DetailClass::DbHits,
            format!("{} db hits", format_thousands(db_hits)),
        ));
        details.push(DetailLine::padding());
    }

    // No dangling separator after the last group.
    if details.last().is_some_and(DetailLine::is_padding) {
        details.pop();
    }

    let mut y = 0.0;
    for line in &mut details {
        line.y = y;
        y += if line.is_padding() {
            options.padding_advance
        } else {
            options.line_height
        };
    }

    trace!(
        operator = node.operator_type.as_str(),
        lines = details.len(),
        "formatted operator details"
    );
    details
}
