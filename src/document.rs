//! End-to-end documentation pipeline.
//!
//! This module provides the high-level API for turning the two source
//! documents into one documentation bundle:
//!
//! ```text
//! model.bim ──▶ [definition] ──┐
//!                              ├──▶ [reconcile] ──▶ ModelDocumentation
//! DaxVpaView.json ──▶ [statistics] ──▶ [graph] ──┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use modeldoc::document::document_model;
//!
//! let bundle = document_model(&bim_bytes, &vpa_bytes)?;
//! println!("{} tables", bundle.tables.len());
//! ```
//!
//! The pipeline is a pure, one-shot transformation: it reads only the two
//! byte buffers it is given, and a malformed document aborts the whole run
//! with a single descriptive failure instead of partial output.

use serde::Serialize;

use crate::definition::{self, DefinitionError, ModelSummary, TableExpression};
use crate::graph::{self, GraphElement};
use crate::reconcile::{self, MergedTableRecord};
use crate::statistics::{self, ColumnStatistics, MeasureStatistics, RelationshipStatistics, StatisticsError};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while documenting a model.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to parse definition document: {0}")]
    Definition(#[from] DefinitionError),

    #[error("failed to parse statistics document: {0}")]
    Statistics(#[from] StatisticsError),
}

/// Result type for the documentation pipeline.
pub type DocumentResult<T> = Result<T, DocumentError>;

// ============================================================================
// Result Types
// ============================================================================

/// The complete documentation bundle handed to the presentation layer.
///
/// All fields are plain, order-preserving, serializable record sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDocumentation {
    /// Whole-model rollup; [`ModelSummary::attribute_rows`] renders it as
    /// the attribute/value pair list.
    pub summary: ModelSummary,

    /// One merged record per definition table, in definition order.
    pub tables: Vec<MergedTableRecord>,

    pub columns: Vec<ColumnStatistics>,

    pub measures: Vec<MeasureStatistics>,

    /// Relationships carrying the derived `from`/`to`/`cardinality` fields.
    pub relationships: Vec<RelationshipStatistics>,

    /// Per-table source expression text, in definition order.
    pub expressions: Vec<TableExpression>,

    /// Node/edge element list for the relationship diagram.
    pub graph: Vec<GraphElement>,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Document a model from its definition and statistics byte buffers.
///
/// Deterministic: re-running over unchanged buffers produces identical
/// output.
///
/// # Errors
///
/// Returns [`DocumentError`] when either buffer is not decodable as its
/// expected document shape.
pub fn document_model(
    definition_bytes: &[u8],
    statistics_bytes: &[u8],
) -> DocumentResult<ModelDocumentation> {
    let parsed_definition = definition::parse_definition(definition_bytes)?;
    let parsed_statistics = statistics::parse_statistics(statistics_bytes)?;

    let tables = reconcile::reconcile(&parsed_definition.tables, &parsed_statistics.tables);
    let graph = graph::build_relationship_graph(&parsed_statistics.relationships);

    log::info!(
        "documented model '{}': {} tables, {} relationships",
        parsed_definition.summary.model_name,
        tables.len(),
        parsed_statistics.relationships.len()
    );

    Ok(ModelDocumentation {
        summary: parsed_definition.summary,
        tables,
        columns: parsed_statistics.columns,
        measures: parsed_statistics.measures,
        relationships: parsed_statistics.relationships,
        expressions: parsed_definition.expressions,
        graph,
    })
}
