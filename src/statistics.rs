//! Parser for the runtime statistics document (`DaxVpaView.json`).
//!
//! The statistics export describes the model as measured after processing:
//! physical table sizes, per-column and per-measure details, and
//! relationship cardinalities. This module decodes it into a table-keyed
//! [`TableStatistics`] lookup plus flat ordered column, measure, and
//! relationship record sequences.
//!
//! Relationship records are annotated at construction with three derived
//! display fields (`from`, `to`, `cardinality`) computed purely from the
//! record's own fields; absent cardinality or cross-filter values surface
//! as a normalized `"Unknown"` rather than an absence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while parsing a statistics document.
#[derive(Debug, Error)]
pub enum StatisticsError {
    /// The input is not decodable as a statistics document.
    #[error("statistics document is not a valid VPA export: {0}")]
    Format(#[source] serde_json::Error),
}

/// Result type for statistics parsing.
pub type StatisticsResult<T> = Result<T, StatisticsError>;

// ============================================================================
// Record Types
// ============================================================================

/// Measured sizes for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatistics {
    #[serde(rename = "TableName", default)]
    pub table_name: String,

    #[serde(rename = "ColumnsSize", default)]
    pub columns_size: Option<u64>,

    #[serde(rename = "TableSize", default)]
    pub table_size: Option<u64>,
}

/// Measured details for one column; passes through in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    #[serde(rename = "TableName", default)]
    pub table_name: String,

    #[serde(rename = "ColumnName", default)]
    pub column_name: String,

    #[serde(rename = "DataType", default)]
    pub data_type: Option<String>,

    #[serde(rename = "ColumnCardinality", default)]
    pub column_cardinality: Option<u64>,

    #[serde(rename = "TotalSize", default)]
    pub total_size: Option<u64>,

    #[serde(rename = "DisplayFolder", default)]
    pub display_folder: Option<String>,
}

/// Measured details for one measure; passes through in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureStatistics {
    #[serde(rename = "TableName", default)]
    pub table_name: String,

    #[serde(rename = "MeasureName", default)]
    pub measure_name: String,

    #[serde(rename = "MeasureExpression", default)]
    pub expression: Option<String>,

    #[serde(rename = "DataType", default)]
    pub data_type: Option<String>,

    #[serde(rename = "DisplayFolder", default)]
    pub display_folder: Option<String>,
}

/// One inter-table relationship, with derived display fields attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipStatistics {
    #[serde(rename = "FromTableName")]
    pub from_table: String,

    #[serde(rename = "FromFullColumnName")]
    pub from_column: String,

    #[serde(rename = "ToTableName")]
    pub to_table: String,

    #[serde(rename = "ToFullColumnName")]
    pub to_column: String,

    #[serde(rename = "FromCardinalityType")]
    pub from_cardinality: Option<String>,

    #[serde(rename = "ToCardinalityType")]
    pub to_cardinality: Option<String>,

    #[serde(rename = "CrossFilteringBehavior")]
    pub cross_filtering: Option<String>,

    /// Derived `"table.column"` descriptor for the from side.
    #[serde(rename = "from")]
    pub from_label: String,

    /// Derived `"table.column"` descriptor for the to side.
    #[serde(rename = "to")]
    pub to_label: String,

    /// Derived `"{from}-{to}-{crossFilter}"` cardinality descriptor.
    #[serde(rename = "cardinality")]
    pub cardinality: String,
}

#[derive(Debug, Deserialize)]
struct RelationshipWire {
    #[serde(rename = "FromTableName", default)]
    from_table: String,
    #[serde(rename = "FromFullColumnName", default)]
    from_column: String,
    #[serde(rename = "ToTableName", default)]
    to_table: String,
    #[serde(rename = "ToFullColumnName", default)]
    to_column: String,
    #[serde(rename = "FromCardinalityType", default)]
    from_cardinality: Option<String>,
    #[serde(rename = "ToCardinalityType", default)]
    to_cardinality: Option<String>,
    #[serde(rename = "CrossFilteringBehavior", default)]
    cross_filtering: Option<String>,
}

impl From<RelationshipWire> for RelationshipStatistics {
    fn from(wire: RelationshipWire) -> Self {
        let from_label = format!("{}.{}", wire.from_table, wire.from_column);
        let to_label = format!("{}.{}", wire.to_table, wire.to_column);
        let cardinality = format!(
            "{}-{}-{}",
            wire.from_cardinality.as_deref().unwrap_or("Unknown"),
            wire.to_cardinality.as_deref().unwrap_or("Unknown"),
            wire.cross_filtering.as_deref().unwrap_or("Unknown"),
        );
        Self {
            from_table: wire.from_table,
            from_column: wire.from_column,
            to_table: wire.to_table,
            to_column: wire.to_column,
            from_cardinality: wire.from_cardinality,
            to_cardinality: wire.to_cardinality,
            cross_filtering: wire.cross_filtering,
            from_label,
            to_label,
            cardinality,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatisticsDocument {
    #[serde(rename = "Tables", default)]
    tables: Vec<TableStatistics>,
    #[serde(rename = "Columns", default)]
    columns: Vec<ColumnStatistics>,
    #[serde(rename = "Measures", default)]
    measures: Vec<MeasureStatistics>,
    #[serde(rename = "Relationships", default)]
    relationships: Vec<RelationshipWire>,
}

/// Everything extracted from one statistics document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatistics {
    /// Table statistics keyed by table name. When the document lists a name
    /// twice, the last occurrence wins.
    pub tables: HashMap<String, TableStatistics>,
    pub columns: Vec<ColumnStatistics>,
    pub measures: Vec<MeasureStatistics>,
    pub relationships: Vec<RelationshipStatistics>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a statistics document from an in-memory buffer.
///
/// A document missing any of the `Tables`, `Columns`, `Measures`, or
/// `Relationships` arrays yields empty sequences, not an error.
///
/// # Errors
///
/// Returns [`StatisticsError::Format`] if the buffer is not a valid JSON
/// object of the expected shape.
pub fn parse_statistics(bytes: &[u8]) -> StatisticsResult<ParsedStatistics> {
    // Deserialize through a JSON map first: derived struct deserializers
    // also accept positional sequences, but the document must be an object.
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(bytes).map_err(StatisticsError::Format)?;
    let document: StatisticsDocument =
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(StatisticsError::Format)?;

    let mut tables = HashMap::with_capacity(document.tables.len());
    for table in document.tables {
        tables.insert(table.table_name.clone(), table);
    }

    let relationships: Vec<RelationshipStatistics> = document
        .relationships
        .into_iter()
        .map(RelationshipStatistics::from)
        .collect();

    log::debug!(
        "parsed statistics: {} tables, {} columns, {} measures, {} relationships",
        tables.len(),
        document.columns.len(),
        document.measures.len(),
        relationships.len()
    );

    Ok(ParsedStatistics {
        tables,
        columns: document.columns,
        measures: document.measures,
        relationships,
    })
}
