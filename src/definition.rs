//! Parser for the structural definition document (`model.bim`).
//!
//! The definition document describes the model as authored: tables with
//! their partitions, columns, measures, and storage settings. This module
//! decodes it into a [`ModelSummary`] rollup, a flat ordered sequence of
//! [`TableRecord`]s, and a per-table [`TableExpression`] sequence.
//!
//! Missing optional fields never fail the parse; they degrade to documented
//! defaults (`"Unknown"` for strings, `0` for counters, an absent size for
//! unmeasured models). Only a document that is not shaped as a JSON object
//! fails, with [`DefinitionError::Format`].

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while parsing a definition document.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The input is not decodable as a definition document.
    #[error("definition document is not a valid model definition: {0}")]
    Format(#[source] serde_json::Error),
}

/// Result type for definition parsing.
pub type DefinitionResult<T> = Result<T, DefinitionError>;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefinitionDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "lastUpdate", default)]
    last_update: Option<String>,
    #[serde(default)]
    model: Option<ModelBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelBody {
    #[serde(rename = "estimatedSize", default)]
    estimated_size: Option<u64>,
    #[serde(rename = "defaultPowerBIDataSourceVersion", default)]
    storage_format: Option<String>,
    #[serde(default)]
    tables: Vec<TableBody>,
}

#[derive(Debug, Deserialize)]
struct TableBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "isHidden", default)]
    is_hidden: bool,
    #[serde(rename = "lineageTag", default)]
    lineage_tag: Option<String>,
    #[serde(rename = "estimatedSize", default)]
    estimated_size: Option<u64>,
    /// Column bodies are only counted, never inspected.
    #[serde(default)]
    columns: Vec<IgnoredAny>,
    #[serde(default)]
    measures: Vec<IgnoredAny>,
    #[serde(default)]
    partitions: Vec<PartitionBody>,
}

#[derive(Debug, Deserialize)]
struct PartitionBody {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    rows: u64,
    #[serde(rename = "modifiedTime", default)]
    modified_time: Option<String>,
    #[serde(rename = "refreshedTime", default)]
    refreshed_time: Option<String>,
    #[serde(default)]
    source: Option<PartitionSource>,
}

#[derive(Debug, Default, Deserialize)]
struct PartitionSource {
    #[serde(default)]
    expression: Option<String>,
}

// ============================================================================
// Output Types
// ============================================================================

/// Storage mode of a table partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageMode {
    Import,
    DirectQuery,
    Dual,
    Unknown,
}

impl StorageMode {
    /// Parse a partition `mode` string; unrecognized values map to `Unknown`.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "import" => Self::Import,
            "directQuery" => Self::DirectQuery,
            "dual" => Self::Dual,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Import => "Import",
            Self::DirectQuery => "DirectQuery",
            Self::Dual => "Dual",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Whole-model rollup built once per parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    #[serde(rename = "Model Name")]
    pub model_name: String,

    #[serde(rename = "Date Modified")]
    pub date_modified: String,

    /// Estimated size of the whole model, when the document reports one.
    #[serde(
        rename = "Total Size of Model",
        serialize_with = "serialize_size_or_not_available"
    )]
    pub total_size: Option<u64>,

    #[serde(rename = "Storage Format")]
    pub storage_format: String,

    #[serde(rename = "Number of Tables")]
    pub table_count: usize,

    #[serde(rename = "Number of Partitions")]
    pub partition_count: usize,

    /// Maximum over all tables of that table's summed partition rows.
    #[serde(rename = "Max Row Count of Biggest Table")]
    pub max_row_count: u64,

    #[serde(rename = "Total Columns")]
    pub column_count: usize,

    #[serde(rename = "Total Measures")]
    pub measure_count: usize,
}

/// One attribute/value row of the model summary, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Attribute")]
    pub attribute: &'static str,
    #[serde(rename = "Value")]
    pub value: String,
}

impl ModelSummary {
    /// The summary as an ordered attribute/value pair list.
    pub fn attribute_rows(&self) -> Vec<SummaryRow> {
        let total_size = match self.total_size {
            Some(size) => size.to_string(),
            None => "Not Available".to_string(),
        };
        vec![
            SummaryRow {
                attribute: "Model Name",
                value: self.model_name.clone(),
            },
            SummaryRow {
                attribute: "Date Modified",
                value: self.date_modified.clone(),
            },
            SummaryRow {
                attribute: "Total Size of Model",
                value: total_size,
            },
            SummaryRow {
                attribute: "Storage Format",
                value: self.storage_format.clone(),
            },
            SummaryRow {
                attribute: "Number of Tables",
                value: self.table_count.to_string(),
            },
            SummaryRow {
                attribute: "Number of Partitions",
                value: self.partition_count.to_string(),
            },
            SummaryRow {
                attribute: "Max Row Count of Biggest Table",
                value: self.max_row_count.to_string(),
            },
            SummaryRow {
                attribute: "Total Columns",
                value: self.column_count.to_string(),
            },
            SummaryRow {
                attribute: "Total Measures",
                value: self.measure_count.to_string(),
            },
        ]
    }
}

/// Flattened per-table record derived from the definition document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRecord {
    #[serde(rename = "Table Name")]
    pub table_name: String,

    /// Storage mode of the first partition (single-partition simplification:
    /// consistency across partitions is not validated).
    #[serde(rename = "Mode")]
    pub mode: StorageMode,

    #[serde(rename = "Partitions")]
    pub partition_count: usize,

    /// Summed row count across all partitions of the table.
    #[serde(rename = "Rows")]
    pub row_count: u64,

    #[serde(rename = "Table Size")]
    pub table_size: u64,

    /// Share of the summed size of all tables, rounded to two decimals;
    /// 0 when the total is 0.
    #[serde(rename = "% of Total Size")]
    pub size_percent: f64,

    #[serde(rename = "Is Hidden")]
    pub is_hidden: bool,

    /// Lexicographic maximum of the partition `modifiedTime` strings;
    /// `"Unknown"` when no partition carries one.
    #[serde(rename = "Latest Partition Modified")]
    pub latest_modified: String,

    #[serde(rename = "Latest Partition Refreshed")]
    pub latest_refreshed: String,

    #[serde(rename = "Lineage Tag")]
    pub lineage_tag: String,
}

/// Source expression text for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableExpression {
    #[serde(rename = "Table Name")]
    pub table_name: String,
    #[serde(rename = "Expression")]
    pub expression: String,
}

/// Everything extracted from one definition document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDefinition {
    pub summary: ModelSummary,
    pub tables: Vec<TableRecord>,
    pub expressions: Vec<TableExpression>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a definition document from an in-memory buffer.
///
/// # Errors
///
/// Returns [`DefinitionError::Format`] if the buffer is not a valid JSON
/// object of the expected shape. Missing optional fields are not errors.
pub fn parse_definition(bytes: &[u8]) -> DefinitionResult<ParsedDefinition> {
    // Deserialize through a JSON map first: derived struct deserializers
    // also accept positional sequences, but the document must be an object.
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(bytes).map_err(DefinitionError::Format)?;
    let document: DefinitionDocument =
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(DefinitionError::Format)?;
    Ok(build_definition(document))
}

fn build_definition(document: DefinitionDocument) -> ParsedDefinition {
    let model = document.model.unwrap_or_default();

    // The percentage denominator is fixed up front over all tables.
    let total_table_size: u64 = model
        .tables
        .iter()
        .map(|t| t.estimated_size.unwrap_or(0))
        .sum();

    let mut tables = Vec::with_capacity(model.tables.len());
    let mut expressions = Vec::with_capacity(model.tables.len());
    let mut partition_count = 0;
    let mut column_count = 0;
    let mut measure_count = 0;
    let mut max_row_count = 0u64;

    for table in &model.tables {
        let table_name = table
            .name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        partition_count += table.partitions.len();
        column_count += table.columns.len();
        measure_count += table.measures.len();

        let table_size = table.estimated_size.unwrap_or(0);
        let size_percent = if total_table_size > 0 {
            round_two(table_size as f64 / total_table_size as f64 * 100.0)
        } else {
            0.0
        };

        let row_count: u64 = table.partitions.iter().map(|p| p.rows).sum();
        max_row_count = max_row_count.max(row_count);

        // Mode and expression come from the first partition only.
        let first = table.partitions.first();
        let mode = first
            .and_then(|p| p.mode.as_deref())
            .map(StorageMode::parse)
            .unwrap_or(StorageMode::Unknown);
        let expression = first
            .and_then(|p| p.source.as_ref())
            .and_then(|s| s.expression.clone())
            .unwrap_or_default();

        let latest_modified =
            latest_timestamp(table.partitions.iter().filter_map(|p| p.modified_time.as_deref()));
        let latest_refreshed =
            latest_timestamp(table.partitions.iter().filter_map(|p| p.refreshed_time.as_deref()));

        expressions.push(TableExpression {
            table_name: table_name.clone(),
            expression,
        });
        tables.push(TableRecord {
            table_name,
            mode,
            partition_count: table.partitions.len(),
            row_count,
            table_size,
            size_percent,
            is_hidden: table.is_hidden,
            latest_modified,
            latest_refreshed,
            lineage_tag: table
                .lineage_tag
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        });
    }

    let summary = ModelSummary {
        model_name: document.name.unwrap_or_else(|| "Unknown".to_string()),
        date_modified: document
            .last_update
            .unwrap_or_else(|| "Unknown".to_string()),
        total_size: model.estimated_size,
        storage_format: model
            .storage_format
            .unwrap_or_else(|| "Unknown".to_string()),
        table_count: model.tables.len(),
        partition_count,
        max_row_count,
        column_count,
        measure_count,
    };

    log::debug!(
        "parsed definition: {} tables, {} partitions",
        summary.table_count,
        summary.partition_count
    );

    ParsedDefinition {
        summary,
        tables,
        expressions,
    }
}

/// Lexicographic maximum of the given timestamp strings.
///
/// ISO-8601 timestamps sort correctly under string comparison, which is the
/// ordering the source documents use; timestamps are deliberately not parsed.
fn latest_timestamp<'a>(timestamps: impl Iterator<Item = &'a str>) -> String {
    timestamps
        .max()
        .map(str::to_string)
        .unwrap_or_else(|| "Unknown".to_string())
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_size_or_not_available<S>(size: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match size {
        Some(size) => serializer.serialize_u64(*size),
        None => serializer.serialize_str("Not Available"),
    }
}
