//! Reconciliation of authored table records with measured table statistics.
//!
//! This is a left join on table name: every [`TableRecord`] yields exactly
//! one [`MergedTableRecord`], in input order. Statistics entries with no
//! matching definition table are dropped silently. A definition table with
//! no statistics entry gets `"N/A"` for both measured size columns — a
//! designed placeholder, not a numeric zero, so numeric aggregation
//! downstream must exclude it explicitly.
//!
//! Output records are copy-constructed; the inputs are never mutated, so
//! the same record sequence can be reconciled from concurrent call sites.

use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::definition::TableRecord;
use crate::statistics::TableStatistics;

/// One table carrying both authored and measured attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedTableRecord {
    #[serde(flatten)]
    pub table: TableRecord,

    /// Measured total size of the table's columns, or `"N/A"` on a join miss.
    #[serde(rename = "Columns Size", serialize_with = "serialize_size_or_na")]
    pub columns_size: Option<u64>,

    /// Measured total size of the table, or `"N/A"` on a join miss.
    #[serde(rename = "DAX Table Size", serialize_with = "serialize_size_or_na")]
    pub dax_table_size: Option<u64>,
}

/// Join definition records with the table statistics lookup by table name.
///
/// The output has the same length and order as `tables`; order preservation
/// is a contract, not incidental.
pub fn reconcile(
    tables: &[TableRecord],
    statistics: &HashMap<String, TableStatistics>,
) -> Vec<MergedTableRecord> {
    tables
        .iter()
        .map(|table| {
            let stats = statistics.get(&table.table_name);
            MergedTableRecord {
                table: table.clone(),
                columns_size: stats.and_then(|s| s.columns_size),
                dax_table_size: stats.and_then(|s| s.table_size),
            }
        })
        .collect()
}

fn serialize_size_or_na<S>(size: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match size {
        Some(size) => serializer.serialize_u64(*size),
        None => serializer.serialize_str("N/A"),
    }
}
