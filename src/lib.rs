//! # Modeldoc
//!
//! A documentation engine for tabular analytical models.
//!
//! Modeldoc combines two independently produced descriptions of a model —
//! the authored structural definition (`model.bim`) and the measured
//! runtime statistics export (`DaxVpaView.json`) — into a single coherent,
//! serializable view.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐    ┌──────────────────────────┐
//! │   Definition document    │    │   Statistics document    │
//! │  (tables, partitions,    │    │  (sizes, columns,        │
//! │   columns, measures)     │    │  measures, relationships)│
//! └──────────────────────────┘    └──────────────────────────┘
//!              │                               │
//!              ▼ [definition]                  ▼ [statistics]
//! ┌──────────────────────────┐    ┌──────────────────────────┐
//! │ ModelSummary             │    │ table stats map          │
//! │ + flat TableRecords      │    │ + columns / measures     │
//! │ + expressions            │    │ + relationships          │
//! └──────────────────────────┘    └──────────────────────────┘
//!              │                      │                │
//!              └────────┬─────────────┘                ▼ [graph]
//!                       ▼ [reconcile]        ┌──────────────────┐
//!            ┌──────────────────────┐        │ nodes + edges    │
//!            │ MergedTableRecords   │        └──────────────────┘
//!            └──────────────────────┘
//! ```
//!
//! Every stage is a pure function over in-memory buffers; the library does
//! no file I/O and holds no state between invocations.

pub mod definition;
pub mod document;
pub mod graph;
pub mod reconcile;
pub mod statistics;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::definition::{
        parse_definition, ModelSummary, ParsedDefinition, StorageMode, TableExpression,
        TableRecord,
    };
    pub use crate::document::{document_model, DocumentError, ModelDocumentation};
    pub use crate::graph::{build_relationship_graph, GraphEdge, GraphElement, GraphNode};
    pub use crate::reconcile::{reconcile, MergedTableRecord};
    pub use crate::statistics::{
        parse_statistics, ColumnStatistics, MeasureStatistics, ParsedStatistics,
        RelationshipStatistics, TableStatistics,
    };
}
