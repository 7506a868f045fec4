//! Node/edge list construction for relationship visualization.
//!
//! Converts the flat relationship record sequence into the element list a
//! force-directed or flow diagram consumes: per relationship, a "from"
//! node, a "to" node, and the edge connecting them, in input order.
//!
//! No de-duplication of repeated table names is performed: a table that
//! appears in N relationships yields N distinct node identities, so each
//! edge is visually independent. Consumers must not assume the node count
//! equals the distinct-table count. Uniqueness of every generated id is
//! guaranteed by folding the relationship's position index into it.

use serde::Serialize;

use crate::statistics::RelationshipStatistics;

/// Layout position of a node. Layout is left to the consuming
/// visualization; every node starts at the same default coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One node of the relationship diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub position: Position,
}

/// One edge of the relationship diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
}

/// A node or edge; the output serializes as one flat element list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraphElement {
    Node(GraphNode),
    Edge(GraphEdge),
}

/// Build the element list for the given relationships.
///
/// Emits three elements per relationship: the "from" node, the "to" node,
/// and the connecting edge, ids derived from the relationship's index.
pub fn build_relationship_graph(relationships: &[RelationshipStatistics]) -> Vec<GraphElement> {
    let mut elements = Vec::with_capacity(relationships.len() * 3);
    for (index, relationship) in relationships.iter().enumerate() {
        let from_id = format!("from-{}-{}", index, relationship.from_table);
        let to_id = format!("to-{}-{}", index, relationship.to_table);

        elements.push(GraphElement::Node(GraphNode {
            id: from_id.clone(),
            label: relationship.from_table.clone(),
            position: Position::default(),
        }));
        elements.push(GraphElement::Node(GraphNode {
            id: to_id.clone(),
            label: relationship.to_table.clone(),
            position: Position::default(),
        }));
        elements.push(GraphElement::Edge(GraphEdge {
            id: format!(
                "e-{}-{}-{}",
                index, relationship.from_table, relationship.to_table
            ),
            source: from_id,
            target: to_id,
            animated: true,
        }));
    }
    elements
}
