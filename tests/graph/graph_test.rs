#[cfg(test)]
mod tests {
    use modeldoc::graph::{build_relationship_graph, GraphElement};
    use modeldoc::statistics::RelationshipStatistics;

    fn relationship(from_table: &str, to_table: &str) -> RelationshipStatistics {
        RelationshipStatistics {
            from_table: from_table.to_string(),
            from_column: "Id".to_string(),
            to_table: to_table.to_string(),
            to_column: "Id".to_string(),
            from_cardinality: Some("Many".to_string()),
            to_cardinality: Some("One".to_string()),
            cross_filtering: Some("OneDirection".to_string()),
            from_label: format!("{}.Id", from_table),
            to_label: format!("{}.Id", to_table),
            cardinality: "Many-One-OneDirection".to_string(),
        }
    }

    fn nodes(elements: &[GraphElement]) -> Vec<&modeldoc::graph::GraphNode> {
        elements
            .iter()
            .filter_map(|e| match e {
                GraphElement::Node(node) => Some(node),
                GraphElement::Edge(_) => None,
            })
            .collect()
    }

    fn edges(elements: &[GraphElement]) -> Vec<&modeldoc::graph::GraphEdge> {
        elements
            .iter()
            .filter_map(|e| match e {
                GraphElement::Edge(edge) => Some(edge),
                GraphElement::Node(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_relationships_yield_empty_graph() {
        assert!(build_relationship_graph(&[]).is_empty());
    }

    #[test]
    fn test_element_ids_fold_in_position_index() {
        let elements = build_relationship_graph(&[relationship("A", "B")]);

        assert_eq!(elements.len(), 3);
        let nodes = nodes(&elements);
        assert_eq!(nodes[0].id, "from-0-A");
        assert_eq!(nodes[1].id, "to-0-B");

        let edges = edges(&elements);
        assert_eq!(edges[0].id, "e-0-A-B");
        assert_eq!(edges[0].source, "from-0-A");
        assert_eq!(edges[0].target, "to-0-B");
        assert!(edges[0].animated);
    }

    #[test]
    fn test_repeated_table_names_get_distinct_nodes() {
        let relationships = vec![relationship("A", "B"), relationship("A", "C")];
        let elements = build_relationship_graph(&relationships);

        let nodes = nodes(&elements);
        let edges = edges(&elements);
        assert_eq!(nodes.len(), 4);
        assert_eq!(edges.len(), 2);

        // Both "from" nodes display the same table but keep distinct ids.
        assert_eq!(nodes[0].label, "A");
        assert_eq!(nodes[2].label, "A");
        assert_ne!(nodes[0].id, nodes[2].id);

        let mut ids: Vec<&str> = elements
            .iter()
            .map(|e| match e {
                GraphElement::Node(node) => node.id.as_str(),
                GraphElement::Edge(edge) => edge.id.as_str(),
            })
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), elements.len());
    }

    #[test]
    fn test_nodes_carry_default_layout_position() {
        let elements = build_relationship_graph(&[relationship("A", "B")]);
        for node in nodes(&elements) {
            assert_eq!(node.position.x, 0.0);
            assert_eq!(node.position.y, 0.0);
        }
    }

    #[test]
    fn test_elements_serialize_as_flat_list() {
        let elements = build_relationship_graph(&[relationship("A", "B")]);
        let value = serde_json::to_value(&elements).unwrap();

        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0]["id"], "from-0-A");
        assert_eq!(list[0]["label"], "A");
        assert_eq!(list[0]["position"]["x"], 0.0);
        assert_eq!(list[2]["source"], "from-0-A");
        assert_eq!(list[2]["animated"], true);
    }
}
