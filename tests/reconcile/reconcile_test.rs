#[cfg(test)]
mod tests {
    use modeldoc::definition::{StorageMode, TableRecord};
    use modeldoc::reconcile::reconcile;
    use modeldoc::statistics::TableStatistics;
    use std::collections::HashMap;

    fn table_record(name: &str) -> TableRecord {
        TableRecord {
            table_name: name.to_string(),
            mode: StorageMode::Import,
            partition_count: 1,
            row_count: 100,
            table_size: 10,
            size_percent: 50.0,
            is_hidden: false,
            latest_modified: "2024-01-01T00:00:00Z".to_string(),
            latest_refreshed: "2024-01-01T00:00:00Z".to_string(),
            lineage_tag: "tag".to_string(),
        }
    }

    fn statistics_for(entries: &[(&str, u64, u64)]) -> HashMap<String, TableStatistics> {
        entries
            .iter()
            .map(|(name, columns_size, table_size)| {
                (
                    name.to_string(),
                    TableStatistics {
                        table_name: name.to_string(),
                        columns_size: Some(*columns_size),
                        table_size: Some(*table_size),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_join_hit_copies_measured_sizes() {
        let tables = vec![table_record("FactSales")];
        let statistics = statistics_for(&[("FactSales", 2048, 4096)]);

        let merged = reconcile(&tables, &statistics);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].columns_size, Some(2048));
        assert_eq!(merged[0].dax_table_size, Some(4096));
        assert_eq!(merged[0].table.table_name, "FactSales");
    }

    #[test]
    fn test_join_miss_yields_not_available() {
        let tables = vec![table_record("FactSales"), table_record("Orphan")];
        let statistics = statistics_for(&[("FactSales", 2048, 4096)]);

        let merged = reconcile(&tables, &statistics);
        assert_eq!(merged.len(), tables.len());
        assert_eq!(merged[1].columns_size, None);
        assert_eq!(merged[1].dax_table_size, None);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let tables = vec![
            table_record("C"),
            table_record("A"),
            table_record("B"),
        ];
        let statistics = statistics_for(&[("A", 1, 1), ("B", 2, 2), ("C", 3, 3)]);

        let merged = reconcile(&tables, &statistics);
        let names: Vec<&str> = merged.iter().map(|m| m.table.table_name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_unmatched_statistics_keys_are_dropped() {
        let tables = vec![table_record("FactSales")];
        let statistics = statistics_for(&[("FactSales", 1, 2), ("Unreferenced", 9, 9)]);

        let merged = reconcile(&tables, &statistics);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let tables = vec![table_record("FactSales")];
        let statistics = statistics_for(&[("FactSales", 1, 2)]);
        let tables_before = tables.clone();

        let _ = reconcile(&tables, &statistics);
        assert_eq!(tables, tables_before);
    }

    #[test]
    fn test_serialization_flattens_and_renders_na() {
        let tables = vec![table_record("FactSales"), table_record("Orphan")];
        let statistics = statistics_for(&[("FactSales", 2048, 4096)]);
        let merged = reconcile(&tables, &statistics);

        let hit = serde_json::to_value(&merged[0]).unwrap();
        assert_eq!(hit["Table Name"], "FactSales");
        assert_eq!(hit["Columns Size"], 2048);
        assert_eq!(hit["DAX Table Size"], 4096);

        let miss = serde_json::to_value(&merged[1]).unwrap();
        assert_eq!(miss["Columns Size"], "N/A");
        assert_eq!(miss["DAX Table Size"], "N/A");
    }

    #[test]
    fn test_statistics_entry_with_absent_sizes_stays_not_available() {
        let tables = vec![table_record("FactSales")];
        let mut statistics = HashMap::new();
        statistics.insert(
            "FactSales".to_string(),
            TableStatistics {
                table_name: "FactSales".to_string(),
                columns_size: None,
                table_size: None,
            },
        );

        let merged = reconcile(&tables, &statistics);
        assert_eq!(merged[0].columns_size, None);
        assert_eq!(merged[0].dax_table_size, None);
    }
}
