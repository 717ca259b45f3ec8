//! Helpers shared by the table renderers.

use crate::node::NormalizedNode;

pub const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Case-insensitive substring match on node name. An empty term keeps everything.
pub fn filter_by_name<'a>(nodes: &'a [NormalizedNode], term: &str) -> Vec<&'a NormalizedNode> {
    let needle = term.to_lowercase();
    nodes
        .iter()
        .filter(|node| node.name.to_lowercase().contains(&needle))
        .collect()
}

/// `"1.5Gi / 10.0Gi"`, or `"N/A"` when the node reports no storage.
pub fn format_storage(used_bytes: f64, total_bytes: f64) -> String {
    if total_bytes > 0.0 {
        format!("{:.1}Gi / {:.1}Gi", used_bytes / GIB, total_bytes / GIB)
    } else {
        "N/A".to_string()
    }
}

/// Usage value clamped into `0..=100` for progress bars.
pub fn usage_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Ten-cell text bar for terminal tables.
pub fn usage_bar(value: f64) -> String {
    let filled = (usage_percent(value) / 10.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RawNodeRecord;
    use serde_json::json;

    fn node(name: &str) -> NormalizedNode {
        NormalizedNode::from_raw(&RawNodeRecord::from_value(json!({ "node_name": name })))
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let nodes = vec![node("Master-0"), node("worker-1"), node("WORKER-2")];
        let hits: Vec<_> = filter_by_name(&nodes, "worker")
            .into_iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(hits, vec!["worker-1", "WORKER-2"]);
        assert_eq!(filter_by_name(&nodes, "").len(), 3);
        assert!(filter_by_name(&nodes, "edge").is_empty());
    }

    #[test]
    fn test_format_storage() {
        assert_eq!(format_storage(1.5 * GIB, 10.0 * GIB), "1.5Gi / 10.0Gi");
        assert_eq!(format_storage(5.0, 0.0), "N/A");
    }

    #[test]
    fn test_usage_percent_clamps() {
        assert_eq!(usage_percent(-4.0), 0.0);
        assert_eq!(usage_percent(42.5), 42.5);
        assert_eq!(usage_percent(180.0), 100.0);
        assert_eq!(usage_bar(50.0), "[#####.....]");
        assert_eq!(usage_bar(250.0), "[##########]");
    }
}
