use nodescope_core::view::{format_storage, usage_bar};
use nodescope_core::NormalizedNode;
use std::fmt::Write;

pub fn render(nodes: &[&NormalizedNode]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {:<20} {:<10} {:<8} {:<16} {:<20} {:<20} {}",
        "Name", "OS", "Arch", "Internal IP", "CPU Usage", "Memory Usage", "Storage"
    );
    let _ = writeln!(out, "{:-<120}", "");

    for node in nodes {
        let _ = writeln!(
            out,
            "  {:<20} {:<10} {:<8} {:<16} {:>7.2} {:<12} {:>7.2} {:<12} {}",
            node.name,
            node.os,
            node.arch,
            node.internal_ip,
            node.cpu_usage,
            usage_bar(node.cpu_usage),
            node.memory_usage,
            usage_bar(node.memory_usage),
            format_storage(node.storage_usage, node.total_storage),
        );
    }

    out
}
