use std::collections::HashSet;

use crate::citation::{CitationGraph, Edge};
use crate::config::ExportOptions;

mod flow;
mod mermaid;

pub use flow::{FlowEdge, FlowGraph, FlowNode, flow_graph};
pub use mermaid::{
    FILLER, MermaidExport, SanitizationCollision, SanitizedIds, mermaid_diagram, sanitize_id,
};

/// Edges in input order, optionally collapsed to first occurrences.
fn exported_edges<'a>(graph: &'a CitationGraph, options: &ExportOptions) -> Vec<&'a Edge> {
    if !options.dedup_edges {
        return graph.edges.iter().collect();
    }

    let mut seen = HashSet::with_capacity(graph.edges.len());
    graph
        .edges
        .iter()
        .filter(|edge| seen.insert((edge.source.as_str(), edge.target.as_str())))
        .collect()
}
