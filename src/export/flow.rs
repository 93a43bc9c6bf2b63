use serde::Serialize;

use crate::citation::{CitationGraph, Position};
use crate::config::ExportOptions;

use super::exported_edges;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Node and edge lists for a node/edge diagram widget.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

pub fn flow_graph(graph: &CitationGraph, options: &ExportOptions) -> FlowGraph {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| FlowNode {
            id: node.id.clone(),
            label: node.id.clone(),
            position: node.position,
        })
        .collect();

    let edges = exported_edges(graph, options)
        .into_iter()
        .map(|edge| FlowEdge {
            id: format!("{}-{}", edge.source, edge.target),
            source: edge.source.clone(),
            target: edge.target.clone(),
        })
        .collect();

    FlowGraph { nodes, edges }
}
