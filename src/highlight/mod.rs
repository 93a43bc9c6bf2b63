use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::citation::{CitationGraph, Edge};

mod details;
mod resolve;

pub use details::{PaperDetails, ReferenceEntry, paper_details};
pub use resolve::{LOOKUP_BASE_URL, ReferenceTarget, resolve_reference_click};

/// Role of a node relative to the current selection. Earlier variants take
/// precedence, so a self-citing selection is still `Primary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Primary,
    Forward,
    Backward,
    Default,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeHighlight {
    pub id: String,
    pub highlight: Highlight,
}

#[derive(Clone, Debug, Serialize)]
pub struct HighlightState {
    pub selected: String,
    pub nodes: Vec<NodeHighlight>,
    /// Edges leaving or entering the selection.
    pub edges: Vec<Edge>,
    #[serde(skip)]
    by_id: HashMap<String, Highlight>,
}

impl HighlightState {
    pub fn of(&self, id: &str) -> Highlight {
        self.by_id.get(id).copied().unwrap_or(Highlight::Default)
    }

    pub fn nodes_with(&self, highlight: Highlight) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| node.highlight == highlight)
            .map(|node| node.id.as_str())
            .collect()
    }

    pub fn highlighted_edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Classifies every node against `selected_id`. `None` when the id has no
/// node; dangling references go through [`resolve_reference_click`] instead.
pub fn select_node(graph: &CitationGraph, selected_id: &str) -> Option<HighlightState> {
    let selected = graph.node(selected_id)?;

    let forward = selected
        .out_references
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>();

    let nodes = graph
        .nodes
        .iter()
        .map(|node| {
            let highlight = if node.id == selected_id {
                Highlight::Primary
            } else if forward.contains(node.id.as_str()) {
                Highlight::Forward
            } else if node.out_references.iter().any(|r| r == selected_id) {
                Highlight::Backward
            } else {
                Highlight::Default
            };
            NodeHighlight {
                id: node.id.clone(),
                highlight,
            }
        })
        .collect::<Vec<_>>();

    let edges = graph
        .edges
        .iter()
        .filter(|edge| edge.source == selected_id || edge.target == selected_id)
        .cloned()
        .collect();

    let by_id = nodes
        .iter()
        .map(|node| (node.id.clone(), node.highlight))
        .collect();

    Some(HighlightState {
        selected: selected_id.to_owned(),
        nodes,
        edges,
        by_id,
    })
}
