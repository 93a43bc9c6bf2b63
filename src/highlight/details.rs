use serde::Serialize;

use crate::citation::{CitationGraph, Passthrough};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub id: String,
    pub in_graph: bool,
}

/// Sidebar view of one paper: its passthrough fields plus both reference
/// lists, each entry marked as clickable in-graph or dangling.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDetails {
    pub id: String,
    pub authors: Option<String>,
    pub publication_date: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub influence: f64,
    pub references: Vec<ReferenceEntry>,
    pub cited_by: Vec<ReferenceEntry>,
}

pub fn paper_details(graph: &CitationGraph, id: &str) -> Option<PaperDetails> {
    let node = graph.node(id)?;

    let entries = |ids: &[String]| {
        ids.iter()
            .map(|reference| ReferenceEntry {
                id: reference.clone(),
                in_graph: graph.contains(reference),
            })
            .collect::<Vec<_>>()
    };

    Some(PaperDetails {
        id: node.id.clone(),
        authors: node.authors(),
        publication_date: node.publication_date().map(str::to_owned),
        url: node.url().map(str::to_owned),
        summary: node.summary().map(str::to_owned),
        influence: node.influence,
        references: entries(&node.out_references),
        cited_by: entries(&node.in_references),
    })
}
