use std::collections::HashMap;

use crate::config::{DuplicatePolicy, GraphConfig};
use crate::layout::rank_positions;

use super::graph::{CitationGraph, Cites, Edge, PaperNode, PaperRecord};

/// Inverse citation index: cited id -> ids citing it, in scan order.
///
/// One entry is appended per reference occurrence, so a paper that lists the
/// same target twice is counted twice. Targets without a record still get an
/// entry.
pub fn build_reference_index<T: Cites>(papers: &[T]) -> HashMap<String, Vec<String>> {
    let mut reverse_refs: HashMap<String, Vec<String>> = HashMap::new();

    for paper in papers {
        for reference in paper.cited_ids() {
            reverse_refs
                .entry(reference.clone())
                .or_default()
                .push(paper.citing_id().to_owned());
        }
    }

    reverse_refs
}

pub fn apply_reference_index(nodes: &mut [PaperNode], reverse_refs: &HashMap<String, Vec<String>>) {
    for node in nodes {
        node.in_references = reverse_refs.get(&node.id).cloned().unwrap_or_default();
        node.num_in = node.in_references.len();
    }
}

pub fn with_influence(nodes: &mut [PaperNode]) {
    let max_in = nodes.iter().map(|node| node.num_in).max().unwrap_or(0);

    for node in nodes {
        node.influence = if max_in > 0 {
            node.num_in as f64 / max_in as f64
        } else {
            0.0
        };
    }
}

/// Folds records sharing an id into one slot according to `policy`.
///
/// Returns the surviving records in first-seen order and the ids that were
/// seen more than once.
pub fn collapse_duplicates(
    records: Vec<PaperRecord>,
    policy: DuplicatePolicy,
) -> (Vec<PaperRecord>, Vec<String>) {
    let mut slot_by_id: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut kept: Vec<PaperRecord> = Vec::with_capacity(records.len());
    let mut duplicates = Vec::new();

    for record in records {
        match slot_by_id.get(&record.id) {
            Some(&slot) => {
                if !duplicates.contains(&record.id) {
                    duplicates.push(record.id.clone());
                }
                if policy == DuplicatePolicy::LastWins {
                    kept[slot] = record;
                }
            }
            None => {
                slot_by_id.insert(record.id.clone(), kept.len());
                kept.push(record);
            }
        }
    }

    (kept, duplicates)
}

/// Runs the whole derivation: inverse index, duplicate folding, influence and
/// layout. Pure; callers rerun it whenever the record list changes.
pub fn build_citation_graph(records: Vec<PaperRecord>, config: &GraphConfig) -> CitationGraph {
    if records.is_empty() {
        return CitationGraph::empty();
    }

    // Counted over every record, including ones folded away below.
    let reverse_refs = build_reference_index(&records);

    let (records, duplicates) = collapse_duplicates(records, config.duplicates);
    for id in &duplicates {
        tracing::warn!(id = %id, policy = ?config.duplicates, "duplicate paper id in input");
    }

    let mut nodes = records
        .into_iter()
        .map(PaperNode::from_record)
        .collect::<Vec<_>>();

    apply_reference_index(&mut nodes, &reverse_refs);
    with_influence(&mut nodes);

    let positions = rank_positions(&nodes, &config.layout);
    for (node, position) in nodes.iter_mut().zip(positions) {
        node.position = position;
    }

    let mut index_by_id = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        index_by_id.insert(node.id.clone(), index);
    }

    let edges = nodes
        .iter()
        .flat_map(|node| {
            node.out_references.iter().map(|target| Edge {
                source: node.id.clone(),
                target: target.clone(),
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        duplicates = duplicates.len(),
        "built citation graph"
    );

    CitationGraph {
        nodes,
        index_by_id,
        edges,
        duplicates,
    }
}
