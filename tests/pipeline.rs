//! End-to-end checks of the derivation pipeline through the public API.

use std::collections::{HashMap, HashSet};

use incite_graph::citation::{Edge, MISSING_ID, SOURCE_ID_KEY};
use incite_graph::config::{ExportOptions, GraphConfig};
use incite_graph::highlight::Highlight;
use incite_graph::layout::rank_order;
use incite_graph::export::{MermaidExport, sanitize_id};
use incite_graph::{
    CitationGraph, ReferenceTarget, analyze, flow_graph, mermaid_diagram, resolve_reference_click, select_node,
};

const SAMPLE: &str = r#"{
  "query": "machine learning",
  "graph": [
    {"name": "Deep Learning for NLP", "url": "https://example.com/deep-nlp",
     "authors": "John Doe, Jane Smith", "publication_date": "2023-06-15",
     "out_references": ["Attention Mechanisms", "Language Models"], "num_out": 2},
    {"name": "Attention Mechanisms", "out_references": ["Sequence Modelling"], "num_out": 1},
    {"name": "Language Models", "out_references": ["Transformer Networks"], "num_out": 1},
    {"name": "Transformer Networks", "out_references": ["Neural Machine Translation"]},
    {"name": "Neural Machine Translation", "out_references": []},
    {"name": "Self-Supervised Learning", "out_references": ["Contrastive Learning"]},
    {"name": "Contrastive Learning", "out_references": ["Attention Mechanisms", "Language Models"]},
    {"url": "https://example.com/untitled"}
  ]
}"#;

fn sample() -> CitationGraph {
    analyze(SAMPLE, &GraphConfig::default()).unwrap()
}

fn edge(source: &str, target: &str) -> (String, String) {
    (source.to_owned(), target.to_owned())
}

#[test]
fn two_paper_scenario() {
    let raw = r#"[{"id": "P1", "outReferences": ["P2"]}, {"id": "P2", "outReferences": []}]"#;
    let graph = analyze(raw, &GraphConfig::default()).unwrap();

    let p1 = graph.node("P1").unwrap();
    assert_eq!((p1.num_out, p1.num_in, p1.influence), (1, 0, 0.0));
    let p2 = graph.node("P2").unwrap();
    assert_eq!((p2.num_out, p2.num_in, p2.influence), (0, 1, 1.0));

    assert_eq!(
        graph.edges,
        vec![Edge {
            source: "P1".into(),
            target: "P2".into()
        }]
    );

    let state = select_node(&graph, "P1").unwrap();
    assert_eq!(state.of("P1"), Highlight::Primary);
    assert_eq!(state.of("P2"), Highlight::Forward);
    assert!(state.nodes_with(Highlight::Backward).is_empty());
}

#[test]
fn in_counts_match_citing_records() {
    let graph = sample();
    for node in &graph.nodes {
        let citing = graph
            .nodes
            .iter()
            .map(|other| other.out_references.iter().filter(|r| **r == node.id).count())
            .sum::<usize>();
        assert_eq!(node.num_in, citing, "{}", node.id);
    }
}

#[test]
fn influence_stays_in_unit_range() {
    let graph = sample();
    let max_in = graph.nodes.iter().map(|node| node.num_in).max().unwrap();
    for node in &graph.nodes {
        assert!((0.0..=1.0).contains(&node.influence));
        if node.num_in == max_in {
            assert_eq!(node.influence, 1.0);
        }
    }
}

#[test]
fn placeholder_record_is_kept() {
    let graph = sample();
    let placeholder = graph.node(MISSING_ID).unwrap();
    assert!(placeholder.out_references.is_empty());
    assert_eq!(
        placeholder.metadata.get("url").and_then(|v| v.as_str()),
        Some("https://example.com/untitled")
    );
}

#[test]
fn most_citing_node_is_centered() {
    let config = GraphConfig::default();
    let graph = sample();
    let order = rank_order(&graph.nodes);
    let center = graph.nodes[order[0]].position;
    assert_eq!(graph.nodes[order[0]].id, "Deep Learning for NLP");
    assert_eq!((center.x, center.y), (config.layout.center_x, config.layout.center_y));

    let outer = order[2..]
        .iter()
        .map(|&slot| {
            let position = graph.nodes[slot].position;
            (position.x - config.layout.center_x).hypot(position.y - config.layout.center_y)
        })
        .collect::<Vec<_>>();
    assert!(outer.windows(2).all(|pair| (pair[0] - pair[1]).abs() < 1e-9));
}

fn decoded_edges(export: &MermaidExport) -> HashMap<(String, String), usize> {
    let mut lines = export.text.lines();
    assert_eq!(lines.next(), Some("graph TD"));

    let mut decoded = HashMap::new();
    for line in lines {
        let line = line.strip_suffix(';').unwrap();
        let (source, target) = line.split_once(" --> ").unwrap();
        let key = edge(
            export.resolve(source).unwrap(),
            export.resolve(target).unwrap(),
        );
        *decoded.entry(key).or_default() += 1;
    }
    decoded
}

fn expected_edges(graph: &CitationGraph) -> HashMap<(String, String), usize> {
    let mut expected = HashMap::new();
    for e in &graph.edges {
        *expected.entry(edge(&e.source, &e.target)).or_default() += 1;
    }
    expected
}

#[test]
fn mermaid_tokens_round_trip_to_edges() {
    let graph = sample();
    let export = mermaid_diagram(&graph, &ExportOptions::default());

    assert_eq!(decoded_edges(&export), expected_edges(&graph));
    assert!(!export.has_collisions());
}

#[test]
fn mermaid_round_trip_survives_token_collisions() {
    let raw = r#"[
        {"name": "a b", "out_references": ["a-b", "Missing Paper"]},
        {"name": "a-b", "out_references": ["a b"]},
        {"name": "a_b_2", "out_references": ["a-b", "Missing-Paper"]}
    ]"#;
    let graph = analyze(raw, &GraphConfig::default()).unwrap();
    let export = mermaid_diagram(&graph, &ExportOptions::default());

    assert!(export.has_collisions());
    assert_eq!(decoded_edges(&export), expected_edges(&graph));

    let tokens = ["a b", "a-b", "a_b_2", "Missing Paper", "Missing-Paper"]
        .iter()
        .map(|id| export.token_for(id).unwrap())
        .collect::<HashSet<_>>();
    assert_eq!(tokens.len(), 5);

    for collision in export.collisions() {
        assert!(collision.ids.len() > 1);
        assert!(collision.ids.iter().all(|id| sanitize_id(id) == collision.token));
    }
}

#[test]
fn node_json_keeps_canonical_keys() {
    let raw = r#"[{"id": 42, "name": "Title", "position": "top", "out_references": []}]"#;
    let graph = analyze(raw, &GraphConfig::default()).unwrap();

    let rendered = serde_json::to_string(&graph.nodes).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(reparsed[0]["id"], "Title");
    assert_eq!(reparsed[0][SOURCE_ID_KEY], 42);
    assert!(reparsed[0]["position"].is_object());
    assert_eq!(rendered.matches("\"id\"").count(), 1);
}

#[test]
fn flow_export_mirrors_graph() {
    let graph = sample();
    let flow = flow_graph(&graph, &ExportOptions::default());
    assert_eq!(flow.nodes.len(), graph.node_count());
    assert_eq!(flow.edges.len(), graph.edge_count());
    assert!(flow.edges.iter().any(|e| e.id == "Contrastive Learning-Language Models"));
}

#[test]
fn reference_clicks_pivot_or_look_up() {
    let graph = sample();
    match resolve_reference_click(&graph, "Language Models") {
        ReferenceTarget::Pivot { id } => {
            let state = select_node(&graph, &id).unwrap();
            assert_eq!(state.of("Transformer Networks"), Highlight::Forward);
            assert_eq!(state.of("Deep Learning for NLP"), Highlight::Backward);
            assert_eq!(state.of("Contrastive Learning"), Highlight::Backward);
        }
        other => panic!("expected pivot, got {other:?}"),
    }

    assert!(matches!(
        resolve_reference_click(&graph, "Sequence Modelling"),
        ReferenceTarget::ExternalLookup { .. }
    ));
    assert_eq!(
        graph.dangling_references(),
        vec!["Sequence Modelling"]
    );
}

#[test]
fn empty_list_is_not_an_error() {
    let graph = analyze("[]", &GraphConfig::default()).unwrap();
    assert_eq!(graph.node_count(), 0);
    let export = mermaid_diagram(&graph, &ExportOptions::default());
    assert_eq!(export.text, "graph TD\n");
    assert!(flow_graph(&graph, &ExportOptions::default()).nodes.is_empty());
}
