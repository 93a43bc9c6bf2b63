//! Turns a list of papers and the references they declare into a citation
//! graph: inverse references, influence, a deterministic layout, exports for
//! diagram renderers, and selection highlighting.
//!
//! Every stage is a pure function of the record list. Callers rerun
//! [`analyze`] (or [`build_citation_graph`]) whenever that list changes.

pub mod citation;
pub mod config;
pub mod export;
pub mod highlight;
pub mod layout;
pub mod search;
pub mod util;

use anyhow::Result;

pub use citation::{CitationGraph, PaperNode, PaperRecord, build_citation_graph, parse_records};
pub use config::{DuplicatePolicy, ExportOptions, GraphConfig, LayoutConfig, RadiusStep};
pub use export::{FlowGraph, MermaidExport, flow_graph, mermaid_diagram};
pub use highlight::{Highlight, HighlightState, ReferenceTarget, resolve_reference_click, select_node};

/// Parses raw JSON and runs the full derivation.
pub fn analyze(raw: &str, config: &GraphConfig) -> Result<CitationGraph> {
    let records = parse_records(raw)?;
    Ok(build_citation_graph(records, config))
}
