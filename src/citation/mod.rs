mod collect;
mod graph;
mod parse;

pub use collect::{
    apply_reference_index, build_citation_graph, build_reference_index, collapse_duplicates,
    with_influence,
};
pub use graph::{CitationGraph, Cites, Edge, PaperNode, PaperRecord, Passthrough, Position};
pub use parse::{MISSING_ID, SOURCE_ID_KEY, normalize_record, parse_records};
