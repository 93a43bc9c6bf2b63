use serde::Serialize;

use crate::citation::CitationGraph;

pub const LOOKUP_BASE_URL: &str = "https://www.semanticscholar.org/search?q=";

/// What a click on a reference label should do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ReferenceTarget {
    /// The reference is in the graph; select it.
    Pivot { id: String },
    /// Dangling reference; search the literature for it instead.
    ExternalLookup { query: String, url: String },
}

pub fn resolve_reference_click(graph: &CitationGraph, reference_id: &str) -> ReferenceTarget {
    if graph.contains(reference_id) {
        return ReferenceTarget::Pivot {
            id: reference_id.to_owned(),
        };
    }

    let query = reference_id.trim().to_owned();
    let url = format!("{LOOKUP_BASE_URL}{}", urlencoding::encode(&query));
    ReferenceTarget::ExternalLookup { query, url }
}

#[cfg(test)]
mod tests {
    use crate::citation::{PaperRecord, build_citation_graph};
    use crate::config::GraphConfig;

    use super::*;

    fn graph() -> CitationGraph {
        build_citation_graph(
            vec![PaperRecord::new(
                "Federated Learning",
                vec!["Privacy-Preserving ML".into()],
            )],
            &GraphConfig::default(),
        )
    }

    #[test]
    fn known_reference_pivots() {
        assert_eq!(
            resolve_reference_click(&graph(), "Federated Learning"),
            ReferenceTarget::Pivot {
                id: "Federated Learning".into()
            }
        );
    }

    #[test]
    fn dangling_reference_builds_lookup() {
        assert_eq!(
            resolve_reference_click(&graph(), " Privacy-Preserving ML "),
            ReferenceTarget::ExternalLookup {
                query: "Privacy-Preserving ML".into(),
                url: "https://www.semanticscholar.org/search?q=Privacy-Preserving%20ML".into(),
            }
        );
    }

    #[test]
    fn serializes_with_action_tag() {
        let value = serde_json::to_value(resolve_reference_click(&graph(), "X & Y")).unwrap();
        assert_eq!(value["action"], serde_json::json!("externalLookup"));
        assert_eq!(
            value["url"],
            serde_json::json!("https://www.semanticscholar.org/search?q=X%20%26%20Y")
        );
    }
}
