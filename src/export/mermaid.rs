use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::citation::CitationGraph;
use crate::config::ExportOptions;

use super::exported_edges;

/// Replacement for every character the diagram grammar rejects in node ids.
pub const FILLER: char = '_';

pub fn sanitize_id(id: &str) -> String {
    if id.is_empty() {
        return FILLER.to_string();
    }

    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { FILLER })
        .collect()
}

/// Distinct ids that sanitize to the same `token`. The first id keeps it; the
/// others were given suffixed tokens. An id whose own token was taken by a
/// suffix is not a collision and is never listed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SanitizationCollision {
    pub token: String,
    pub ids: Vec<String>,
}

/// Bidirectional token <-> id map. Every token resolves to exactly one id.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedIds {
    #[serde(rename = "idMap")]
    to_original: BTreeMap<String, String>,
    #[serde(skip)]
    by_original: HashMap<String, String>,
    #[serde(skip)]
    ids_by_base: HashMap<String, Vec<String>>,
    collisions: Vec<SanitizationCollision>,
}

impl SanitizedIds {
    pub fn token_for(&self, id: &str) -> Option<&str> {
        self.by_original.get(id).map(String::as_str)
    }

    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.to_original.get(token).map(String::as_str)
    }

    pub fn collisions(&self) -> &[SanitizationCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.to_original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_original.is_empty()
    }

    /// Returns the token for `id`, assigning one on first sight.
    pub fn assign(&mut self, id: &str) -> String {
        if let Some(token) = self.by_original.get(id) {
            return token.clone();
        }

        let base = sanitize_id(id);
        let mut token = base.clone();
        let mut suffix = 2usize;
        while self.to_original.contains_key(&token) {
            token = format!("{base}{FILLER}{suffix}");
            suffix += 1;
        }

        self.to_original.insert(token.clone(), id.to_owned());
        self.by_original.insert(id.to_owned(), token.clone());

        let sharing = self.ids_by_base.entry(base.clone()).or_default();
        sharing.push(id.to_owned());
        if sharing.len() > 1 {
            let ids = sharing.clone();
            self.record_collision(base, ids);
        }

        token
    }

    fn record_collision(&mut self, token: String, ids: Vec<String>) {
        tracing::warn!(token = %token, ids = ?ids, "diagram id collision");
        match self
            .collisions
            .iter_mut()
            .find(|collision| collision.token == token)
        {
            Some(existing) => existing.ids = ids,
            None => self.collisions.push(SanitizationCollision { token, ids }),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MermaidExport {
    pub text: String,
    #[serde(flatten)]
    pub ids: SanitizedIds,
}

impl MermaidExport {
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.ids.resolve(token)
    }

    pub fn token_for(&self, id: &str) -> Option<&str> {
        self.ids.token_for(id)
    }

    pub fn collisions(&self) -> &[SanitizationCollision] {
        self.ids.collisions()
    }

    pub fn has_collisions(&self) -> bool {
        !self.ids.collisions().is_empty()
    }
}

/// Renders `graph <dir>` followed by one `SOURCE --> TARGET;` line per edge.
///
/// Node ids are registered first, in graph order, so the map covers papers
/// without edges and token assignment does not depend on edge order.
pub fn mermaid_diagram(graph: &CitationGraph, options: &ExportOptions) -> MermaidExport {
    let mut ids = SanitizedIds::default();
    for node in &graph.nodes {
        ids.assign(&node.id);
    }

    let mut text = format!("graph {}\n", options.direction);

    for edge in exported_edges(graph, options) {
        let source = ids.assign(&edge.source);
        let target = ids.assign(&edge.target);
        text.push_str(&format!("{source} --> {target};\n"));
    }

    MermaidExport { text, ids }
}
