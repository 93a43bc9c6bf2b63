use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};

/// A paper as supplied by the backend, after field defaulting.
///
/// `id` is the paper's display name and doubles as its key. Everything the
/// pipeline does not interpret lives in `metadata`, untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    pub id: String,
    pub out_references: Vec<String>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl PaperRecord {
    pub fn new(id: impl Into<String>, out_references: Vec<String>) -> Self {
        Self {
            id: id.into(),
            out_references,
            metadata: Map::new(),
        }
    }
}

/// Read access to the passthrough fields shared by records and nodes.
pub trait Passthrough {
    fn metadata(&self) -> &Map<String, Value>;

    fn url(&self) -> Option<&str> {
        metadata_str(self.metadata(), &["url"])
    }

    fn publication_date(&self) -> Option<&str> {
        metadata_str(self.metadata(), &["publication_date", "publicationDate"])
    }

    fn summary(&self) -> Option<&str> {
        metadata_str(self.metadata(), &["summary"])
    }

    /// Authors arrive either as one comma separated string or as a list.
    fn authors(&self) -> Option<String> {
        match self.metadata().get("authors")? {
            Value::String(authors) => Some(authors.clone()),
            Value::Array(entries) => {
                let names = entries
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>();
                if names.is_empty() {
                    None
                } else {
                    Some(names.join(", "))
                }
            }
            _ => None,
        }
    }
}

fn metadata_str<'a>(metadata: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| metadata.get(*key).and_then(Value::as_str))
}

impl Passthrough for PaperRecord {
    fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperNode {
    pub id: String,
    pub out_references: Vec<String>,
    pub num_out: usize,
    pub in_references: Vec<String>,
    pub num_in: usize,
    pub influence: f64,
    pub position: Position,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl PaperNode {
    /// Skeleton node: outgoing side filled in, everything derived left at zero.
    pub fn from_record(record: PaperRecord) -> Self {
        let num_out = record.out_references.len();
        Self {
            id: record.id,
            out_references: record.out_references,
            num_out,
            in_references: Vec::new(),
            num_in: 0,
            influence: 0.0,
            position: Position::default(),
            metadata: record.metadata,
        }
    }
}

impl Passthrough for PaperNode {
    fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

/// Anything that declares an id and the ids it cites.
pub trait Cites {
    fn citing_id(&self) -> &str;
    fn cited_ids(&self) -> &[String];
}

impl Cites for PaperRecord {
    fn citing_id(&self) -> &str {
        &self.id
    }

    fn cited_ids(&self) -> &[String] {
        &self.out_references
    }
}

impl Cites for PaperNode {
    fn citing_id(&self) -> &str {
        &self.id
    }

    fn cited_ids(&self) -> &[String] {
        &self.out_references
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug)]
pub struct CitationGraph {
    pub nodes: Vec<PaperNode>,
    pub index_by_id: HashMap<String, usize>,
    pub edges: Vec<Edge>,
    /// Ids that appeared on more than one input record, in discovery order.
    pub duplicates: Vec<String>,
}

impl CitationGraph {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            edges: Vec::new(),
            duplicates: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&PaperNode> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.nodes.get(index))
    }

    pub fn dangling_references(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .map(|edge| edge.target.as_str())
            .filter(|target| !self.contains(target) && seen.insert(*target))
            .collect()
    }

    pub fn most_cited(&self, limit: usize) -> Vec<&PaperNode> {
        let mut ranked = self.nodes.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.num_in
                .cmp(&a.num_in)
                .then_with(|| b.num_out.cmp(&a.num_out))
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn most_citing(&self, limit: usize) -> Vec<&PaperNode> {
        let mut ranked = self.nodes.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.num_out
                .cmp(&a.num_out)
                .then_with(|| b.num_in.cmp(&a.num_in))
        });
        ranked.truncate(limit);
        ranked
    }
}
