use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use super::graph::PaperRecord;

/// Id given to records that carry neither `id` nor `name`.
pub const MISSING_ID: &str = "None";

const ID_KEYS: [&str; 2] = ["id", "name"];
const REFERENCE_KEYS: [&str; 2] = ["out_references", "outReferences"];

// Recomputed on every run, so whatever the backend sent is discarded.
const DERIVED_KEYS: [&str; 8] = [
    "num_out",
    "numOut",
    "num_in",
    "numIn",
    "in_references",
    "inReferences",
    "in_refs",
    "influence",
];

// Field names of a serialized node. Passthrough keys with these names would
// shadow the canonical values once metadata is flattened back in.
const RESERVED_KEYS: [&str; 7] = [
    "id",
    "outReferences",
    "numOut",
    "inReferences",
    "numIn",
    "influence",
    "position",
];

/// Where a non-string `id` is kept when `name` supplied the key instead.
pub const SOURCE_ID_KEY: &str = "source_id";

/// Parses either a bare record array or the `{ "query", "graph" }` envelope
/// returned by the lookup service.
pub fn parse_records(raw: &str) -> Result<Vec<PaperRecord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in paper list")?;

    let entries = match &parsed {
        Value::Array(entries) => entries,
        Value::Object(object) => object
            .get("graph")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("response object has no `graph` array"))?,
        _ => {
            return Err(anyhow!(
                "unexpected JSON type for paper list; expected an array or a response object"
            ));
        }
    };

    let records = entries.iter().map(normalize_record).collect::<Vec<_>>();
    tracing::debug!(records = records.len(), "parsed paper records");
    Ok(records)
}

pub fn normalize_record(value: &Value) -> PaperRecord {
    let Some(object) = value.as_object() else {
        tracing::debug!("record is not an object; using placeholder id");
        return PaperRecord::new(MISSING_ID, Vec::new());
    };

    let mut metadata = object.clone();

    // Only the key that supplied the id is consumed; `name` stays as
    // passthrough when a separate `id` exists.
    let id = ID_KEYS
        .iter()
        .find_map(|key| match metadata.get(*key) {
            Some(Value::String(id)) => Some((*key, id.clone())),
            _ => None,
        })
        .map(|(key, id)| {
            metadata.remove(key);
            id
        })
        .unwrap_or_else(|| MISSING_ID.to_owned());

    if let Some(source_id) = metadata.remove("id") {
        metadata.entry(SOURCE_ID_KEY).or_insert(source_id);
    }

    let out_references = take_references(&mut metadata);

    for key in DERIVED_KEYS.into_iter().chain(RESERVED_KEYS) {
        metadata.remove(key);
    }

    PaperRecord {
        id,
        out_references,
        metadata,
    }
}

fn take_references(metadata: &mut Map<String, Value>) -> Vec<String> {
    let mut references = Vec::new();
    let mut found = false;

    for key in REFERENCE_KEYS {
        let Some(value) = metadata.remove(key) else {
            continue;
        };
        if found {
            continue;
        }
        found = true;

        if let Value::Array(entries) = value {
            references = entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(reference) => Some(reference),
                    _ => None,
                })
                .collect();
        }
    }

    references
}
