// License: MIT

use serde_json::json;

use crate::document::UiDocument;
use crate::error::UidefError;
use crate::ui::{UiBlock, UiNode};
use crate::value::{MapEntry, Value};

/// Export a processed UI definition to JSON.
///
/// Projection rules:
/// - blocks → `{"kind": "base"/"addon", "body": [...]}`
/// - classified maps → `{"kind": "input"/..., "fields": [entries]}` where
///   fields serialize as arrays of `{"key"/"ref", "value"}` entries, so
///   insertion order and duplicate names survive
/// - generic maps keep their raw decoded entries the same way
/// - keywords render as `:name`, symbols as bare strings, tags as
///   `{"tag", "val"}` objects
pub fn export_document_to_json(doc: &UiDocument) -> Result<String, UidefError> {
    fn node_to_json(node: &UiNode) -> serde_json::Value {
        match node {
            UiNode::Group { sym } => json!({ "kind": "group", "symbol": sym }),
            UiNode::Symbol { name } => json!({ "kind": "symbol", "name": name }),
            UiNode::Input { fields } => json!({ "kind": "input", "fields": fields }),
            UiNode::Output { fields } => json!({ "kind": "output", "fields": fields }),
            UiNode::TargetSource { fields } => json!({ "kind": "target", "fields": fields }),
            UiNode::WhenThen { fields } => json!({ "kind": "when", "fields": fields }),
            UiNode::Map { name, raw } => json!({
                "kind": "map",
                "name": name,
                "entries": entries_to_json(raw),
            }),
        }
    }

    fn entries_to_json(entries: &[MapEntry]) -> serde_json::Value {
        let out: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| {
                json!({
                    "key": value_to_json(&entry.key),
                    "value": value_to_json(&entry.val),
                })
            })
            .collect();
        serde_json::Value::Array(out)
    }

    fn value_to_json(v: &Value) -> serde_json::Value {
        match v {
            Value::String(s) => json!(s),
            Value::Number(n) => json!(n),
            Value::Bool(b) => json!(b),
            Value::Null => serde_json::Value::Null,
            Value::Sequence(items) => {
                json!(items.iter().map(value_to_json).collect::<Vec<_>>())
            }
            Value::Map(entries) => entries_to_json(entries),
            Value::Set(items) => {
                json!({ "set": items.iter().map(value_to_json).collect::<Vec<_>>() })
            }
            Value::Keyword(k) => json!(format!(":{}", k)),
            Value::Symbol(s) => json!(s),
            Value::Tagged(tag, val) => json!({ "tag": tag, "val": value_to_json(val) }),
        }
    }

    let blocks: Vec<serde_json::Value> = doc
        .blocks()
        .iter()
        .map(|block| {
            let kind = if block.is_base() { "base" } else { "addon" };
            let body: Vec<serde_json::Value> = block.body().iter().map(node_to_json).collect();
            json!({ "kind": kind, "body": body })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&json!({ "blocks": blocks })).unwrap())
}

/// Export EDN source directly to JSON.
///
/// Convenience that runs the whole pipeline (read, decode, transform) and
/// projects the result in one call.
///
/// # Errors
/// Returns the first error of whichever stage fails.
pub fn export_str_to_json(source: &str) -> Result<String, UidefError> {
    let doc = UiDocument::from_str(source)?;
    export_document_to_json(&doc)
}
