use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::TransformError;
use crate::value::{MapEntry, Value};

/// A projected field key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldName {
    /// Keyword, string, and symbol keys, stringified.
    Key(String),
    /// A tag-wrapped key, e.g. `{#"output" 5000}`: a reference to a named
    /// field rather than a plain name.
    Ref(String),
}

impl FieldName {
    pub fn as_str(&self) -> &str {
        match self {
            FieldName::Key(name) | FieldName::Ref(name) => name,
        }
    }
}

/// A projected field value. Symbols and keywords stringify the way the
/// original map keys do; tag wrappers with string-ish payloads become
/// references.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Symbol(String),
    Ref {
        #[serde(rename = "ref")]
        name: String,
    },
    Seq(Vec<FieldValue>),
    Map(Fields),
}

/// The projection of a decoded map: an insertion-ordered entry list.
/// Duplicate names are legal and preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields {
    entries: Vec<(FieldName, FieldValue)>,
}

impl Fields {
    pub fn iter(&self) -> impl Iterator<Item = &(FieldName, FieldValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given plain-key name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, FieldName::Key(key) if key == name))
            .map(|(_, v)| v)
    }

    /// The `:label` entry as a string, when present.
    pub fn label(&self) -> Option<&str> {
        match self.get("label") {
            Some(FieldValue::String(s)) | Some(FieldValue::Symbol(s)) => Some(s),
            _ => None,
        }
    }
}

/// Fields serialize as an array of `{"key"/"ref", "value"}` entries so
/// insertion order, duplicates, and the reference distinction all survive
/// the trip through JSON.
impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct KeyEntry<'a> {
            key: &'a str,
            value: &'a FieldValue,
        }
        #[derive(serde::Serialize)]
        struct RefEntry<'a> {
            r#ref: &'a str,
            value: &'a FieldValue,
        }

        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            match name {
                FieldName::Key(key) => {
                    seq.serialize_element(&KeyEntry { key: key.as_str(), value })?
                }
                FieldName::Ref(name) => {
                    seq.serialize_element(&RefEntry { r#ref: name.as_str(), value })?
                }
            }
        }
        seq.end()
    }
}

/// Project a decoded map into [`Fields`]. The whole map is projected,
/// discriminating entry included.
pub(super) fn project(entries: &[MapEntry], path: &str) -> Result<Fields, TransformError> {
    let mut fields = Fields::default();
    for (i, entry) in entries.iter().enumerate() {
        let entry_path = format!("{}{{{}}}", path, i);
        let name = project_name(&entry.key, &entry_path)?;
        let value = project_value(&entry.val, &entry_path)?;
        fields.entries.push((name, value));
    }
    Ok(fields)
}

fn project_name(key: &Value, path: &str) -> Result<FieldName, TransformError> {
    match key {
        Value::Keyword(name) | Value::String(name) | Value::Symbol(name) => {
            Ok(FieldName::Key(name.clone()))
        }
        Value::Tagged(_, inner) => match string_payload(inner) {
            Some(name) => Ok(FieldName::Ref(name.to_string())),
            None => Err(TransformError::ExpectedKeywordKey {
                found: key.describe(),
                path: path.to_string(),
            }),
        },
        other => Err(TransformError::ExpectedKeywordKey {
            found: other.describe(),
            path: path.to_string(),
        }),
    }
}

fn project_value(val: &Value, path: &str) -> Result<FieldValue, TransformError> {
    let value = match val {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => FieldValue::Number(*n),
        Value::String(s) => FieldValue::String(s.clone()),
        // Keywords stringify the same way keys do.
        Value::Keyword(k) => FieldValue::String(k.clone()),
        Value::Symbol(s) => FieldValue::Symbol(s.clone()),
        Value::Sequence(items) | Value::Set(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(project_value(item, &format!("{}[{}]", path, i))?);
            }
            FieldValue::Seq(out)
        }
        Value::Map(entries) => FieldValue::Map(project(entries, path)?),
        Value::Tagged(_, inner) => match string_payload(inner) {
            Some(name) => FieldValue::Ref { name: name.to_string() },
            // Tag wrappers other than field references collapse to their payload.
            None => project_value(inner, path)?,
        },
    };
    Ok(value)
}

fn string_payload(val: &Value) -> Option<&str> {
    match val {
        Value::String(s) | Value::Symbol(s) | Value::Keyword(s) => Some(s),
        _ => None,
    }
}
