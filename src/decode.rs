use serde_json::Value as Raw;

use crate::error::DecodeError;
use crate::value::{MapEntry, Value};

/// Decode the raw dynamic tree of a generic EDN reader into a typed [`Value`].
///
/// The accepted grammar is a fixed, ordered list of alternatives; the first
/// structural match wins (the wrapper shapes are mutually exclusive by their
/// distinguishing field, so the order is documentation as much as dispatch):
///
///  1. string
///  2. number
///  3. boolean
///  4. null
///  5. array                      -> `Value::Sequence`
///  6. `{ "list": [...] }`        -> `Value::Sequence` (unwrapped)
///  7. `{ "map": [[k, v], ...] }` -> `Value::Map`
///  8. `{ "set": [...] }`         -> `Value::Set`
///  9. `{ "key": "name" }`        -> `Value::Keyword`
/// 10. `{ "sym": "name" }`        -> `Value::Symbol`
/// 11. `{ "tag": "name", "val": ... }` -> `Value::Tagged`
///
/// Anything matching none of the eleven fails the whole decode; there are no
/// partial results.
pub fn decode(raw: &Raw) -> Result<Value, DecodeError> {
    decode_at(raw, "$")
}

fn decode_at(raw: &Raw, path: &str) -> Result<Value, DecodeError> {
    match raw {
        Raw::String(s) => Ok(Value::String(s.clone())),
        Raw::Number(n) => {
            let n = n.as_f64().ok_or_else(|| DecodeError {
                path: path.to_string(),
                reason: format!("number {} is not representable as f64", n),
            })?;
            Ok(Value::Number(n))
        }
        Raw::Bool(b) => Ok(Value::Bool(*b)),
        Raw::Null => Ok(Value::Null),
        Raw::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(decode_at(item, &format!("{}[{}]", path, i))?);
            }
            Ok(Value::Sequence(out))
        }
        Raw::Object(obj) => {
            if let Some(list) = obj.get("list") {
                return decode_wrapped_items(list, &format!("{}.list", path))
                    .map(Value::Sequence);
            }
            if let Some(map) = obj.get("map") {
                return decode_map(map, &format!("{}.map", path));
            }
            if let Some(set) = obj.get("set") {
                return decode_wrapped_items(set, &format!("{}.set", path)).map(Value::Set);
            }
            if let Some(key) = obj.get("key") {
                return decode_name(key, &format!("{}.key", path)).map(Value::Keyword);
            }
            if let Some(sym) = obj.get("sym") {
                return decode_name(sym, &format!("{}.sym", path)).map(Value::Symbol);
            }
            if let Some(tag) = obj.get("tag") {
                let tag = decode_name(tag, &format!("{}.tag", path))?;
                let val = obj.get("val").ok_or_else(|| DecodeError {
                    path: path.to_string(),
                    reason: format!("tag wrapper #{} is missing its \"val\" field", tag),
                })?;
                let val = decode_at(val, &format!("{}.val", path))?;
                return Ok(Value::Tagged(tag, Box::new(val)));
            }
            Err(DecodeError {
                path: path.to_string(),
                reason: "object matches none of the recognized EDN wrapper shapes \
                         (list, map, set, key, sym, tag)"
                    .into(),
            })
        }
    }
}

/// Items of a `list`/`set` wrapper, decoded in order.
fn decode_wrapped_items(raw: &Raw, path: &str) -> Result<Vec<Value>, DecodeError> {
    let items = raw.as_array().ok_or_else(|| DecodeError {
        path: path.to_string(),
        reason: format!("wrapper payload must be an array, found {}", raw_kind(raw)),
    })?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(decode_at(item, &format!("{}[{}]", path, i))?);
    }
    Ok(out)
}

fn decode_map(raw: &Raw, path: &str) -> Result<Value, DecodeError> {
    let pairs = raw.as_array().ok_or_else(|| DecodeError {
        path: path.to_string(),
        reason: format!("map wrapper payload must be an array of pairs, found {}", raw_kind(raw)),
    })?;
    let mut entries = Vec::with_capacity(pairs.len());
    for (i, pair) in pairs.iter().enumerate() {
        entries.push(decode_entry(pair, &format!("{}[{}]", path, i))?);
    }
    Ok(Value::Map(entries))
}

/// A map entry is exactly a two-element `[key, val]` tuple; any other arity
/// is a decode failure.
fn decode_entry(raw: &Raw, path: &str) -> Result<MapEntry, DecodeError> {
    let pair = raw.as_array().ok_or_else(|| DecodeError {
        path: path.to_string(),
        reason: format!("map entry must be a [key, val] pair, found {}", raw_kind(raw)),
    })?;
    if pair.len() != 2 {
        return Err(DecodeError {
            path: path.to_string(),
            reason: format!("map entry must have exactly 2 elements, found {}", pair.len()),
        });
    }
    let key = decode_at(&pair[0], &format!("{}[0]", path))?;
    let val = decode_at(&pair[1], &format!("{}[1]", path))?;
    Ok(MapEntry::new(key, val))
}

fn decode_name(raw: &Raw, path: &str) -> Result<String, DecodeError> {
    raw.as_str().map(str::to_string).ok_or_else(|| DecodeError {
        path: path.to_string(),
        reason: format!("wrapper name must be a string, found {}", raw_kind(raw)),
    })
}

fn raw_kind(raw: &Raw) -> &'static str {
    match raw {
        Raw::String(_) => "string",
        Raw::Number(_) => "number",
        Raw::Bool(_) => "boolean",
        Raw::Null => "null",
        Raw::Array(_) => "array",
        Raw::Object(_) => "object",
    }
}
