use crate::error::TransformError;
use crate::value::{MapEntry, Value};

use super::fields;
use super::node::{UiBlock, UiNode};

/// Root matcher: the value must be a `#ui/definition` tag wrapping a
/// sequence of blocks.
pub(super) fn process_definition(root: &Value) -> Result<Vec<UiBlock>, TransformError> {
    let path = "ui/definition";

    let Value::Tagged(tag, val) = root else {
        return Err(TransformError::ExpectedTag {
            expected: "ui/definition".into(),
            found: root.describe(),
            path: path.into(),
        });
    };
    if tag != "ui/definition" {
        return Err(TransformError::ExpectedTag {
            expected: "ui/definition".into(),
            found: root.describe(),
            path: path.into(),
        });
    }

    let Value::Sequence(items) = val.as_ref() else {
        return Err(TransformError::ExpectedSequence {
            found: val.describe(),
            path: path.into(),
        });
    };

    let mut blocks = Vec::with_capacity(items.len());
    for (i, elem) in items.iter().enumerate() {
        blocks.push(process_block(elem, &format!("{}[{}]", path, i))?);
    }
    Ok(blocks)
}

fn process_block(elem: &Value, path: &str) -> Result<UiBlock, TransformError> {
    let Value::Tagged(tag, val) = elem else {
        return Err(TransformError::ExpectedTag {
            expected: "ui/base or ui/addon".into(),
            found: elem.describe(),
            path: path.to_string(),
        });
    };

    match tag.as_str() {
        "ui/base" => Ok(UiBlock::Base {
            body: process_body(val, &format!("{} ui/base", path))?,
        }),
        "ui/addon" => Ok(UiBlock::Addon {
            body: process_body(val, &format!("{} ui/addon", path))?,
        }),
        other => Err(TransformError::UnknownBlockTag {
            tag: other.to_string(),
            path: path.to_string(),
        }),
    }
}

fn process_body(val: &Value, path: &str) -> Result<Vec<UiNode>, TransformError> {
    let Value::Sequence(items) = val else {
        return Err(TransformError::ExpectedSequence {
            found: val.describe(),
            path: path.to_string(),
        });
    };

    let mut body = Vec::with_capacity(items.len());
    for (i, elem) in items.iter().enumerate() {
        let node = match elem {
            Value::Symbol(name) => process_symbol(name),
            Value::Map(entries) => process_map(entries, &format!("{}[{}]", path, i))?,
            // Nested tags (or anything else) are rejected here; blocks do
            // not nest.
            other => {
                return Err(TransformError::ExpectedSymbolOrMap {
                    found: other.describe(),
                    path: format!("{}[{}]", path, i),
                });
            }
        };
        body.push(node);
    }
    Ok(body)
}

/// Never fails: `ui/group` is the one recognized marker, everything else
/// passes through as a plain symbol node.
fn process_symbol(name: &str) -> UiNode {
    if name == "ui/group" {
        UiNode::Group { sym: name.to_string() }
    } else {
        UiNode::Symbol { name: name.to_string() }
    }
}

/// Classify a map by its first entry key. The first key must be a keyword;
/// recognized keywords select the node type, anything else falls back to a
/// generic map node that keeps the raw entries.
fn process_map(entries: &[MapEntry], path: &str) -> Result<UiNode, TransformError> {
    let first = entries.first().ok_or_else(|| TransformError::EmptyMap {
        path: path.to_string(),
    })?;

    let Value::Keyword(key) = &first.key else {
        return Err(TransformError::ExpectedKeywordKey {
            found: first.key.describe(),
            path: path.to_string(),
        });
    };

    let node = match key.as_str() {
        "output" => UiNode::Output {
            fields: fields::project(entries, path)?,
        },
        "input" => UiNode::Input {
            fields: fields::project(entries, path)?,
        },
        "target" => UiNode::TargetSource {
            fields: fields::project(entries, path)?,
        },
        "when" => UiNode::WhenThen {
            fields: fields::project(entries, path)?,
        },
        other => UiNode::Map {
            name: other.to_string(),
            raw: entries.to_vec(),
        },
    };
    Ok(node)
}
