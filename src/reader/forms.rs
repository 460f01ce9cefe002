use serde_json::{json, Value as Raw};

use super::*;

pub(super) fn read_form(reader: &mut Reader) -> Result<Raw, EdnError> {
    match reader.bump()? {
        Token::String(s) => Ok(json!(s)),
        Token::Number(n) => Ok(json!(n)),
        Token::Bool(b) => Ok(json!(b)),
        Token::Nil => Ok(Raw::Null),
        Token::Keyword(k) => Ok(json!({ "key": k })),
        Token::Symbol(s) => Ok(json!({ "sym": s })),
        Token::Tag(tag) => {
            let val = read_form(reader)?;
            Ok(json!({ "tag": tag, "val": val }))
        }
        Token::LBracket => {
            let items = read_until(reader, Token::RBracket, "vector")?;
            Ok(Raw::Array(items))
        }
        Token::LParen => {
            let items = read_until(reader, Token::RParen, "list")?;
            Ok(json!({ "list": items }))
        }
        Token::SetOpen => {
            let items = read_until(reader, Token::RBrace, "set")?;
            Ok(json!({ "set": items }))
        }
        Token::LBrace => read_map(reader),
        tok @ (Token::RBracket | Token::RParen | Token::RBrace) => Err(EdnError::SyntaxError {
            message: format!("Unmatched closing delimiter {:?}", tok),
            line: reader.line(),
            column: reader.column(),
            hint: None,
            code: Some(111),
        }),
        Token::Eof => Err(EdnError::UnexpectedEof {
            message: "Expected a form".into(),
            line: reader.line(),
            column: reader.column(),
            hint: None,
            code: Some(201),
        }),
    }
}

fn read_until(reader: &mut Reader, close: Token, what: &str) -> Result<Vec<Raw>, EdnError> {
    let mut items = Vec::new();

    loop {
        match reader.peek() {
            Some(tok) if *tok == close => {
                reader.bump()?;
                return Ok(items);
            }
            Some(Token::Eof) | None => {
                return Err(EdnError::UnexpectedEof {
                    message: format!("Unclosed {}", what),
                    line: reader.line(),
                    column: reader.column(),
                    hint: None,
                    code: Some(202),
                });
            }
            _ => items.push(read_form(reader)?),
        }
    }
}

/// `{k v k v ...}` reads as an array of `[k, v]` pairs, insertion order and
/// duplicates preserved.
fn read_map(reader: &mut Reader) -> Result<Raw, EdnError> {
    let forms = read_until(reader, Token::RBrace, "map")?;

    if forms.len() % 2 != 0 {
        return Err(EdnError::SyntaxError {
            message: "Map literal requires an even number of forms".into(),
            line: reader.line(),
            column: reader.column(),
            hint: Some("Every key needs a value".into()),
            code: Some(112),
        });
    }

    let mut pairs = Vec::with_capacity(forms.len() / 2);
    let mut forms = forms.into_iter();
    while let (Some(key), Some(val)) = (forms.next(), forms.next()) {
        pairs.push(Raw::Array(vec![key, val]));
    }

    Ok(json!({ "map": pairs }))
}
