use once_cell::sync::Lazy;
use regex::Regex;

use super::scanner::{bump, peek_second, skip_whitespace_and_comments};
use super::*;

/// EDN symbol grammar: `/` alone, or a name with at most one `/` namespace
/// separator. Leading `+`/`-`/`.` never reach this check followed by a digit;
/// the dispatcher sends those to the number path first.
static SYMBOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:/|[A-Za-z*!_?$%&=<>+.-][A-Za-z0-9*!_?$%&=<>+.'-]*(?:/[A-Za-z0-9*!_?$%&=<>+.'-]+)?)$")
        .unwrap()
});

/// EDN numeric grammar: integer or float, optional sign and exponent.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?$").unwrap());

const SYMBOL_CONSTITUENTS: &str = "*!_?$%&=<>+.'-/";

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || SYMBOL_CONSTITUENTS.contains(c)
}

fn is_symbol_start(c: char) -> bool {
    c.is_alphabetic() || "*!_?$%&=<>+.-/".contains(c)
}

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, EdnError> {
    skip_whitespace_and_comments(lexer);

    match lexer.peek {
        Some('[') => tokenize_delimiter(lexer, Token::LBracket),
        Some(']') => tokenize_delimiter(lexer, Token::RBracket),
        Some('(') => tokenize_delimiter(lexer, Token::LParen),
        Some(')') => tokenize_delimiter(lexer, Token::RParen),
        Some('{') => tokenize_delimiter(lexer, Token::LBrace),
        Some('}') => tokenize_delimiter(lexer, Token::RBrace),
        Some('"') => tokenize_string(lexer),
        Some(':') => tokenize_keyword(lexer),
        Some('#') => tokenize_hash(lexer),
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        Some('+' | '-' | '.') => {
            // A sign or dot starts a number only when a digit follows.
            if peek_second(lexer).is_some_and(|next| next.is_ascii_digit()) {
                tokenize_number(lexer)
            } else {
                tokenize_symbol_or_literal(lexer)
            }
        }
        Some(c) if is_symbol_start(c) => tokenize_symbol_or_literal(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }
}

fn tokenize_delimiter(lexer: &mut Lexer, token: Token) -> Result<Token, EdnError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_string(lexer: &mut Lexer) -> Result<Token, EdnError> {
    bump(lexer); // consume opening '"'
    let mut content = String::new();
    let mut closed = false;

    while let Some(ch) = lexer.peek {
        if ch == '"' {
            bump(lexer);
            closed = true;
            break;
        }

        if ch == '\\' {
            bump(lexer); // consume '\'
            if let Some(next_ch) = bump(lexer) {
                let escaped = match next_ch {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    other => {
                        return Err(EdnError::SyntaxError {
                            message: format!("Unknown escape '\\{}'", other),
                            line: lexer.line,
                            column: lexer.column,
                            hint: Some("Supported escapes: \\n \\t \\r \\\\ \\\"".into()),
                            code: Some(102),
                        });
                    }
                };
                content.push(escaped);
            } else {
                return Err(EdnError::UnclosedString {
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("Trailing backslash in string".into()),
                    code: Some(103),
                });
            }
        } else {
            content.push(ch);
            bump(lexer);
        }
    }

    if !closed {
        return Err(EdnError::UnclosedString {
            line: lexer.line,
            column: lexer.column,
            hint: Some("String literal not closed".into()),
            code: Some(103),
        });
    }

    Ok(Token::String(content))
}

fn tokenize_keyword(lexer: &mut Lexer) -> Result<Token, EdnError> {
    bump(lexer); // consume ':'
    let name = collect_symbol_chars(lexer);

    if name.is_empty() || !SYMBOL_RE.is_match(&name) {
        return Err(EdnError::SyntaxError {
            message: format!("Invalid keyword ':{}'", name),
            line: lexer.line,
            column: lexer.column,
            hint: Some("Keywords are ':name' or ':ns/name'".into()),
            code: Some(105),
        });
    }

    Ok(Token::Keyword(name))
}

/// Dispatch after `#`: a set opener, a bare `#"..."` reference, or a tag name.
fn tokenize_hash(lexer: &mut Lexer) -> Result<Token, EdnError> {
    bump(lexer); // consume '#'

    match lexer.peek {
        Some('{') => {
            bump(lexer);
            Ok(Token::SetOpen)
        }
        // Bare #"name" reads as an anonymous tag; the string is the next token.
        Some('"') => Ok(Token::Tag(String::new())),
        Some(c) if is_symbol_start(c) => {
            let name = collect_symbol_chars(lexer);
            if !SYMBOL_RE.is_match(&name) {
                return Err(EdnError::SyntaxError {
                    message: format!("Invalid tag name '#{}'", name),
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("Tag names follow the symbol grammar, e.g. #ui/base".into()),
                    code: Some(106),
                });
            }
            Ok(Token::Tag(name))
        }
        Some(ch) => Err(EdnError::UnexpectedCharacter {
            character: ch,
            line: lexer.line,
            column: lexer.column,
            hint: Some("Expected a tag name, '{', or a string after '#'".into()),
            code: Some(104),
        }),
        None => Err(EdnError::UnexpectedEof {
            message: "Expected a tag name after '#'".into(),
            line: lexer.line,
            column: lexer.column,
            hint: None,
            code: Some(201),
        }),
    }
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, EdnError> {
    let mut num = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-') {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    if !NUMBER_RE.is_match(&num) {
        return Err(EdnError::InvalidNumber {
            literal: num,
            line: lexer.line,
            column: lexer.column,
            hint: None,
            code: Some(102),
        });
    }

    num.parse::<f64>()
        .map(Token::Number)
        .map_err(|_| EdnError::InvalidNumber {
            literal: num,
            line: lexer.line,
            column: lexer.column,
            hint: None,
            code: Some(102),
        })
}

fn tokenize_symbol_or_literal(lexer: &mut Lexer) -> Result<Token, EdnError> {
    let name = collect_symbol_chars(lexer);

    if !SYMBOL_RE.is_match(&name) {
        return Err(EdnError::SyntaxError {
            message: format!("Invalid symbol '{}'", name),
            line: lexer.line,
            column: lexer.column,
            hint: None,
            code: Some(105),
        });
    }

    // Literal words are carved out of the symbol space.
    let token = match name.as_str() {
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        "nil" => Token::Nil,
        _ => Token::Symbol(name),
    };

    Ok(token)
}

fn collect_symbol_chars(lexer: &mut Lexer) -> String {
    let mut name = String::new();
    while let Some(ch) = lexer.peek {
        if is_symbol_char(ch) {
            name.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
    name
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, EdnError> {
    bump(lexer);
    Err(EdnError::UnexpectedCharacter {
        character: ch,
        line: lexer.line,
        column: lexer.column,
        hint: Some("Unexpected character in input".into()),
        code: Some(104),
    })
}
