use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip whitespace and comments. EDN treats commas as whitespace, and `;`
/// comments run to end of line.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' | ',' => {
                bump(lexer);
            }
            ';' => {
                while let Some(ch) = bump(lexer) {
                    if ch == '\n' {
                        break;
                    }
                }
            }
            _ => break,
        }
    }
}

/// Peek one character past the current one without consuming anything.
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}
