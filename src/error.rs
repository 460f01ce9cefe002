use std::fmt;

/// Syntax-level errors raised while reading EDN source text.
#[derive(Debug, Clone, PartialEq)]
pub enum EdnError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed.
    UnclosedString {
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for characters outside the EDN grammar.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
}

/// Raised when the raw dynamic tree contains a shape outside the eleven
/// recognized EDN alternatives. Fatal to the whole decode call; there are
/// no partial results.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    /// Breadcrumb into the raw tree, e.g. `$.map[2][1]`.
    pub path: String,
    pub reason: String,
}

/// Raised when a decoded value tree does not match the UI-definition
/// grammar at the point reached. Fatal to the whole transform call.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    ExpectedTag {
        expected: String,
        found: String,
        path: String,
    },
    ExpectedSequence {
        found: String,
        path: String,
    },
    UnknownBlockTag {
        tag: String,
        path: String,
    },
    EmptyMap {
        path: String,
    },
    ExpectedKeywordKey {
        found: String,
        path: String,
    },
    ExpectedSymbolOrMap {
        found: String,
        path: String,
    },
}

/// Any failure in the read -> decode -> transform pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum UidefError {
    Read(EdnError),
    Decode(DecodeError),
    Transform(TransformError),
}

impl fmt::Display for EdnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdnError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[UIDEF] Syntax Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            EdnError::UnclosedString { line, column, hint, code } =>
                write!(f, "[UIDEF] Unclosed string at {}:{}{}{}",
                    line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            EdnError::UnexpectedCharacter { character, line, column, hint, code } =>
                write!(f, "[UIDEF] Unexpected character '{}' at {}:{}{}{}",
                    character, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            EdnError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[UIDEF] Unexpected EOF at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            EdnError::InvalidNumber { literal, line, column, hint, code } =>
                write!(f, "[UIDEF] Invalid number '{}' at {}:{}{}{}",
                    literal, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[UIDEF] Decode Error at {}: {}", self.path, self.reason)
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::ExpectedTag { expected, found, path } =>
                write!(f, "[UIDEF] Transform Error at {}: expected tag {}, found {}", path, expected, found),
            TransformError::ExpectedSequence { found, path } =>
                write!(f, "[UIDEF] Transform Error at {}: expected sequence, found {}", path, found),
            TransformError::UnknownBlockTag { tag, path } =>
                write!(f, "[UIDEF] Transform Error at {}: unknown block tag #{}", path, tag),
            TransformError::EmptyMap { path } =>
                write!(f, "[UIDEF] Transform Error at {}: map has no entries to classify", path),
            TransformError::ExpectedKeywordKey { found, path } =>
                write!(f, "[UIDEF] Transform Error at {}: expected keyword key, found {}", path, found),
            TransformError::ExpectedSymbolOrMap { found, path } =>
                write!(f, "[UIDEF] Transform Error at {}: expected symbol or map, found {}", path, found),
        }
    }
}

impl fmt::Display for UidefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UidefError::Read(e) => fmt::Display::fmt(e, f),
            UidefError::Decode(e) => fmt::Display::fmt(e, f),
            UidefError::Transform(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for EdnError {}
impl std::error::Error for DecodeError {}
impl std::error::Error for TransformError {}
impl std::error::Error for UidefError {}

impl From<EdnError> for UidefError {
    fn from(e: EdnError) -> Self {
        UidefError::Read(e)
    }
}

impl From<DecodeError> for UidefError {
    fn from(e: DecodeError) -> Self {
        UidefError::Decode(e)
    }
}

impl From<TransformError> for UidefError {
    fn from(e: TransformError) -> Self {
        UidefError::Transform(e)
    }
}
