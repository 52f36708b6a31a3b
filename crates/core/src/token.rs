//! Lexical tokens shared by the scanner and parser.

use std::fmt;

use serde::{Serialize, Serializer};

/// The twelve CDSN token kinds. The first ten are matched against source
/// text in this order (see the scanner); `EndOfFile` and `Error` are
/// synthesized by the scanner itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(* ... *)`, may span lines
    Comment,
    /// `-- ...` to end of line
    Note,
    /// `"..."` with escapes
    Literal,
    /// lowercase rule name
    Name,
    /// uppercase intrinsic token name
    Intrinsic,
    Number,
    /// `::=`, `..`, or one of `| { } ( ) [ ] , ^ *`
    Delimiter,
    /// `'x'` with escapes
    Character,
    EndOfLine,
    Space,
    EndOfFile,
    Error,
}

impl TokenKind {
    /// Uppercase name of this kind, as referenceable from a grammar.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::Note => "NOTE",
            TokenKind::Literal => "LITERAL",
            TokenKind::Name => "NAME",
            TokenKind::Intrinsic => "INTRINSIC",
            TokenKind::Number => "NUMBER",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Character => "CHARACTER",
            TokenKind::EndOfLine => "EOL",
            TokenKind::Space => "SPACE",
            TokenKind::EndOfFile => "EOF",
            TokenKind::Error => "ERROR",
        }
    }

    /// Resolve an intrinsic token name as used inside a grammar rule.
    /// `EOF` and `ERROR` are not referenceable: the former terminates every
    /// scan and the latter never reaches a parser.
    pub fn intrinsic(name: &str) -> Option<TokenKind> {
        match name {
            "COMMENT" => Some(TokenKind::Comment),
            "NOTE" => Some(TokenKind::Note),
            "LITERAL" => Some(TokenKind::Literal),
            "NAME" => Some(TokenKind::Name),
            "INTRINSIC" => Some(TokenKind::Intrinsic),
            "NUMBER" => Some(TokenKind::Number),
            "DELIMITER" => Some(TokenKind::Delimiter),
            "CHARACTER" => Some(TokenKind::Character),
            "EOL" => Some(TokenKind::EndOfLine),
            "SPACE" => Some(TokenKind::Space),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// serialized under the same uppercase names a grammar references
impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One scanned token. `line` and `position` are 1-based and point into the
/// original source for diagnostics. `value` holds the processed text:
/// comment and note bodies are trimmed, literal and character escapes are
/// resolved, everything else keeps its lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub position: u32,
    pub value: String,
}

/// Render a token's kind, position, and value for diagnostics. This is not
/// part of canonical source formatting.
pub fn format_token(token: &Token) -> String {
    format!(
        "{}:{} {} {:?}",
        token.line, token.position, token.kind, token.value
    )
}
