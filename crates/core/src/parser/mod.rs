//! Recursive-descent parser: token sequence to a `Syntax` tree.
//!
//! One function per non-terminal, one token of lookahead, with two
//! documented bounded lookaheads: multiline bodies end where a `Name`
//! directly followed by `::=` begins, and comment runs attach to a
//! definition when they sit on the lines directly above its name.
//! On any structural error parsing aborts immediately; there is no
//! partial tree.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::scanner;
use crate::token::{Token, TokenKind};

mod expressions;
mod predicates;

/// Scan and parse a complete CDSN source.
pub fn parse_source(source: &str) -> Result<Syntax, SyntaxError> {
    let tokens = scanner::scan(source)?;
    parse_tokens(&tokens)
}

/// Parse an already-scanned token sequence. Space tokens are filtered out
/// here; comments survive to top level where definition comments and
/// headers are recognized, and are skipped everywhere else.
pub fn parse_tokens(tokens: &[Token]) -> Result<Syntax, SyntaxError> {
    let significant: Vec<Token> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Space)
        .cloned()
        .collect();
    if significant.is_empty() {
        return Err(SyntaxError::syntactic(
            1,
            1,
            "a grammar requires at least one definition",
            None,
            &[],
        ));
    }
    Parser::new(significant).parse_syntax()
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn kind(&self) -> TokenKind {
        self.cur().kind
    }

    fn kind_at(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EndOfFile)
    }

    fn advance(&mut self) -> &Token {
        let i = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[i]
    }

    fn is_delim(&self, d: &str) -> bool {
        self.kind() == TokenKind::Delimiter && self.cur().value == d
    }

    fn delim_at(&self, offset: usize, d: &str) -> bool {
        matches!(self.tokens.get(self.pos + offset),
            Some(t) if t.kind == TokenKind::Delimiter && t.value == d)
    }

    fn expect_delim(&mut self, d: &str) -> Result<(), SyntaxError> {
        if self.is_delim(d) {
            self.advance();
            Ok(())
        } else {
            let want = format!("'{}'", d);
            Err(self.err_expected(&[want.as_str()]))
        }
    }

    fn take_name(&mut self) -> Result<(String, u32), SyntaxError> {
        if self.kind() == TokenKind::Name {
            let t = self.advance();
            Ok((t.value.clone(), t.line))
        } else {
            Err(self.err_expected(&["rule name"]))
        }
    }

    fn take_number(&mut self) -> Result<u32, SyntaxError> {
        if self.kind() == TokenKind::Number {
            let t = self.advance();
            t.value.parse::<u32>().map_err(|_| {
                SyntaxError::syntactic(
                    t.line,
                    t.position,
                    format!("number '{}' out of range", t.value),
                    Some(t.value.as_str()),
                    &["number"],
                )
            })
        } else {
            Err(self.err_expected(&["number"]))
        }
    }

    fn skip_eols(&mut self) {
        while self.kind() == TokenKind::EndOfLine {
            self.advance();
        }
    }

    fn skip_comments(&mut self) {
        while self.kind() == TokenKind::Comment {
            self.advance();
        }
    }

    fn found_desc(&self) -> Option<String> {
        match self.kind() {
            TokenKind::EndOfFile => None,
            TokenKind::EndOfLine => Some("end of line".to_owned()),
            k => Some(format!("{} '{}'", k, self.cur().value)),
        }
    }

    fn err_expected(&self, expected: &[&str]) -> SyntaxError {
        let found = self.found_desc();
        let got = found.as_deref().unwrap_or("end of input");
        SyntaxError::syntactic(
            self.cur().line,
            self.cur().position,
            format!("expected {}, got {}", expected.join(" or "), got),
            found.as_deref(),
            expected,
        )
    }

    fn err(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::syntactic(
            self.cur().line,
            self.cur().position,
            message,
            self.found_desc().as_deref(),
            &[],
        )
    }

    // -- Top level ----------------------------------------------

    fn parse_syntax(&mut self) -> Result<Syntax, SyntaxError> {
        let mut headers: Vec<Header> = Vec::new();
        let mut definitions: Vec<Definition> = Vec::new();
        let mut pending: Option<String> = None;

        loop {
            self.skip_eols();
            match self.kind() {
                TokenKind::EndOfFile => {
                    if pending.is_some() {
                        return Err(self.err("expected definition after comment"));
                    }
                    break;
                }
                TokenKind::Comment => {
                    let group = self.take_comment_group();
                    if self.comment_attaches_here() {
                        append_comment(&mut pending, &group);
                    } else if definitions.is_empty() && pending.is_none() {
                        headers.extend(group.into_iter().map(|comment| Header { comment }));
                    } else {
                        // a dangling comment rides along to the next definition
                        append_comment(&mut pending, &group);
                    }
                }
                TokenKind::Name => {
                    let comment = pending.take().unwrap_or_default();
                    definitions.push(self.parse_definition(comment)?);
                }
                _ => return Err(self.err_expected(&["comment", "rule name"])),
            }
        }

        if definitions.is_empty() {
            return Err(self.err("a grammar requires at least one definition"));
        }
        Ok(Syntax {
            headers,
            definitions,
        })
    }

    /// Consume a run of comments connected by single line breaks.
    fn take_comment_group(&mut self) -> Vec<String> {
        let mut group = vec![self.advance().value.clone()];
        while self.kind() == TokenKind::EndOfLine && self.kind_at(1) == TokenKind::Comment {
            self.advance(); // the EOL
            group.push(self.advance().value.clone());
        }
        group
    }

    /// After a comment group: does a definition name begin on this line or
    /// the very next one? (A blank line in between makes it a header.)
    fn comment_attaches_here(&self) -> bool {
        if self.kind() == TokenKind::Name && self.delim_at(1, "::=") {
            return true;
        }
        self.kind() == TokenKind::EndOfLine
            && self.kind_at(1) == TokenKind::Name
            && self.delim_at(2, "::=")
    }

    fn parse_definition(&mut self, comment: String) -> Result<Definition, SyntaxError> {
        let (name, line) = self.take_name()?;
        self.expect_delim("::=")?;
        let expression = self.parse_expression()?;
        Ok(Definition {
            comment,
            name,
            expression,
            line,
        })
    }
}

fn append_comment(pending: &mut Option<String>, group: &[String]) {
    let joined = group.join("\n");
    match pending {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(&joined);
        }
        None => *pending = Some(joined),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
