//! Predicate dispatch and the leaf productions: precedence groups,
//! filters, elements, atoms, glyphs.
//!
//! Dispatch is a one-token decision: `(` opens a precedence group, `[` a
//! filter, a literal or name is an element, a character or intrinsic is an
//! atom. The grammar never needs backtracking.

use super::Parser;
use crate::ast::*;
use crate::error::SyntaxError;
use crate::token::TokenKind;

impl Parser {
    pub(super) fn parse_predicate(&mut self) -> Result<Predicate, SyntaxError> {
        match self.kind() {
            TokenKind::Delimiter if self.is_delim("(") => self.parse_precedence(),
            TokenKind::Delimiter if self.is_delim("[") => self.parse_filter(),
            TokenKind::Literal => {
                let value = self.advance().value.clone();
                Ok(Predicate::Element(Element::Literal(value)))
            }
            TokenKind::Name => {
                let name = self.advance().value.clone();
                Ok(Predicate::Element(Element::Reference(name)))
            }
            TokenKind::Character => Ok(Predicate::Atom(Atom::Glyph(self.parse_glyph()?))),
            TokenKind::Intrinsic => {
                let name = self.advance().value.clone();
                Ok(Predicate::Atom(Atom::Intrinsic(name)))
            }
            _ => Err(self.err_expected(&[
                "'('",
                "'['",
                "literal",
                "rule name",
                "character",
                "intrinsic token",
            ])),
        }
    }

    /// `( alternative ("|" alternative)* )`. The group body is always an
    /// inline expression; line structure has no meaning inside parentheses.
    fn parse_precedence(&mut self) -> Result<Predicate, SyntaxError> {
        self.expect_delim("(")?;
        let mut alternatives = vec![self.parse_alternative()?];
        while self.is_delim("|") {
            self.advance();
            alternatives.push(self.parse_alternative()?);
        }
        self.expect_delim(")")?;
        Ok(Predicate::Precedence(Precedence {
            expression: Box::new(Expression::Inline(Inline {
                alternatives,
                note: None,
            })),
        }))
    }

    /// `[ "^"? atom+ ]`
    fn parse_filter(&mut self) -> Result<Predicate, SyntaxError> {
        self.expect_delim("[")?;
        let inverted = if self.is_delim("^") {
            self.advance();
            true
        } else {
            false
        };
        let mut atoms = Vec::new();
        loop {
            self.skip_comments();
            match self.kind() {
                TokenKind::Character | TokenKind::Intrinsic => atoms.push(self.parse_atom()?),
                _ => break,
            }
        }
        if atoms.is_empty() {
            return Err(self.err_expected(&["character", "intrinsic token"]));
        }
        self.expect_delim("]")?;
        Ok(Predicate::Filter(Filter { inverted, atoms }))
    }

    pub(super) fn parse_atom(&mut self) -> Result<Atom, SyntaxError> {
        match self.kind() {
            TokenKind::Character => Ok(Atom::Glyph(self.parse_glyph()?)),
            TokenKind::Intrinsic => Ok(Atom::Intrinsic(self.advance().value.clone())),
            _ => Err(self.err_expected(&["character", "intrinsic token"])),
        }
    }

    /// `'a'` or `'a'..'z'`
    fn parse_glyph(&mut self) -> Result<Glyph, SyntaxError> {
        let first = self.take_character()?;
        if self.is_delim("..") {
            self.advance();
            let last = self.take_character()?;
            Ok(Glyph { first, last })
        } else {
            Ok(Glyph::single(first))
        }
    }

    fn take_character(&mut self) -> Result<char, SyntaxError> {
        if self.kind() == TokenKind::Character {
            let t = self.advance();
            // scanner guarantees a single resolved char
            Ok(t.value.chars().next().unwrap_or('\0'))
        } else {
            Err(self.err_expected(&["character"]))
        }
    }
}
