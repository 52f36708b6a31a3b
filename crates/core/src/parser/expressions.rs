//! Rule-body productions: expression, inline, multiline, line,
//! alternative, factor, cardinality.

use super::Parser;
use crate::ast::*;
use crate::error::SyntaxError;
use crate::token::TokenKind;

impl Parser {
    /// An end-of-line directly after `::=` selects the multiline form;
    /// anything else is an inline body on the same line.
    pub(super) fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.skip_comments();
        if self.kind() == TokenKind::EndOfLine {
            Ok(Expression::Multiline(self.parse_multiline()?))
        } else {
            Ok(Expression::Inline(self.parse_inline()?))
        }
    }

    fn parse_inline(&mut self) -> Result<Inline, SyntaxError> {
        let mut alternatives = vec![self.parse_alternative()?];
        while self.is_delim("|") {
            self.advance();
            alternatives.push(self.parse_alternative()?);
        }
        let note = self.take_note();
        match self.kind() {
            TokenKind::EndOfLine => {
                self.advance();
            }
            TokenKind::EndOfFile => {}
            _ => return Err(self.err_expected(&["'|'", "end of line"])),
        }
        Ok(Inline { alternatives, note })
    }

    fn parse_multiline(&mut self) -> Result<Multiline, SyntaxError> {
        self.advance(); // the EOL that selected this form
        let mut lines = Vec::new();
        loop {
            self.skip_eols();
            if self.at_block_end() {
                break;
            }
            if self.kind() == TokenKind::Comment {
                // body noise on its own line
                self.skip_comments();
                continue;
            }
            lines.push(self.parse_line()?);
        }
        if lines.is_empty() {
            return Err(self.err("expected at least one rule line"));
        }
        Ok(Multiline { lines })
    }

    /// A multiline block ends at end of input or where a name directly
    /// followed by `::=` starts the next definition. A comment run ends it
    /// only when one of those two follows the run; otherwise the comments
    /// are body noise and stay inside the block.
    fn at_block_end(&self) -> bool {
        match self.kind() {
            TokenKind::EndOfFile => true,
            TokenKind::Name => self.delim_at(1, "::="),
            TokenKind::Comment => self.comment_leaves_block(),
            _ => false,
        }
    }

    fn comment_leaves_block(&self) -> bool {
        let mut i = 0;
        while matches!(self.kind_at(i), TokenKind::Comment | TokenKind::EndOfLine) {
            i += 1;
        }
        self.kind_at(i) == TokenKind::EndOfFile
            || (self.kind_at(i) == TokenKind::Name && self.delim_at(i + 1, "::="))
    }

    fn parse_line(&mut self) -> Result<Line, SyntaxError> {
        let alternative = self.parse_alternative()?;
        let note = self.take_note();
        match self.kind() {
            TokenKind::EndOfLine => {
                self.advance();
            }
            TokenKind::EndOfFile => {}
            _ => return Err(self.err_expected(&["end of line"])),
        }
        Ok(Line { alternative, note })
    }

    fn take_note(&mut self) -> Option<String> {
        if self.kind() == TokenKind::Note {
            Some(self.advance().value.clone())
        } else {
            None
        }
    }

    pub(super) fn parse_alternative(&mut self) -> Result<Alternative, SyntaxError> {
        let mut factors = Vec::new();
        loop {
            self.skip_comments();
            if !self.starts_predicate() {
                break;
            }
            factors.push(self.parse_factor()?);
        }
        if factors.is_empty() {
            return Err(self.err_expected(&[
                "'('",
                "'['",
                "literal",
                "rule name",
                "character",
                "intrinsic token",
            ]));
        }
        Ok(Alternative { factors })
    }

    fn starts_predicate(&self) -> bool {
        match self.kind() {
            TokenKind::Literal
            | TokenKind::Name
            | TokenKind::Character
            | TokenKind::Intrinsic => true,
            TokenKind::Delimiter => self.is_delim("(") || self.is_delim("["),
            _ => false,
        }
    }

    fn parse_factor(&mut self) -> Result<Factor, SyntaxError> {
        let predicate = self.parse_predicate()?;
        let cardinality = if self.is_delim("{") {
            self.parse_cardinality()?
        } else {
            None
        };
        Ok(Factor {
            predicate,
            cardinality,
        })
    }

    /// `{n}`, `{m,n}`, or `{m,*}`. An explicit exactly-one collapses to
    /// "absent" so the formatter's omission rule round-trips.
    fn parse_cardinality(&mut self) -> Result<Option<Cardinality>, SyntaxError> {
        self.expect_delim("{")?;
        let first = self.take_number()?;
        let last = if self.is_delim(",") {
            self.advance();
            if self.is_delim("*") {
                self.advance();
                None
            } else {
                Some(self.take_number()?)
            }
        } else {
            Some(first)
        };
        self.expect_delim("}")?;
        let constraint = Constraint { first, last };
        if constraint.is_exactly_one() {
            Ok(None)
        } else {
            Ok(Some(Cardinality { constraint }))
        }
    }
}
