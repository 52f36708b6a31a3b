//! cdsn-core: CDSN grammar notation library.
//!
//! CDSN is a textual grammar-definition notation (EBNF-like): named rules
//! built from alternatives, character and token atoms, quantifiers,
//! character-class filters, and nested grouping. This crate implements the
//! four-stage pipeline over an immutable AST:
//!
//! Scanner -> Parser -> Validator -> Formatter
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root:
//!
//! - [`scan()`] / [`scan_raw()`] -- source text to a token sequence
//! - [`parse_source()`] -- source text to a [`Syntax`] tree
//! - [`validate()`] -- semantic defects for a tree (empty means valid)
//! - [`format_syntax()`] / [`format_definition()`] -- canonical text
//! - [`match_token()`] / [`format_token()`] -- lexical helpers
//!
//! Every invocation is an independent, synchronous, pure transformation:
//! trees are immutable after construction and safe to share across threads.

pub mod ast;
pub mod error;
pub mod format;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod validate;

pub use ast::{
    Alternative, Atom, Cardinality, Constraint, Definition, Element, Expression, Factor, Filter,
    Glyph, Header, Inline, Line, Multiline, Precedence, Predicate, Syntax,
};
pub use error::{Defect, DefectKind, Severity, SyntaxError};
pub use format::{format_definition, format_syntax};
pub use parser::{parse_source, parse_tokens};
pub use scanner::{match_token, scan, scan_raw};
pub use token::{format_token, Token, TokenKind};
pub use validate::validate;
