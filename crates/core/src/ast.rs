//! AST for CDSN grammar definitions.
//!
//! All nodes are immutable values built once by the parser; the validator
//! and formatter only read them. Ownership is strictly tree-shaped: each
//! child is owned by exactly one parent and nothing points back up. Name
//! resolution works off a side table built by the validator, never off
//! tree links.

/// A whole grammar: leading headers followed by at least one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    pub headers: Vec<Header>,
    pub definitions: Vec<Definition>,
}

/// A free-standing comment above the first definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub comment: String,
}

/// One named rule. `comment` is empty when the rule carries none; multiple
/// comment lines are joined with `\n`. `line` points at the name token in
/// the original source and is excluded from structural equality so that
/// reformatted trees still compare equal.
#[derive(Debug, Clone, Eq)]
pub struct Definition {
    pub comment: String,
    pub name: String,
    pub expression: Expression,
    pub line: u32,
}

impl PartialEq for Definition {
    fn eq(&self, other: &Self) -> bool {
        self.comment == other.comment
            && self.name == other.name
            && self.expression == other.expression
    }
}

/// A rule body: either on the `::=` line or as an indented block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Inline(Inline),
    Multiline(Multiline),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub alternatives: Vec<Alternative>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiline {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub alternative: Alternative,
    pub note: Option<String>,
}

/// A concatenation: all factors match in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub factors: Vec<Factor>,
}

/// A predicate with optional repetition bounds. An absent cardinality
/// means exactly-one; the parser normalizes an explicit `{1}` away so the
/// invariant holds in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    pub predicate: Predicate,
    pub cardinality: Option<Cardinality>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cardinality {
    pub constraint: Constraint,
}

/// Repetition bounds. `last` of `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub first: u32,
    pub last: Option<u32>,
}

impl Constraint {
    pub fn exactly(n: u32) -> Self {
        Constraint {
            first: n,
            last: Some(n),
        }
    }

    pub fn is_exactly_one(&self) -> bool {
        self.first == 1 && self.last == Some(1)
    }
}

/// The smallest matchable unit of an alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Atom(Atom),
    Element(Element),
    Filter(Filter),
    Precedence(Precedence),
}

/// A single character/range or a scanner-recognized intrinsic token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Glyph(Glyph),
    Intrinsic(String),
}

/// A character range; a single character when `first == last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub first: char,
    pub last: char,
}

impl Glyph {
    pub fn single(c: char) -> Self {
        Glyph { first: c, last: c }
    }
}

/// A literal string or a reference to another definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Literal(String),
    Reference(String),
}

/// Matches (or, when inverted, excludes) the union of its atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub inverted: bool,
    pub atoms: Vec<Atom>,
}

/// Explicit grouping, overriding the default precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precedence {
    pub expression: Box<Expression>,
}
