//! Validator: semantic checks over a parsed `Syntax` tree.
//!
//! Unlike the scanner and parser, validation never aborts: each check
//! category runs to completion and the union of all findings comes back in
//! one deterministic order (duplicates, resolution, range sanity, left
//! recursion, reachability; definition order within a category). An empty
//! result means the tree is valid. The tree itself is never touched --
//! name lookup goes through a side table built here.

mod ranges;
mod reachability;
mod recursion;
mod resolution;

use std::collections::HashMap;

use crate::ast::*;
use crate::error::{Defect, DefectKind};

pub fn validate(syntax: &Syntax) -> Vec<Defect> {
    let (table, mut defects) = DefinitionTable::build(syntax);
    defects.extend(resolution::check(syntax, &table));
    defects.extend(ranges::check(syntax));
    defects.extend(recursion::check(syntax, &table));
    defects.extend(reachability::check(syntax, &table));
    defects
}

/// Name-to-definition side table. Holds the first occurrence of each name;
/// later occurrences are reported as duplicates during the build.
pub(crate) struct DefinitionTable<'a> {
    map: HashMap<&'a str, &'a Definition>,
}

impl<'a> DefinitionTable<'a> {
    fn build(syntax: &'a Syntax) -> (Self, Vec<Defect>) {
        let mut map: HashMap<&'a str, &'a Definition> = HashMap::new();
        let mut defects = Vec::new();
        for def in &syntax.definitions {
            if let Some(first) = map.get(def.name.as_str()) {
                defects.push(Defect::error(
                    DefectKind::DuplicateDefinition,
                    &def.name,
                    Some(def.line),
                    format!(
                        "duplicate definition '{}': first defined at line {}",
                        def.name, first.line
                    ),
                ));
            } else {
                map.insert(def.name.as_str(), def);
            }
        }
        (DefinitionTable { map }, defects)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&'a Definition> {
        self.map.get(name).copied()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }
}

/// The alternatives of a rule body, in source order, regardless of the
/// inline/multiline form.
pub(crate) fn alternatives(expr: &Expression) -> Vec<&Alternative> {
    match expr {
        Expression::Inline(inl) => inl.alternatives.iter().collect(),
        Expression::Multiline(ml) => ml.lines.iter().map(|l| &l.alternative).collect(),
    }
}

/// Visit every factor in a rule body, descending into precedence groups.
pub(crate) fn for_each_factor<'a, F: FnMut(&'a Factor)>(expr: &'a Expression, f: &mut F) {
    for alt in alternatives(expr) {
        for factor in &alt.factors {
            f(factor);
            if let Predicate::Precedence(p) = &factor.predicate {
                for_each_factor(&p.expression, f);
            }
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
