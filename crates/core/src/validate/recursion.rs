//! Left-recursion detection.
//!
//! A definition is left-recursive when its leftmost predicate chain reaches
//! its own name again. The chain follows the first factor of every
//! alternative, continues past a factor only when that factor's cardinality
//! lower bound is zero (it can match empty), and descends into precedence
//! groups. A naive recursive-descent consumer of the described grammar
//! would not terminate on such a rule.

use std::collections::HashSet;

use super::{alternatives, DefinitionTable};
use crate::ast::*;
use crate::error::{Defect, DefectKind};

pub(super) fn check(syntax: &Syntax, table: &DefinitionTable<'_>) -> Vec<Defect> {
    let mut defects = Vec::new();
    for def in &syntax.definitions {
        // duplicates resolve to the first occurrence; only check that one
        if !table.get(&def.name).is_some_and(|d| std::ptr::eq(d, def)) {
            continue;
        }
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(def.name.as_str());
        let mut path: Vec<&str> = vec![def.name.as_str()];
        if reaches(&def.name, &def.name, table, &mut visited, &mut path) {
            defects.push(Defect::error(
                DefectKind::LeftRecursion,
                &def.name,
                Some(def.line),
                format!("left recursion: {}", path.join(" -> ")),
            ));
        }
    }
    defects
}

fn reaches<'a>(
    name: &str,
    target: &str,
    table: &DefinitionTable<'a>,
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> bool {
    let Some(def) = table.get(name) else {
        return false;
    };
    let mut refs = Vec::new();
    leftmost_refs(&def.expression, &mut refs);
    for r in refs {
        if r == target {
            path.push(r);
            return true;
        }
        if visited.insert(r) {
            path.push(r);
            if reaches(r, target, table, visited, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

/// Rule names that can appear in leftmost position of `expr`.
fn leftmost_refs<'a>(expr: &'a Expression, out: &mut Vec<&'a str>) {
    for alt in alternatives(expr) {
        for factor in &alt.factors {
            match &factor.predicate {
                Predicate::Element(Element::Reference(name)) => out.push(name.as_str()),
                Predicate::Precedence(p) => leftmost_refs(&p.expression, out),
                _ => {}
            }
            let can_match_empty = factor
                .cardinality
                .as_ref()
                .is_some_and(|c| c.constraint.first == 0);
            if !can_match_empty {
                break;
            }
        }
    }
}
