//! Reachability: every definition should be reachable from the root (the
//! first definition), or carry a `fragment:` comment marking it as a
//! deliberately free-standing helper. Findings here are warnings.

use std::collections::HashSet;

use super::{for_each_factor, DefinitionTable};
use crate::ast::*;
use crate::error::{Defect, DefectKind};

pub(super) fn check(syntax: &Syntax, table: &DefinitionTable<'_>) -> Vec<Defect> {
    let Some(root) = syntax.definitions.first() else {
        return Vec::new();
    };

    let mut reached: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![root.name.as_str()];
    reached.insert(root.name.as_str());
    while let Some(name) = stack.pop() {
        let Some(def) = table.get(name) else {
            continue;
        };
        for_each_factor(&def.expression, &mut |factor| {
            if let Predicate::Element(Element::Reference(r)) = &factor.predicate {
                if reached.insert(r.as_str()) {
                    stack.push(r.as_str());
                }
            }
        });
    }

    let mut defects = Vec::new();
    for def in &syntax.definitions {
        if reached.contains(def.name.as_str()) || def.comment.starts_with("fragment:") {
            continue;
        }
        if !table.get(&def.name).is_some_and(|d| std::ptr::eq(d, def)) {
            continue;
        }
        defects.push(Defect::warning(
            DefectKind::Unreachable,
            &def.name,
            Some(def.line),
            format!("'{}' is not reachable from '{}'", def.name, root.name),
        ));
    }
    defects
}
