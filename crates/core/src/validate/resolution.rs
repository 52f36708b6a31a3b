//! Reference and intrinsic resolution.

use std::collections::HashSet;

use super::{for_each_factor, DefinitionTable};
use crate::ast::*;
use crate::error::{Defect, DefectKind};
use crate::scanner::match_token;
use crate::token::TokenKind;

pub(super) fn check(syntax: &Syntax, table: &DefinitionTable<'_>) -> Vec<Defect> {
    let mut defects = Vec::new();
    for def in &syntax.definitions {
        // one finding per (definition, unresolved name)
        let mut seen: HashSet<&str> = HashSet::new();
        for_each_factor(&def.expression, &mut |factor| match &factor.predicate {
            Predicate::Element(Element::Reference(name)) => {
                if !table.contains(name) && seen.insert(name.as_str()) {
                    defects.push(Defect::error(
                        DefectKind::UnresolvedReference,
                        &def.name,
                        Some(def.line),
                        format!("reference to undefined rule '{}'", name),
                    ));
                }
            }
            Predicate::Atom(atom) => check_atom(atom, def, &mut seen, &mut defects),
            Predicate::Filter(filter) => {
                for atom in &filter.atoms {
                    check_atom(atom, def, &mut seen, &mut defects);
                }
            }
            Predicate::Element(Element::Literal(_)) | Predicate::Precedence(_) => {}
        });
    }
    defects
}

fn check_atom<'a>(
    atom: &'a Atom,
    def: &Definition,
    seen: &mut HashSet<&'a str>,
    defects: &mut Vec<Defect>,
) {
    let Atom::Intrinsic(name) = atom else {
        return;
    };
    let well_formed = match_token(TokenKind::Intrinsic, name).is_some();
    if (!well_formed || TokenKind::intrinsic(name).is_none()) && seen.insert(name.as_str()) {
        defects.push(Defect::error(
            DefectKind::UnresolvedIntrinsic,
            &def.name,
            Some(def.line),
            format!("'{}' is not an intrinsic token", name),
        ));
    }
}
