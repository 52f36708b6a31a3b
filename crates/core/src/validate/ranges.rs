//! Range sanity: constraint bounds, glyph ranges, filter contents.

use super::for_each_factor;
use crate::ast::*;
use crate::error::{Defect, DefectKind};

pub(super) fn check(syntax: &Syntax) -> Vec<Defect> {
    let mut defects = Vec::new();
    for def in &syntax.definitions {
        for_each_factor(&def.expression, &mut |factor| {
            if let Some(card) = &factor.cardinality {
                let c = card.constraint;
                if let Some(last) = c.last {
                    if c.first > last {
                        defects.push(Defect::error(
                            DefectKind::BadConstraintRange,
                            &def.name,
                            Some(def.line),
                            format!("cardinality {{{},{}}} has lower bound above upper", c.first, last),
                        ));
                    }
                }
            }
            match &factor.predicate {
                Predicate::Atom(atom) => check_glyph(atom, def, &mut defects),
                Predicate::Filter(filter) => {
                    // the grammar forces at least one atom, but validate()
                    // accepts any tree value, not only parser output
                    if filter.atoms.is_empty() {
                        defects.push(Defect::error(
                            DefectKind::EmptyFilter,
                            &def.name,
                            Some(def.line),
                            "filter with no atoms matches nothing",
                        ));
                    }
                    for atom in &filter.atoms {
                        check_glyph(atom, def, &mut defects);
                    }
                }
                _ => {}
            }
        });
    }
    defects
}

fn check_glyph(atom: &Atom, def: &Definition, defects: &mut Vec<Defect>) {
    if let Atom::Glyph(g) = atom {
        if g.first > g.last {
            defects.push(Defect::error(
                DefectKind::BadGlyphRange,
                &def.name,
                Some(def.line),
                format!("glyph range {:?}..{:?} is inverted", g.first, g.last),
            ));
        }
    }
}
