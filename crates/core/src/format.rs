//! Formatter: canonical text rendering of a syntax tree.
//!
//! Pure functions, no I/O. For any tree the parser produced from
//! validator-accepted input, parsing the formatted text yields a
//! structurally equal tree, and formatting is idempotent. Canonical rules:
//! one blank line between definitions, inline bodies on one line with
//! `|`-separated alternatives, multiline bodies indented four spaces,
//! cardinality omitted for exactly-one, the filter negation marker only
//! when inverted, and glyph ranges collapsed to a single character when
//! both ends coincide.

use crate::ast::*;

const INDENT: &str = "    ";

pub fn format_syntax(syntax: &Syntax) -> String {
    let mut out = String::new();
    for header in &syntax.headers {
        out.push_str(&format!("(* {} *)\n\n", header.comment));
    }
    for (i, def) in syntax.definitions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_definition(def));
    }
    out
}

pub fn format_definition(def: &Definition) -> String {
    let mut out = String::new();
    if !def.comment.is_empty() {
        for part in def.comment.split('\n') {
            out.push_str(&format!("(* {} *)\n", part));
        }
    }
    match &def.expression {
        Expression::Inline(inl) => {
            out.push_str(&def.name);
            out.push_str(" ::= ");
            out.push_str(&format_inline(inl));
            out.push('\n');
        }
        Expression::Multiline(ml) => {
            out.push_str(&def.name);
            out.push_str(" ::=\n");
            for line in &ml.lines {
                out.push_str(INDENT);
                out.push_str(&format_alternative(&line.alternative));
                if let Some(note) = &line.note {
                    out.push_str(" --");
                    if !note.is_empty() {
                        out.push(' ');
                        out.push_str(note);
                    }
                }
                out.push('\n');
            }
        }
    }
    out
}

fn format_inline(inl: &Inline) -> String {
    let mut out = join_alternatives(&inl.alternatives);
    if let Some(note) = &inl.note {
        out.push_str(" --");
        if !note.is_empty() {
            out.push(' ');
            out.push_str(note);
        }
    }
    out
}

fn join_alternatives(alternatives: &[Alternative]) -> String {
    alternatives
        .iter()
        .map(format_alternative)
        .collect::<Vec<String>>()
        .join(" | ")
}

fn format_alternative(alt: &Alternative) -> String {
    alt.factors
        .iter()
        .map(format_factor)
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_factor(factor: &Factor) -> String {
    let mut out = format_predicate(&factor.predicate);
    if let Some(card) = &factor.cardinality {
        let c = card.constraint;
        if !c.is_exactly_one() {
            out.push_str(&match c.last {
                Some(last) if last == c.first => format!("{{{}}}", c.first),
                Some(last) => format!("{{{},{}}}", c.first, last),
                None => format!("{{{},*}}", c.first),
            });
        }
    }
    out
}

fn format_predicate(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Atom(atom) => format_atom(atom),
        Predicate::Element(Element::Literal(s)) => format!("\"{}\"", escape_literal(s)),
        Predicate::Element(Element::Reference(name)) => name.clone(),
        Predicate::Filter(filter) => {
            let atoms = filter
                .atoms
                .iter()
                .map(format_atom)
                .collect::<Vec<String>>()
                .join(" ");
            if filter.inverted {
                format!("[^ {}]", atoms)
            } else {
                format!("[{}]", atoms)
            }
        }
        Predicate::Precedence(p) => {
            // groups are always inline; a multiline body here cannot come
            // from the parser, but render its alternatives anyway
            let alternatives = match p.expression.as_ref() {
                Expression::Inline(inl) => join_alternatives(&inl.alternatives),
                Expression::Multiline(ml) => {
                    let alts: Vec<Alternative> =
                        ml.lines.iter().map(|l| l.alternative.clone()).collect();
                    join_alternatives(&alts)
                }
            };
            format!("({})", alternatives)
        }
    }
}

fn format_atom(atom: &Atom) -> String {
    match atom {
        Atom::Glyph(g) if g.first == g.last => format!("'{}'", escape_char(g.first)),
        Atom::Glyph(g) => format!("'{}'..'{}'", escape_char(g.first), escape_char(g.last)),
        Atom::Intrinsic(name) => name.clone(),
    }
}

fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_char(c: char) -> String {
    match c {
        '\'' => "\\'".to_owned(),
        '\\' => "\\\\".to_owned(),
        '\n' => "\\n".to_owned(),
        '\t' => "\\t".to_owned(),
        _ => c.to_string(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn canon(src: &str) -> String {
        format_syntax(&parse_source(src).expect("test grammar must parse"))
    }

    #[test]
    fn implicit_exactly_one_has_no_suffix() {
        assert_eq!(
            canon("greeting ::= \"hello\" SPACE name\nname ::= 'x'\n"),
            "greeting ::= \"hello\" SPACE name\n\nname ::= 'x'\n"
        );
    }

    #[test]
    fn explicit_exactly_one_disappears() {
        assert_eq!(canon("a ::= 'x'{1} 'y'{1,1}\n"), "a ::= 'x' 'y'\n");
    }

    #[test]
    fn cardinality_forms_render_canonically() {
        assert_eq!(
            canon("a ::= 'x'{2,2} 'y'{0,*} 'z'{2,5}\n"),
            "a ::= 'x'{2} 'y'{0,*} 'z'{2,5}\n"
        );
    }

    #[test]
    fn multiline_body_is_indented() {
        let src = "list ::=\n  item\n      item ',' list -- more\n";
        assert_eq!(
            canon(src),
            "list ::=\n    item\n    item ',' list -- more\n"
        );
    }

    #[test]
    fn headers_and_definition_comments_render_in_place() {
        let src = "(* my grammar *)\n\n(* the root *)\nroot ::= 'x'\n";
        assert_eq!(canon(src), src);
    }

    #[test]
    fn filter_negation_marker_only_when_inverted() {
        assert_eq!(
            canon("a ::= ['x' 'y'] [^ 'a'..'z']\n"),
            "a ::= ['x' 'y'] [^ 'a'..'z']\n"
        );
    }

    #[test]
    fn degenerate_glyph_range_collapses() {
        assert_eq!(canon("a ::= 'x'..'x'\n"), "a ::= 'x'\n");
    }

    #[test]
    fn literal_and_character_escapes_are_reapplied() {
        assert_eq!(
            canon("a ::= \"a\\\"b\\\\c\\nd\" '\\t' '\\''\n"),
            "a ::= \"a\\\"b\\\\c\\nd\" '\\t' '\\''\n"
        );
    }

    #[test]
    fn extra_blank_lines_collapse_to_one() {
        assert_eq!(
            canon("a ::= 'x'\n\n\n\nb ::= 'y'\n"),
            "a ::= 'x'\n\nb ::= 'y'\n"
        );
    }

    #[test]
    fn group_renders_with_pipes() {
        assert_eq!(
            canon("a ::= ('x'|'y'){0,1} 'z'\n"),
            "a ::= ('x' | 'y'){0,1} 'z'\n"
        );
    }

    #[test]
    fn format_definition_renders_a_single_rule() {
        let syntax = parse_source("a ::= 'x'\n\nb ::= 'y'\n").unwrap();
        assert_eq!(format_definition(&syntax.definitions[1]), "b ::= 'y'\n");
    }
}
