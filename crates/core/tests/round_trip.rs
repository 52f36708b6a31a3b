//! Pipeline-level properties: the formatter is a faithful, deterministic,
//! idempotent inverse of the parser, and the scanner is total.

use cdsn_core::{
    format_syntax, parse_source, scan_raw, validate, Severity, TokenKind,
};

/// Grammars that scan, parse, and validate cleanly.
const VALID_CORPUS: &[&str] = &[
    // minimal
    "a ::= 'x'\n",
    // spec example: implicit exactly-one factors
    "greeting ::= \"hello\" SPACE name\n\nname ::= 'x'\n",
    // headers, comments, notes
    "(* toy grammar *)\n\n(* the root rule *)\nroot ::= item{1,*} -- at least one\n\nitem ::= 'a'..'z'\n",
    // multiline bodies with notes
    "expr ::=\n    term\n    term '+' expr -- right recursion is fine\n\nterm ::= NUMBER\n",
    // every predicate form, nested groups, filters
    "root ::= ('a' | inner{0,1}) [^ '0'..'9' SPACE] \"lit\" NUMBER\n\ninner ::= ('x' ('y' | 'z')){2,5}\n",
    // fragment-marked helper is allowed to be unreachable
    "root ::= 'x'\n\n(* fragment: kept for consumers *)\nhelper ::= 'y'\n",
    // unbounded and zero-based cardinalities
    "a ::= b{0,*} 'x'\n\nb ::= 'b'{2}\n",
];

fn canonical(src: &str) -> String {
    format_syntax(&parse_source(src).expect("corpus entry must parse"))
}

#[test]
fn corpus_is_validator_clean() {
    for src in VALID_CORPUS {
        let syntax = parse_source(src).expect("corpus entry must parse");
        let errors: Vec<_> = validate(&syntax)
            .into_iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();
        assert!(errors.is_empty(), "defects for {:?}: {:?}", src, errors);
    }
}

#[test]
fn parse_format_parse_reproduces_the_tree() {
    for src in VALID_CORPUS {
        let tree = parse_source(src).expect("corpus entry must parse");
        let printed = format_syntax(&tree);
        let reparsed = parse_source(&printed)
            .unwrap_or_else(|e| panic!("canonical text failed to reparse: {}\n{}", e, printed));
        assert_eq!(tree, reparsed, "round-trip mismatch for:\n{}", printed);
    }
}

#[test]
fn formatting_is_idempotent() {
    for src in VALID_CORPUS {
        let once = canonical(src);
        let twice = canonical(&once);
        assert_eq!(once, twice, "canonical form drifted for {:?}", src);
    }
}

#[test]
fn formatting_a_flagged_but_parsable_tree_still_works() {
    // semantically broken (unresolved ref, bad range), structurally fine
    let src = "a ::= missing 'z'..'a'{5,2}\n";
    let tree = parse_source(src).unwrap();
    assert!(!validate(&tree).is_empty());
    assert_eq!(format_syntax(&tree), "a ::= missing 'z'..'a'{5,2}\n");
}

// ──────────────────────────────────────────────
// Lexical totality
// ──────────────────────────────────────────────

#[test]
fn scanner_is_total_over_arbitrary_inputs() {
    let adversarial = [
        "",
        "\n",
        "\r\n\r\n",
        "a",
        "@",
        "(*",
        "(* unclosed",
        "\"unclosed",
        "'x",
        "''",
        "::= ::=::=",
        "a::=b{1,}",
        "über ::= 'x'",
        "\u{0}\u{1}",
        "a ::= 'x' -- note with no newline",
        "………",
    ];
    for src in adversarial {
        let tokens = scan_raw(src);
        assert!(!tokens.is_empty(), "no tokens for {:?}", src);
        let last = tokens.last().unwrap();
        assert!(
            matches!(last.kind, TokenKind::EndOfFile | TokenKind::Error),
            "bad terminator {:?} for {:?}",
            last,
            src
        );
        let terminators = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::EndOfFile | TokenKind::Error))
            .count();
        assert_eq!(terminators, 1, "multiple terminators for {:?}", src);
    }
}

#[test]
fn every_scan_of_valid_source_ends_in_exactly_one_eof() {
    for src in VALID_CORPUS {
        let tokens = scan_raw(src);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfFile);
        let eofs = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::EndOfFile)
            .count();
        assert_eq!(eofs, 1);
    }
}
