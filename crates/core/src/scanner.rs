//! Scanner: source text to an ordered token sequence.
//!
//! Each token kind has one anchored regular pattern; at every position the
//! patterns are tried in the fixed priority order below and the first match
//! wins. Scanning stops at the first unmatched input and surfaces it as a
//! fatal lexical error, since the parser cannot recover from unknown
//! lexemes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\(\*((?s:.)*?)\*\)").unwrap());
static NOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A--([^\r\n]*)").unwrap());
static LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\A"((?:[^"\\\r\n]|\\.)*)""#).unwrap());
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[a-z][a-z0-9_]*").unwrap());
static INTRINSIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[A-Z][A-Z0-9_]*").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[0-9]+").unwrap());
static DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A(?:::=|\.\.|[|{}()\[\],^*])").unwrap());
static CHARACTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A'((?:[^'\\\r\n]|\\.))'").unwrap());
static END_OF_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\r?\n").unwrap());
static SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[ \t]+").unwrap());

/// Match priority order. Overlapping prefixes are resolved here: `(*` is a
/// comment before `(` is a delimiter, `--` is a note before anything else
/// could see a dash.
const PRIORITY: [TokenKind; 10] = [
    TokenKind::Comment,
    TokenKind::Note,
    TokenKind::Literal,
    TokenKind::Name,
    TokenKind::Intrinsic,
    TokenKind::Number,
    TokenKind::Delimiter,
    TokenKind::Character,
    TokenKind::EndOfLine,
    TokenKind::Space,
];

fn pattern(kind: TokenKind) -> Option<&'static Regex> {
    match kind {
        TokenKind::Comment => Some(&COMMENT),
        TokenKind::Note => Some(&NOTE),
        TokenKind::Literal => Some(&LITERAL),
        TokenKind::Name => Some(&NAME),
        TokenKind::Intrinsic => Some(&INTRINSIC),
        TokenKind::Number => Some(&NUMBER),
        TokenKind::Delimiter => Some(&DELIMITER),
        TokenKind::Character => Some(&CHARACTER),
        TokenKind::EndOfLine => Some(&END_OF_LINE),
        TokenKind::Space => Some(&SPACE),
        TokenKind::EndOfFile | TokenKind::Error => None,
    }
}

/// Match one token kind's pattern against the whole of `text` and return
/// its capturing-group matches (the full match when the pattern has no
/// groups). Pure; used by the validator to check intrinsic name forms and
/// by tooling that needs to classify isolated lexemes.
pub fn match_token(kind: TokenKind, text: &str) -> Option<Vec<String>> {
    let re = pattern(kind)?;
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    if whole.as_str().len() != text.len() {
        return None;
    }
    if caps.len() == 1 {
        return Some(vec![whole.as_str().to_owned()]);
    }
    Some(
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().to_owned())
            .collect(),
    )
}

/// Scan the whole source. The result ends in exactly one `EndOfFile` token,
/// or in exactly one `Error` token carrying the offending text when some
/// position matches no pattern.
pub fn scan_raw(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut position: u32 = 1;
    let mut offset = 0usize;

    while offset < source.len() {
        let rest = &source[offset..];

        // An opening `(*` with no closing `*)` would otherwise lex as two
        // delimiters and produce a baffling parse error much later.
        if rest.starts_with("(*") && !COMMENT.is_match(rest) {
            tokens.push(Token {
                kind: TokenKind::Error,
                line,
                position,
                value: "(*".to_owned(),
            });
            return tokens;
        }

        let mut matched = false;
        for kind in PRIORITY {
            let re = pattern(kind).unwrap();
            if let Some(caps) = re.captures(rest) {
                let lexeme = caps.get(0).unwrap().as_str();
                let value = match kind {
                    TokenKind::Comment | TokenKind::Note => caps[1].trim().to_owned(),
                    TokenKind::Literal => unescape(&caps[1]),
                    TokenKind::Character => unescape_char(&caps[1]).to_string(),
                    _ => lexeme.to_owned(),
                };
                tokens.push(Token {
                    kind,
                    line,
                    position,
                    value,
                });
                for c in lexeme.chars() {
                    if c == '\n' {
                        line += 1;
                        position = 1;
                    } else {
                        position += 1;
                    }
                }
                offset += lexeme.len();
                matched = true;
                break;
            }
        }

        if !matched {
            let bad: String = rest.chars().take_while(|c| !c.is_whitespace()).collect();
            let bad = if bad.is_empty() {
                rest.chars().next().unwrap().to_string()
            } else {
                bad
            };
            tokens.push(Token {
                kind: TokenKind::Error,
                line,
                position,
                value: bad,
            });
            return tokens;
        }
    }

    tokens.push(Token {
        kind: TokenKind::EndOfFile,
        line,
        position,
        value: String::new(),
    });
    tokens
}

/// Scan the whole source, failing on the first lexical error.
pub fn scan(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let tokens = scan_raw(source);
    let last = tokens.last().expect("scan_raw returns at least one token");
    if last.kind != TokenKind::Error {
        return Ok(tokens);
    }
    let message = if last.value.starts_with("(*") {
        "unterminated comment".to_owned()
    } else if last.value.starts_with('"') {
        "unterminated string literal".to_owned()
    } else if last.value.starts_with('\'') {
        "unterminated character literal".to_owned()
    } else {
        format!("unrecognized input '{}'", last.value)
    };
    Err(SyntaxError::lexical(
        last.line,
        last.position,
        message,
        &last.value,
    ))
}

/// Resolve string-literal escapes. Unknown escapes keep the backslash.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Resolve a character-literal body to its single character. Unknown
/// escapes resolve to the escaped character itself so the value is always
/// exactly one char.
fn unescape_char(raw: &str) -> char {
    let mut chars = raw.chars();
    match chars.next() {
        Some('\\') => match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some(other) => other,
            None => '\\',
        },
        Some(c) => c,
        None => '\0',
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan_raw(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_yields_single_eof() {
        let tokens = scan("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn scans_a_full_inline_definition() {
        let tokens = scan("greeting ::= \"hello\" SPACE name\n").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Name,
                TokenKind::Space,
                TokenKind::Delimiter,
                TokenKind::Space,
                TokenKind::Literal,
                TokenKind::Space,
                TokenKind::Intrinsic,
                TokenKind::Space,
                TokenKind::Name,
                TokenKind::EndOfLine,
                TokenKind::EndOfFile,
            ]
        );
        assert_eq!(tokens[2].value, "::=");
        assert_eq!(tokens[4].value, "hello");
    }

    #[test]
    fn positions_are_one_based_and_track_lines() {
        let tokens = scan("a ::= 'x'\nb ::= 'y'\n").unwrap();
        let b = tokens.iter().find(|t| t.value == "b").unwrap();
        assert_eq!(b.line, 2);
        assert_eq!(b.position, 1);
        let y = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Character)
            .nth(1)
            .unwrap();
        assert_eq!(y.line, 2);
        assert_eq!(y.position, 7);
    }

    #[test]
    fn comment_spans_lines_and_is_trimmed() {
        let tokens = scan("(* first\nsecond *)\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].value, "first\nsecond");
        // the EOL after the comment is back on line 2
        assert_eq!(tokens[1].kind, TokenKind::EndOfLine);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn comment_wins_over_paren_delimiter() {
        assert_eq!(
            kinds("(* c *)")[0],
            TokenKind::Comment,
            "(* must not lex as '(' '*'"
        );
        assert_eq!(kinds("(")[0], TokenKind::Delimiter);
    }

    #[test]
    fn note_runs_to_end_of_line() {
        let tokens = scan("-- a note | with \"stuff\"\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Note);
        assert_eq!(tokens[0].value, "a note | with \"stuff\"");
        assert_eq!(tokens[1].kind, TokenKind::EndOfLine);
    }

    #[test]
    fn literal_escapes_are_resolved() {
        let tokens = scan(r#""a\"b\\c\nd\te""#).unwrap();
        assert_eq!(tokens[0].value, "a\"b\\c\nd\te");
    }

    #[test]
    fn unknown_literal_escape_keeps_backslash() {
        let tokens = scan(r#""a\qb""#).unwrap();
        assert_eq!(tokens[0].value, "a\\qb");
    }

    #[test]
    fn character_is_a_single_resolved_char() {
        assert_eq!(scan(r"'\n'").unwrap()[0].value, "\n");
        assert_eq!(scan(r"'\''").unwrap()[0].value, "'");
        assert_eq!(scan("'z'").unwrap()[0].value, "z");
    }

    #[test]
    fn multi_char_delimiters_win_over_prefixes() {
        let tokens = scan("::= ..").unwrap();
        assert_eq!(tokens[0].value, "::=");
        assert_eq!(tokens[2].value, "..");
    }

    #[test]
    fn name_and_intrinsic_are_distinguished_by_case() {
        let tokens = scan("abc ABC").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Name);
        assert_eq!(tokens[2].kind, TokenKind::Intrinsic);
    }

    #[test]
    fn unterminated_string_is_a_lexical_error() {
        let err = scan("x ::= \"oops\n").unwrap_err();
        assert!(err.message.contains("unterminated string"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn unterminated_comment_is_a_lexical_error() {
        let err = scan("(* never closed").unwrap_err();
        assert!(err.message.contains("unterminated comment"));
    }

    #[test]
    fn unmatched_input_stops_with_one_error_token() {
        let tokens = scan_raw("a ::= @@@ b");
        let errors: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].value, "@@@");
        assert_eq!(errors[0], tokens.last().unwrap());
    }

    #[test]
    fn match_token_returns_capture_groups() {
        assert_eq!(
            match_token(TokenKind::Literal, "\"hi\""),
            Some(vec!["hi".to_owned()])
        );
        assert_eq!(
            match_token(TokenKind::Name, "foo_bar"),
            Some(vec!["foo_bar".to_owned()])
        );
        assert_eq!(match_token(TokenKind::Name, "Foo"), None);
        assert_eq!(match_token(TokenKind::Intrinsic, "SPACE99x"), None);
        assert_eq!(match_token(TokenKind::EndOfFile, ""), None);
    }

    #[test]
    fn match_token_requires_full_match() {
        assert_eq!(match_token(TokenKind::Number, "12a"), None);
        assert_eq!(
            match_token(TokenKind::Number, "12"),
            Some(vec!["12".to_owned()])
        );
    }
}
