use serde::{Deserialize, Serialize};

/// A fatal lexical or syntactic error. The scanner stops at the first
/// unmatched input and the parser aborts on the first structural mismatch,
/// so at most one of these is ever produced per call and no partial tree
/// accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{line}:{position}: {message}")]
pub struct SyntaxError {
    pub line: u32,
    pub position: u32,
    pub message: String,
    /// The offending lexeme, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    /// Human-readable descriptions of what would have been accepted here.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub expected: Vec<String>,
}

impl SyntaxError {
    pub fn lexical(line: u32, position: u32, message: impl Into<String>, found: &str) -> Self {
        SyntaxError {
            line,
            position,
            message: message.into(),
            found: Some(found.to_owned()),
            expected: Vec::new(),
        }
    }

    pub fn syntactic(
        line: u32,
        position: u32,
        message: impl Into<String>,
        found: Option<&str>,
        expected: &[&str],
    ) -> Self {
        SyntaxError {
            line,
            position,
            message: message.into(),
            found: found.map(str::to_owned),
            expected: expected.iter().map(|e| (*e).to_owned()).collect(),
        }
    }
}

/// Category of a semantic defect reported by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    DuplicateDefinition,
    UnresolvedReference,
    UnresolvedIntrinsic,
    BadConstraintRange,
    BadGlyphRange,
    EmptyFilter,
    LeftRecursion,
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One semantic finding. The validator accumulates these instead of
/// stopping at the first, so tooling can list every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{definition}: {detail}")]
pub struct Defect {
    pub kind: DefectKind,
    pub severity: Severity,
    /// Name of the definition the finding is reported against.
    pub definition: String,
    pub detail: String,
    /// Source line of that definition, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Defect {
    pub fn error(
        kind: DefectKind,
        definition: &str,
        line: Option<u32>,
        detail: impl Into<String>,
    ) -> Self {
        Defect {
            kind,
            severity: Severity::Error,
            definition: definition.to_owned(),
            detail: detail.into(),
            line,
        }
    }

    pub fn warning(
        kind: DefectKind,
        definition: &str,
        line: Option<u32>,
        detail: impl Into<String>,
    ) -> Self {
        Defect {
            kind,
            severity: Severity::Warning,
            definition: definition.to_owned(),
            detail: detail.into(),
            line,
        }
    }
}
