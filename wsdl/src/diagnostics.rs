use std::fmt;

use serde::Serialize;
use tracing::warn;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    LoadError,
    UnsupportedSchemaConstruct,
    DuplicateTypeDefinition,
    SelfReferencingProperty,
    UnresolvableReference,
    InheritanceCycle,
}

/// A recoverable problem found while resolving. `line` is 0 when unknown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: String,
    pub line: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}, File: {}", self.message, self.file)?;
        if self.line > 0 {
            write!(f, " Line: {}", self.line)?;
        }
        Ok(())
    }
}

/// Append-only collector attached to a resolution session.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn record(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) {
        let diagnostic = Diagnostic {
            kind,
            message: message.into(),
            file: file.into(),
            line,
        };
        warn!(kind = ?diagnostic.kind, "{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
