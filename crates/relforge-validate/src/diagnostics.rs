//! Accumulated diagnostics: both validation passes collect every error and
//! warning found in a single sweep instead of bailing on the first one, so
//! a user sees every mistake in their `#pragma db` annotations at once.

use relforge_semantics::SourceLoc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Classifies *why* a diagnostic was raised, independent of its severity,
/// so a caller (or a test asserting a specific seed scenario's outcome)
/// can match on the kind of problem rather than parsing the message text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A `null`/`not-null` (or similarly conflicting) pair of directives
    /// targeting the same node; resolved by source location rather than
    /// rejected, so this kind is informational more often than fatal.
    #[error("annotation conflict")]
    AnnotationConflict,
    /// Unnamed type, multiple id/version members, a base-kind mismatch, an
    /// empty class, or an empty section.
    #[error("structural error")]
    StructuralError,
    /// A single annotation combination that is individually well-formed
    /// but not meaningful together (id declared readonly, polymorphic
    /// without a virtual function, a session-mode id with no `operator<`).
    #[error("semantic error")]
    SemanticError,
    /// An inconsistent combination of command-line options, surfaced
    /// through the same sink since option consistency depends on the
    /// graph pass 1 has already resolved.
    #[error("option error")]
    OptionError,
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: ErrorKind,
    pub loc: SourceLoc,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}: {} ({}): {}", self.loc, severity, self.kind, self.message)
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, kind: ErrorKind, loc: SourceLoc, message: impl Into<String>) {
        self.error_count += 1;
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind,
            loc,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, kind: ErrorKind, loc: SourceLoc, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            loc,
            message: message.into(),
        });
    }

    pub fn info(&mut self, kind: ErrorKind, loc: SourceLoc, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Info,
            kind,
            loc,
            message: message.into(),
        });
    }

    pub fn failed(&self) -> bool {
        self.error_count > 0
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn extend(&mut self, other: DiagnosticSink) {
        self.error_count += other.error_count;
        self.diagnostics.extend(other.diagnostics);
    }
}
