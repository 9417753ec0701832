use std::fmt;

/// Category of a non-fatal problem met during a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A locator did not conform to the grammar of its reference kind.
    PatternMismatch,
    /// Neither a version nor a commit could be found for an identity.
    UnresolvableIdentity,
    /// The vulnerability service failed for one request.
    QueryFailed,
    /// A Software Heritage release could not be resolved.
    SwhLookupFailed,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::PatternMismatch => "pattern mismatch",
            DiagnosticKind::UnresolvableIdentity => "unresolvable identity",
            DiagnosticKind::QueryFailed => "query failed",
            DiagnosticKind::SwhLookupFailed => "swh lookup failed",
        };
        f.write_str(label)
    }
}

/// A recorded warning. Every skipped reference or dropped request leaves one
/// of these behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
