//! # Diagnostics Module
//!
//! Every component of the scan pipeline reports progress and recoverable problems
//! through a [`DiagnosticSink`] handed to it by the caller. The sink lives for one run.
//!
//! - [`TracingSink`] forwards diagnostics to `tracing` (used by the CLI)
//! - [`CollectingSink`] buffers them in memory (used by the linter and tests)
//!
//! ## Usage
//!
//! ```rust
//! use brunogen::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
//!
//! let sink = CollectingSink::new();
//! sink.emit(Diagnostic::new("type:Foo", Severity::Warning, "duplicate_type", "defined twice"));
//! assert_eq!(sink.take().len(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Error - the affected route is skipped or the lint fails
    Error,
    /// Warning - output is produced but may be incomplete
    Warning,
    /// Info - progress or best practice suggestion
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// A single diagnostic produced during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the issue occurred (e.g. "handlers/checks.go:12", "type:IssueCheckRequest")
    pub location: String,
    /// Severity of the issue
    pub severity: Severity,
    /// Machine-readable kind (e.g. "body_type_not_found", "duplicate_type")
    pub kind: String,
    /// Human-readable description
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        location: impl Into<String>,
        severity: Severity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.location, self.kind, self.message
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " - {suggestion}")?;
        }
        Ok(())
    }
}

/// Receiver for diagnostics emitted by the pipeline components
pub trait DiagnosticSink {
    /// Record one diagnostic
    fn emit(&self, diagnostic: Diagnostic);

    /// Shorthand for an info-level diagnostic
    fn info(&self, location: &str, kind: &str, message: String) {
        self.emit(Diagnostic::new(location, Severity::Info, kind, message));
    }
}

/// Sink that forwards every diagnostic to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, d: Diagnostic) {
        let suggestion = d.suggestion.as_deref().unwrap_or("");
        match d.severity {
            Severity::Error => tracing::error!(
                location = %d.location,
                kind = %d.kind,
                suggestion,
                "{}",
                d.message
            ),
            Severity::Warning => tracing::warn!(
                location = %d.location,
                kind = %d.kind,
                suggestion,
                "{}",
                d.message
            ),
            Severity::Info => tracing::info!(location = %d.location, kind = %d.kind, "{}", d.message),
        }
    }
}

/// Sink that keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all diagnostics collected so far
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Collected diagnostics of the given kind
    pub fn of_kind(&self, kind: &str) -> Vec<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
