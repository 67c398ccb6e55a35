// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source-annotated diagnostics using miette.
//!
//! Wraps a core [`Diagnostic`](CoreDiagnostic) together with the source it
//! points into, so miette can draw the offending lines with a label under
//! the span.

// Suppress unused_assignments for struct fields used by derive macros
#![allow(unused_assignments)]

use crate::source_analysis::{Diagnostic as CoreDiagnostic, Severity};
use miette::{Diagnostic, SourceSpan};

/// A compilation diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(objjc::compile))]
pub struct CompileDiagnostic {
    pub severity: Severity,
    pub message: String,
    #[source_code]
    pub src: miette::NamedSource<String>,
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label under the span (interpolated by the derive macro).
    pub label: String,
    #[help]
    pub help: Option<String>,
}

impl CompileDiagnostic {
    /// Builds a renderable diagnostic. Spans running past the end of
    /// `source` are clamped to it.
    #[must_use]
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };
        let source_len = source.len();
        let start = (diagnostic.span.start() as usize).min(source_len);
        let end = (diagnostic.span.end() as usize).clamp(start, source_len);

        Self {
            severity: diagnostic.severity,
            message: diagnostic.message.to_string(),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: (start, end - start).into(),
            label: label.to_string(),
            help: diagnostic.hint.as_ref().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Span;

    #[test]
    fn test_from_core_diagnostic_warning() {
        let core_diag = CoreDiagnostic::warning("method `-greet` is not implemented", Span::new(11, 17))
            .with_hint("add the method");
        let source = "@implementation Person : CPObject";
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "Person.j", source);

        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "method `-greet` is not implemented");
        assert_eq!(diag.span.offset(), 11);
        assert_eq!(diag.span.len(), 6);
        assert_eq!(diag.label, "warning here");
        assert_eq!(diag.help.as_deref(), Some("add the method"));
    }

    #[test]
    fn test_from_core_diagnostic_error() {
        let core_diag = CoreDiagnostic::error("superclass chain of `A` is cyclic", Span::new(0, 5));
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "A.j", "@implementation A : B");

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.label, "error here");
        assert_eq!(diag.help, None);
    }

    #[test]
    fn test_span_is_clamped_to_source() {
        let core_diag = CoreDiagnostic::error("out of range", Span::new(8, 40));
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "short.j", "0123456789");

        assert_eq!(diag.span.offset(), 8);
        assert_eq!(diag.span.len(), 2);

        let core_diag = CoreDiagnostic::error("past the end", Span::new(30, 40));
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "short.j", "0123456789");
        assert_eq!(diag.span.offset(), 10);
        assert_eq!(diag.span.len(), 0);
    }
}
