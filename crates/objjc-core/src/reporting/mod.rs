// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic reporting.
//!
//! **DDD Context:** Compilation — Reporting
//!
//! A [`Reporter`] receives the diagnostics of one compilation and writes
//! them out, followed by a one-line tally:
//!
//! ```text
//! warning: method `-copy` in protocol `Copying` is not implemented
//!   hint: `Person` declares conformance to `Copying`
//!
//! 1 warning generated.
//! ```
//!
//! When the source text is attached, each diagnostic is drawn with miette's
//! graphical handler instead of the plain `severity: message` form.

pub mod diagnostic;

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing::debug;

use crate::source_analysis::Diagnostic;

pub use diagnostic::CompileDiagnostic;

/// Printed when a compilation produced no diagnostics.
pub const NO_ISSUES: &str = "objjc: no warnings or errors generated.";

/// Sink for the diagnostics of a compilation.
pub trait Reporter {
    /// Writes out `diagnostics` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn report(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _diagnostics: &[Diagnostic]) -> io::Result<()> {
        Ok(())
    }
}

/// Writes diagnostics and a summary to any [`Write`] sink.
#[derive(Debug)]
pub struct StandardReporter<W: Write> {
    out: W,
    colors: bool,
    source: Option<(Utf8PathBuf, String)>,
}

impl<W: Write> StandardReporter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            colors: false,
            source: None,
        }
    }

    /// Enables ANSI colours in graphical output.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Attaches the source the diagnostic spans point into.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        self.source = Some((path.into(), text.into()));
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_plain(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(self.out, "{}: {}", diagnostic.severity, diagnostic.message)?;
        if let Some(hint) = &diagnostic.hint {
            writeln!(self.out, "  hint: {hint}")?;
        }
        Ok(())
    }

    fn write_graphical(
        &mut self,
        diagnostic: &Diagnostic,
        path: &Utf8Path,
        text: &str,
    ) -> io::Result<()> {
        let theme = if self.colors {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let handler = GraphicalReportHandler::new_themed(theme);
        let rich = CompileDiagnostic::from_core_diagnostic(diagnostic, path.as_str(), text);

        let mut rendered = String::new();
        handler
            .render_report(&mut rendered, &rich)
            .map_err(io::Error::other)?;
        write!(self.out, "{rendered}")
    }
}

impl<W: Write> Reporter for StandardReporter<W> {
    fn report(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        debug!(count = diagnostics.len(), "reporting diagnostics");

        if diagnostics.is_empty() {
            writeln!(self.out, "{NO_ISSUES}")?;
            return self.out.flush();
        }

        let source = self.source.take();
        for diagnostic in diagnostics {
            match &source {
                Some((path, text)) => self.write_graphical(diagnostic, path, text)?,
                None => self.write_plain(diagnostic)?,
            }
        }
        self.source = source;

        writeln!(self.out)?;
        writeln!(self.out, "{}", summary_line(diagnostics))?;
        self.out.flush()
    }
}

/// The closing tally, e.g. `2 warnings and 1 error generated.`
///
/// Returns [`NO_ISSUES`] when `diagnostics` is empty.
#[must_use]
pub fn summary_line(diagnostics: &[Diagnostic]) -> String {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;

    let count = |n: usize, noun: &str| {
        if n == 1 {
            format!("1 {noun}")
        } else {
            format!("{n} {noun}s")
        }
    };

    match (warnings, errors) {
        (0, 0) => NO_ISSUES.to_string(),
        (w, 0) => format!("{} generated.", count(w, "warning")),
        (0, e) => format!("{} generated.", count(e, "error")),
        (w, e) => format!("{} and {} generated.", count(w, "warning"), count(e, "error")),
    }
}
