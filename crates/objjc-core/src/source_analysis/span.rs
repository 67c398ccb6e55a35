// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source locations carried by model records.
//!
//! The core never reads source text itself; spans are handed over by the
//! external parser and travel with each class, protocol and method record so
//! that diagnostics can point back at the declaration.

use std::ops::Range;

/// A byte-offset range in a source file.
///
/// ```
/// use objjc_core::source_analysis::Span;
///
/// let span = Span::new(4, 12);
/// assert_eq!(span.len(), 8);
/// assert_eq!(span.as_range(), 4..12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// End byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The range for slicing source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}
