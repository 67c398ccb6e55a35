// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Document tree for Objective-J runtime code generation.
//!
//! **DDD Context:** Compilation — Code Generation
//!
//! Templates build `Document` values instead of writing into a string
//! buffer, and the tree is rendered in one final pass. `Nest` tracks
//! indentation, so a method entry renders identically whether it sits at
//! the top level or inside a `class_addMethods` array.
//!
//! # Example
//!
//! ```
//! use objjc_core::codegen::objj::document::{INDENT, line, nest};
//! use objjc_core::docvec;
//!
//! let doc = docvec![
//!     "class_addMethods($the_class,",
//!     line(),
//!     "[",
//!     nest(INDENT, docvec![line(), "entry"]),
//!     line(),
//!     "]);",
//! ];
//! assert_eq!(doc.to_pretty_string(), "class_addMethods($the_class,\n[\n    entry\n]);");
//! ```

use ecow::EcoString;

/// Indentation width of generated code.
pub const INDENT: isize = 4;

/// A pretty-printable document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document<'a> {
    /// A borrowed string.
    Str(&'a str),
    /// An owned string.
    String(String),
    /// A newline followed by current indentation.
    Line,
    /// A newline with no indentation, used for blank lines.
    Newline,
    /// Increase indentation for nested content.
    Nest(isize, Box<Document<'a>>),
    /// A sequence of documents.
    Vec(Vec<Document<'a>>),
    /// Empty document.
    Nil,
}

/// Coerce a value into a `Document`.
pub trait Documentable<'a> {
    fn to_doc(self) -> Document<'a>;
}

impl<'a> Documentable<'a> for &'a str {
    fn to_doc(self) -> Document<'a> {
        Document::Str(self)
    }
}

impl<'a> Documentable<'a> for &'a EcoString {
    fn to_doc(self) -> Document<'a> {
        Document::Str(self.as_str())
    }
}

impl<'a> Documentable<'a> for String {
    fn to_doc(self) -> Document<'a> {
        Document::String(self)
    }
}

impl<'a> Documentable<'a> for Document<'a> {
    fn to_doc(self) -> Document<'a> {
        self
    }
}

impl<'a> Documentable<'a> for Vec<Document<'a>> {
    fn to_doc(self) -> Document<'a> {
        Document::Vec(self)
    }
}

/// Join multiple documents together in a vector.
///
/// ```
/// use objjc_core::docvec;
///
/// let doc = docvec!["objj_registerClassPair(", "$the_class", ");"];
/// assert_eq!(doc.to_pretty_string(), "objj_registerClassPair($the_class);");
/// ```
#[macro_export]
macro_rules! docvec {
    () => {
        $crate::codegen::objj::document::Document::Vec(Vec::new())
    };

    ($first:expr $(,)?) => {
        $crate::codegen::objj::document::Document::Vec(
            vec![$crate::codegen::objj::document::Documentable::to_doc($first)]
        )
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {
        match $crate::codegen::objj::document::Documentable::to_doc($first) {
            $crate::codegen::objj::document::Document::Vec(mut vec) => {
                $(
                    vec.push($crate::codegen::objj::document::Documentable::to_doc($rest));
                )*
                $crate::codegen::objj::document::Document::Vec(vec)
            },
            first => {
                $crate::codegen::objj::document::Document::Vec(
                    vec![first, $($crate::codegen::objj::document::Documentable::to_doc($rest)),+]
                )
            }
        }
    };
}

#[must_use]
pub fn line() -> Document<'static> {
    Document::Line
}

/// An empty line followed by a fresh indented line.
#[must_use]
pub fn blank_line() -> Document<'static> {
    Document::Vec(vec![Document::Newline, Document::Line])
}

#[must_use]
pub fn nil() -> Document<'static> {
    Document::Nil
}

#[must_use]
pub fn nest(indent: isize, doc: Document<'_>) -> Document<'_> {
    Document::Nest(indent, Box::new(doc))
}

/// Joins documents with a separator between each pair.
#[must_use]
pub fn join<'a>(
    docs: impl IntoIterator<Item = Document<'a>>,
    separator: &Document<'a>,
) -> Document<'a> {
    let mut result = Vec::new();
    for doc in docs {
        if !result.is_empty() {
            result.push(separator.clone());
        }
        result.push(doc);
    }
    if result.is_empty() {
        Document::Nil
    } else {
        Document::Vec(result)
    }
}

#[must_use]
pub fn concat<'a>(docs: impl IntoIterator<Item = Document<'a>>) -> Document<'a> {
    Document::Vec(docs.into_iter().collect())
}

/// Lays out multi-line text, one `line()` per line of input.
///
/// The result starts with a line break. Empty lines carry no indentation.
#[must_use]
pub fn text_lines(text: &str) -> Document<'_> {
    concat(text.lines().map(|text_line| {
        if text_line.is_empty() {
            Document::Newline
        } else {
            docvec![line(), text_line]
        }
    }))
}

impl Document<'_> {
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        let mut output = String::new();
        self.render_to(&mut output, 0);
        output
    }

    fn render_to(&self, output: &mut String, indent: isize) {
        match self {
            Document::Str(s) => output.push_str(s),
            Document::String(s) => output.push_str(s),
            Document::Nil => {}
            Document::Line => {
                output.push('\n');
                write_indent(output, indent);
            }
            Document::Newline => output.push('\n'),
            Document::Nest(extra, doc) => doc.render_to(output, indent + extra),
            Document::Vec(docs) => {
                for doc in docs {
                    doc.render_to(output, indent);
                }
            }
        }
    }
}

fn write_indent(output: &mut String, indent: isize) {
    for _ in 0..indent {
        output.push(' ');
    }
}
