// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Objective-J runtime code generation.
//!
//! Turns the semantic model into the statements that register classes,
//! protocols and methods with the Objective-J runtime.
//!
//! # Example
//!
//! A class `Counter : CPObject` with one ivar and an `increment` method:
//!
//! ```javascript
//! // @implementation Counter : CPObject
//! var $the_class = objj_allocateClassPair(CPObject, "Counter");
//!
//! class_addIvars($the_class,
//! [
//!     new objj_ivar("count", "int")
//! ]);
//!
//! objj_registerClassPair($the_class);
//!
//! class_addMethods($the_class,
//! [
//!     // - (void)increment
//!     new objj_method(sel_getUid("increment"),
//!     $Counter__increment,
//!     // argument types
//!     ["void"])
//! ]);
//! // @end: @implementation Counter : CPObject
//! ```
//!
//! # Module Organization
//!
//! - [`templates`] - One typed record per statement kind
//! - [`document`] - Document tree the templates render into
//! - [`selector_mangler`] - Function names and string literals
//! - `class_codegen` - Class and category assembly
//! - `protocol_codegen` - Protocol assembly
//! - `accessor_codegen` - Synthesized getter and setter entries
//!
//! Statements follow the model's declaration order. The same registry,
//! bodies and options always produce byte-identical text.

mod accessor_codegen;
mod class_codegen;
pub mod document;
mod protocol_codegen;
pub mod selector_mangler;
pub mod templates;

#[cfg(test)]
mod tests;

use crate::docvec;
use crate::semantic_analysis::{CategoryModel, MethodKind, ModelRegistry};
use document::{Document, blank_line, join, line, nil};
use ecow::EcoString;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during code generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenError {
    /// No class with this name is registered.
    #[error("cannot generate code for unknown class `{name}`")]
    UnknownClass { name: EcoString },

    /// No protocol with this name is registered.
    #[error("cannot generate code for unknown protocol `{name}`")]
    UnknownProtocol { name: EcoString },

    /// A synthesized accessor names an ivar its class does not declare.
    #[error("accessor `{selector}` of class `{class}` refers to unknown instance variable `{ivar}`")]
    UnknownInstanceVariable {
        class: EcoString,
        selector: EcoString,
        ivar: EcoString,
    },
}

/// Result type for code generation operations.
pub type Result<T> = std::result::Result<T, CodeGenError>;

/// Options for Objective-J code generation.
///
/// # Example
///
/// ```
/// use objjc_core::codegen::objj::CodegenOptions;
///
/// let options = CodegenOptions::new()
///     .with_error_type("ReferenceError")
///     .with_comments(false);
/// assert_eq!(options.error_type(), "ReferenceError");
/// assert!(!options.emit_comments());
/// assert_eq!(options.root_superclass(), "Nil");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Constructor thrown when a class or protocol lookup fails at run time.
    error_type: EcoString,
    /// Superclass expression for root classes.
    root_superclass: EcoString,
    /// Whether to emit `//` annotation comments.
    emit_comments: bool,
}

impl CodegenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            error_type: "SyntaxError".into(),
            root_superclass: "Nil".into(),
            emit_comments: true,
        }
    }

    #[must_use]
    pub fn with_error_type(mut self, error_type: impl Into<EcoString>) -> Self {
        self.error_type = error_type.into();
        self
    }

    #[must_use]
    pub fn with_root_superclass(mut self, root_superclass: impl Into<EcoString>) -> Self {
        self.root_superclass = root_superclass.into();
        self
    }

    #[must_use]
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.emit_comments = enabled;
        self
    }

    #[must_use]
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    #[must_use]
    pub fn root_superclass(&self) -> &str {
        &self.root_superclass
    }

    #[must_use]
    pub fn emit_comments(&self) -> bool {
        self.emit_comments
    }
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiled method implementations supplied by the driver.
///
/// Bodies are keyed by the declaration that owns them: a class name, or
/// [`MethodBodies::category_owner`] for a category. A subclass override and
/// the method it overrides therefore keep separate bodies. Declared methods
/// without an entry reference the function `$<Class>__<selector>` by name.
///
/// ```
/// use objjc_core::codegen::objj::MethodBodies;
/// use objjc_core::semantic_analysis::MethodKind;
///
/// let mut bodies = MethodBodies::new();
/// bodies.insert("Dog", MethodKind::Instance, "init", "function $Dog__init(self, _cmd) {}");
/// assert!(bodies.get("Dog", MethodKind::Instance, "init").is_some());
/// assert!(bodies.get("CPObject", MethodKind::Instance, "init").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodBodies {
    bodies: IndexMap<(EcoString, MethodKind, EcoString), EcoString>,
}

impl MethodBodies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The owner key for methods declared in a category: `Class (Category)`.
    #[must_use]
    pub fn category_owner(class_name: &str, category_name: &str) -> EcoString {
        ecow::eco_format!("{class_name} ({category_name})")
    }

    /// Sets the implementation text for a selector of `owner`, returning
    /// the old one.
    pub fn insert(
        &mut self,
        owner: impl Into<EcoString>,
        kind: MethodKind,
        selector: impl Into<EcoString>,
        body: impl Into<EcoString>,
    ) -> Option<EcoString> {
        self.bodies
            .insert((owner.into(), kind, selector.into()), body.into())
    }

    #[must_use]
    pub fn get(&self, owner: &str, kind: MethodKind, selector: &str) -> Option<&str> {
        self.bodies
            .get(&(EcoString::from(owner), kind, EcoString::from(selector)))
            .map(EcoString::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Generates the bootstrap code for one registered class.
///
/// Only the class's own methods are emitted; inherited methods are
/// registered by their own classes.
///
/// # Errors
///
/// Returns [`CodeGenError::UnknownClass`] if `class_name` is not
/// registered, or [`CodeGenError::UnknownInstanceVariable`] if a
/// synthesized accessor has lost its ivar.
#[instrument(skip(registry, bodies, options))]
pub fn generate_class(
    registry: &ModelRegistry,
    class_name: &str,
    bodies: &MethodBodies,
    options: &CodegenOptions,
) -> Result<String> {
    let class = registry
        .class(class_name)
        .ok_or_else(|| CodeGenError::UnknownClass {
            name: class_name.into(),
        })?;
    let generator = ObjjGenerator::new(registry, bodies, options);
    Ok(generator.class_doc(class)?.to_pretty_string())
}

/// Generates the code for a category: the class lookup followed by the
/// category's own methods.
///
/// # Errors
///
/// Returns [`CodeGenError`] if the category holds a synthesized accessor
/// whose class or ivar cannot be found.
#[instrument(skip_all, fields(class = %category.class_name(), category = %category.name()))]
pub fn generate_category(
    registry: &ModelRegistry,
    category: &CategoryModel,
    bodies: &MethodBodies,
    options: &CodegenOptions,
) -> Result<String> {
    let generator = ObjjGenerator::new(registry, bodies, options);
    Ok(generator.category_doc(category)?.to_pretty_string())
}

/// Generates the allocation, composition and method descriptions of one
/// registered protocol.
///
/// # Errors
///
/// Returns [`CodeGenError::UnknownProtocol`] if `protocol_name` is not
/// registered.
#[instrument(skip(registry, options))]
pub fn generate_protocol(
    registry: &ModelRegistry,
    protocol_name: &str,
    options: &CodegenOptions,
) -> Result<String> {
    let protocol =
        registry
            .protocol(protocol_name)
            .ok_or_else(|| CodeGenError::UnknownProtocol {
                name: protocol_name.into(),
            })?;
    let bodies = MethodBodies::new();
    let generator = ObjjGenerator::new(registry, &bodies, options);
    Ok(generator.protocol_doc(protocol).to_pretty_string())
}

/// Generates every protocol, then every class, in registration order,
/// separated by blank lines.
///
/// # Errors
///
/// Returns the first [`CodeGenError`] raised by a class.
#[instrument(skip_all)]
pub fn generate(
    registry: &ModelRegistry,
    bodies: &MethodBodies,
    options: &CodegenOptions,
) -> Result<String> {
    let generator = ObjjGenerator::new(registry, bodies, options);
    let mut declarations = Vec::new();
    for protocol in registry.protocols() {
        declarations.push(generator.protocol_doc(protocol));
    }
    for class in registry.classes() {
        declarations.push(generator.class_doc(class)?);
    }
    debug!(count = declarations.len(), "generated declarations");
    Ok(join(declarations, &Document::Newline).to_pretty_string())
}

/// Shared state for one generation pass.
struct ObjjGenerator<'a> {
    registry: &'a ModelRegistry,
    bodies: &'a MethodBodies,
    options: &'a CodegenOptions,
}

impl<'a> ObjjGenerator<'a> {
    fn new(
        registry: &'a ModelRegistry,
        bodies: &'a MethodBodies,
        options: &'a CodegenOptions,
    ) -> Self {
        Self {
            registry,
            bodies,
            options,
        }
    }

    /// `// <title>` followed by a line break, if comments are on.
    fn opening_comment(&self, title: &str) -> Document<'a> {
        if self.options.emit_comments() {
            docvec![format!("// {title}"), line()]
        } else {
            nil()
        }
    }

    /// Joins statement blocks with blank lines and closes the declaration.
    /// The result ends with a newline.
    fn assemble(&self, blocks: Vec<Document<'a>>, title: &str) -> Document<'a> {
        let closing = if self.options.emit_comments() {
            docvec![line(), format!("// @end: {title}")]
        } else {
            nil()
        };
        docvec![join(blocks, &blank_line()), closing, line()]
    }
}
