// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Typed templates for runtime bootstrap statements.
//!
//! **DDD Context:** Compilation — Code Generation
//!
//! Each declaration kind has one record type. A record holds borrowed
//! model data and renders to a [`Document`]; it reads nothing but its own
//! fields and the [`CodegenOptions`] passed in, so every template can be
//! tested on its own.
//!
//! ```
//! use objjc_core::codegen::objj::CodegenOptions;
//! use objjc_core::codegen::objj::templates::{ClassDeclaration, Template};
//!
//! let decl = ClassDeclaration { class: "Counter", superclass: Some("CPObject") };
//! assert_eq!(
//!     decl.render(&CodegenOptions::new()),
//!     "var $the_class = objj_allocateClassPair(CPObject, \"Counter\");"
//! );
//! ```

use super::CodegenOptions;
use super::document::{Document, INDENT, blank_line, concat, join, line, nest, nil, text_lines};
use super::selector_mangler::{function_name, string_literal};
use crate::docvec;
use crate::semantic_analysis::{InstanceVariable, MethodKind, MethodRecord};
use ecow::EcoString;
use std::iter;

/// A record that renders one kind of generated statement.
pub trait Template<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a>;

    fn render(&self, options: &CodegenOptions) -> String {
        self.to_doc(options).to_pretty_string()
    }
}

/// `var $the_class = objj_allocateClassPair(Super, "Name");`
///
/// The superclass is emitted as an identifier, so a superclass the runtime
/// does not know fails when the generated code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDeclaration<'a> {
    pub class: &'a str,
    /// `None` for a root class.
    pub superclass: Option<&'a str>,
}

impl<'a> Template<'a> for ClassDeclaration<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        let superclass = self.superclass.unwrap_or(options.root_superclass());
        docvec![
            "var $the_class = objj_allocateClassPair(",
            superclass.to_string(),
            ", ",
            string_literal(self.class),
            ");",
        ]
    }
}

/// Looks up the class a category extends; throws if it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDeclaration<'a> {
    pub class: &'a str,
}

impl<'a> Template<'a> for CategoryDeclaration<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        docvec![
            "var $the_class = objj_getClass(",
            string_literal(self.class),
            ");",
            blank_line(),
            undefined_guard(
                "$the_class",
                options,
                &format!("Undefined class: {}", self.class)
            ),
        ]
    }
}

/// What a protocol reference is composed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOwner {
    /// `class_addProtocol` on `$the_class`.
    Class,
    /// `protocol_addProtocol` on `$the_protocol`.
    Protocol,
}

impl ReferenceOwner {
    fn local(self) -> &'static str {
        match self {
            ReferenceOwner::Class => "$the_protocol",
            ReferenceOwner::Protocol => "$the_inherited_protocol",
        }
    }

    fn compose_call(self) -> &'static str {
        match self {
            ReferenceOwner::Class => "class_addProtocol($the_class, $the_protocol);",
            ReferenceOwner::Protocol => {
                "protocol_addProtocol($the_protocol, $the_inherited_protocol);"
            }
        }
    }
}

/// Looks up a protocol by name, throws if undefined, then composes it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolReference<'a> {
    pub owner: ReferenceOwner,
    pub protocol: &'a str,
    /// The first reference in a declaration introduces the local with `var`.
    pub declares_local: bool,
}

impl<'a> Template<'a> for ProtocolReference<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        let local = self.owner.local();
        docvec![
            if self.declares_local { "var " } else { "" },
            local,
            " = objj_getProtocol(",
            string_literal(self.protocol),
            ");",
            blank_line(),
            undefined_guard(
                local,
                options,
                &format!("Undefined protocol: {}", self.protocol)
            ),
            blank_line(),
            self.owner.compose_call(),
        ]
    }
}

/// Allocates a protocol, composes its parents in, then registers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolDeclaration<'a> {
    pub protocol: &'a str,
    pub parents: &'a [EcoString],
}

impl<'a> Template<'a> for ProtocolDeclaration<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        let parents = self.parents.iter().enumerate().map(|(index, parent)| {
            docvec![
                blank_line(),
                ProtocolReference {
                    owner: ReferenceOwner::Protocol,
                    protocol: parent.as_str(),
                    declares_local: index == 0,
                }
                .to_doc(options),
            ]
        });
        docvec![
            "var $the_protocol = objj_allocateProtocol(",
            string_literal(self.protocol),
            ");",
            concat(parents),
            blank_line(),
            "objj_registerProtocol($the_protocol);",
        ]
    }
}

/// The function slot of a method entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Implementation<'a> {
    /// Protocol method descriptions carry no implementation.
    Null,
    /// A function defined elsewhere, referenced by name.
    Reference(String),
    /// A function expression, possibly multi-line.
    Function(&'a str),
}

/// `new objj_method(sel_getUid("sel"), impl, ["ret", "arg"...])`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry<'a> {
    pub kind: MethodKind,
    pub method: &'a MethodRecord,
    pub implementation: Implementation<'a>,
}

impl<'a> Template<'a> for MethodEntry<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        let comment = if options.emit_comments() {
            docvec![
                format!(
                    "// {} ({}){}",
                    self.kind.sign(),
                    self.method.return_type(),
                    self.method.selector()
                ),
                line(),
            ]
        } else {
            nil()
        };
        let implementation = match &self.implementation {
            Implementation::Null => docvec![", null,"],
            Implementation::Reference(name) => docvec![",", line(), name.clone(), ","],
            Implementation::Function(text) => docvec![",", text_lines(*text), ","],
        };
        let types = iter::once(self.method.return_type())
            .chain(self.method.parameter_types().iter().map(EcoString::as_str));
        docvec![
            comment,
            "new objj_method(sel_getUid(",
            string_literal(self.method.selector()),
            ")",
            implementation,
            line(),
            argument_types(types, options),
        ]
    }
}

/// Synthesized getter returning the ivar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Getter<'a> {
    pub class: &'a str,
    pub ivar: &'a str,
    pub selector: &'a str,
    pub ivar_type: &'a str,
    pub readonly: bool,
}

impl<'a> Template<'a> for Getter<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        let comment = if options.emit_comments() {
            docvec![
                format!(
                    "// @accessors({}getter={})",
                    if self.readonly { "readonly, " } else { "" },
                    self.selector
                ),
                line(),
            ]
        } else {
            nil()
        };
        docvec![
            comment,
            accessor_function(
                self.class,
                self.selector,
                "(self, _cmd)",
                docvec!["return self.", self.ivar, ";"],
            ),
            line(),
            argument_types(iter::once(self.ivar_type), options),
        ]
    }
}

/// Synthesized setter storing `newValue`, copying it when asked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setter<'a> {
    pub class: &'a str,
    pub ivar: &'a str,
    pub selector: &'a str,
    pub ivar_type: &'a str,
    pub copy: bool,
}

impl<'a> Template<'a> for Setter<'a> {
    fn to_doc(&self, options: &CodegenOptions) -> Document<'a> {
        let comment = if options.emit_comments() {
            docvec![
                format!(
                    "// @accessors({}setter={})",
                    if self.copy { "copy, " } else { "" },
                    self.selector
                ),
                line(),
            ]
        } else {
            nil()
        };
        let body = if self.copy {
            docvec![
                "if (self.",
                self.ivar,
                " !== newValue)",
                nest(
                    INDENT,
                    docvec![
                        line(),
                        "self.",
                        self.ivar,
                        " = newValue == null ? null : newValue.isa.objj_msgSend0(newValue, \"copy\");",
                    ]
                ),
            ]
        } else {
            docvec!["self.", self.ivar, " = newValue;"]
        };
        docvec![
            comment,
            accessor_function(self.class, self.selector, "(self, _cmd, newValue)", body),
            line(),
            argument_types(["void", self.ivar_type], options),
        ]
    }
}

/// Which registration call a method list feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodListTarget {
    /// `class_addMethods` on the class (instance) or its metaclass (class).
    Class(MethodKind),
    /// `protocol_addMethodDescriptions` for required methods.
    Protocol(MethodKind),
}

/// A bracketed list of method entries passed to one registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodList<'a> {
    pub target: MethodListTarget,
    pub entries: Vec<Document<'a>>,
}

impl<'a> Template<'a> for MethodList<'a> {
    fn to_doc(&self, _options: &CodegenOptions) -> Document<'a> {
        let (head, tail) = match self.target {
            MethodListTarget::Class(MethodKind::Instance) => {
                ("class_addMethods($the_class,", docvec!["]);"])
            }
            MethodListTarget::Class(MethodKind::Class) => {
                ("class_addMethods($the_class.isa,", docvec!["]);"])
            }
            MethodListTarget::Protocol(kind) => (
                "protocol_addMethodDescriptions($the_protocol,",
                docvec![
                    "],",
                    line(),
                    if kind == MethodKind::Instance {
                        "true, true);"
                    } else {
                        "true, false);"
                    },
                ],
            ),
        };
        bracketed(
            head,
            join(self.entries.iter().cloned(), &docvec![",", blank_line()]),
            tail,
        )
    }
}

/// `class_addIvars($the_class, [new objj_ivar("name", "type"), ...]);`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IvarList<'a> {
    pub ivars: &'a [InstanceVariable],
}

impl<'a> Template<'a> for IvarList<'a> {
    fn to_doc(&self, _options: &CodegenOptions) -> Document<'a> {
        let ivars = self.ivars.iter().map(|ivar| {
            docvec![
                "new objj_ivar(",
                string_literal(&ivar.name),
                ", ",
                string_literal(ivar.ty.name()),
                ")",
            ]
        });
        bracketed(
            "class_addIvars($the_class,",
            join(ivars, &docvec![",", line()]),
            docvec!["]);"],
        )
    }
}

fn bracketed<'a>(head: &'a str, items: Document<'a>, tail: Document<'a>) -> Document<'a> {
    docvec![
        head,
        line(),
        "[",
        nest(INDENT, docvec![line(), items]),
        line(),
        tail
    ]
}

fn undefined_guard<'a>(local: &'a str, options: &CodegenOptions, message: &str) -> Document<'a> {
    docvec![
        "if (!",
        local,
        ")",
        nest(
            INDENT,
            docvec![
                line(),
                format!(
                    "throw new {}({});",
                    options.error_type(),
                    string_literal(message)
                ),
            ]
        ),
    ]
}

fn accessor_function<'a>(
    class: &'a str,
    selector: &'a str,
    parameters: &'a str,
    body: Document<'a>,
) -> Document<'a> {
    docvec![
        "new objj_method(sel_getUid(",
        string_literal(selector),
        "),",
        line(),
        "function ",
        function_name(class, selector),
        parameters,
        line(),
        "{",
        nest(INDENT, docvec![line(), body]),
        line(),
        "},",
    ]
}

fn argument_types<'t>(
    types: impl IntoIterator<Item = &'t str>,
    options: &CodegenOptions,
) -> Document<'static> {
    let list = types
        .into_iter()
        .map(string_literal)
        .collect::<Vec<_>>()
        .join(", ");
    let comment = if options.emit_comments() {
        docvec!["// argument types", line()]
    } else {
        nil()
    };
    docvec![comment, format!("[{list}])")]
}
