// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class and category assembly.
//!
//! **DDD Context:** Compilation — Code Generation
//!
//! A class is emitted as: allocation, protocol conformances, ivars,
//! registration, instance methods, class methods. Registration must come
//! after the ivars and before any methods, which the runtime adds to an
//! already registered class pair.

use super::templates::{
    CategoryDeclaration, ClassDeclaration, Implementation, IvarList, MethodEntry, MethodList,
    MethodListTarget, ProtocolReference, ReferenceOwner, Template,
};
use super::document::Document;
use super::selector_mangler::function_name;
use super::{MethodBodies, ObjjGenerator, Result};
use crate::docvec;
use crate::semantic_analysis::{
    CategoryModel, ClassModel, MethodContainer, MethodKind, MethodOrigin, MethodRecord,
    MethodTable,
};
use ecow::EcoString;
use tracing::trace;

impl<'a> ObjjGenerator<'a> {
    pub(super) fn class_doc(&self, class: &'a ClassModel) -> Result<Document<'a>> {
        let title = match class.superclass() {
            Some(superclass) => format!("@implementation {} : {superclass}", class.name()),
            None => format!("@implementation {}", class.name()),
        };

        let mut blocks = vec![docvec![
            self.opening_comment(&title),
            ClassDeclaration {
                class: class.name(),
                superclass: class.superclass().map(EcoString::as_str),
            }
            .to_doc(self.options),
        ]];
        blocks.extend(class.protocols().enumerate().map(|(index, protocol)| {
            ProtocolReference {
                owner: ReferenceOwner::Class,
                protocol,
                declares_local: index == 0,
            }
            .to_doc(self.options)
        }));
        if !class.instance_variables().is_empty() {
            blocks.push(
                IvarList {
                    ivars: class.instance_variables(),
                }
                .to_doc(self.options),
            );
        }
        blocks.push(docvec!["objj_registerClassPair($the_class);"]);
        for kind in MethodKind::ALL {
            if let Some(list) = self.method_list(
                class.name(),
                class.name(),
                Some(class),
                class.own_methods(kind),
                kind,
            )? {
                blocks.push(list);
            }
        }

        Ok(self.assemble(blocks, &title))
    }

    pub(super) fn category_doc(&self, category: &'a CategoryModel) -> Result<Document<'a>> {
        let title = format!(
            "@implementation {} ({})",
            category.class_name(),
            category.name()
        );
        let class = self.registry.class(category.class_name());
        let body_owner = MethodBodies::category_owner(category.class_name(), category.name());

        let mut blocks = vec![docvec![
            self.opening_comment(&title),
            CategoryDeclaration {
                class: category.class_name(),
            }
            .to_doc(self.options),
        ]];
        for kind in MethodKind::ALL {
            if let Some(list) = self.method_list(
                category.class_name(),
                &body_owner,
                class,
                category.methods(kind),
                kind,
            )? {
                blocks.push(list);
            }
        }

        Ok(self.assemble(blocks, &title))
    }

    /// One `class_addMethods` call for a table, or `None` if it is empty.
    ///
    /// `owner` prefixes function names and `body_owner` keys the supplied
    /// bodies; `class` supplies the ivars that synthesized accessors read
    /// and write.
    fn method_list(
        &self,
        owner: &'a str,
        body_owner: &str,
        class: Option<&'a ClassModel>,
        table: &'a MethodTable,
        kind: MethodKind,
    ) -> Result<Option<Document<'a>>> {
        if table.is_empty() {
            return Ok(None);
        }
        let entries = table
            .iter()
            .map(|method| match method.origin() {
                MethodOrigin::Declared => Ok(self.method_entry(owner, body_owner, method, kind)),
                MethodOrigin::Getter { ivar } => self.getter_entry(owner, class, method, ivar),
                MethodOrigin::Setter { ivar } => self.setter_entry(owner, class, method, ivar),
            })
            .collect::<Result<Vec<_>>>()?;
        trace!(owner, ?kind, count = entries.len(), "method list");
        Ok(Some(
            MethodList {
                target: MethodListTarget::Class(kind),
                entries,
            }
            .to_doc(self.options),
        ))
    }

    fn method_entry(
        &self,
        owner: &str,
        body_owner: &str,
        method: &'a MethodRecord,
        kind: MethodKind,
    ) -> Document<'a> {
        let implementation = match self.bodies.get(body_owner, kind, method.selector()) {
            Some(body) => Implementation::Function(body),
            None => Implementation::Reference(function_name(owner, method.selector())),
        };
        MethodEntry {
            kind,
            method,
            implementation,
        }
        .to_doc(self.options)
    }
}
