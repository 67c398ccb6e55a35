// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class and category models.
//!
//! **DDD Context:** Semantic Analysis — Entities
//!
//! A [`ClassModel`] is created once per `@implementation`. Its superclass
//! and protocols are stored by name and followed through the
//! [`ModelRegistry`](super::ModelRegistry). A [`CategoryModel`] carries the
//! methods of `@implementation Foo (Extras)` until it is applied to the
//! class it extends.

use super::accessors::AccessorSpec;
use super::method::{MethodKind, MethodOrigin, MethodRecord, MethodTable, TypeRecord};
use crate::source_analysis::Span;
use ecow::EcoString;
use indexmap::IndexSet;

/// An instance variable declared in a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceVariable {
    pub name: EcoString,
    pub ty: TypeRecord,
    pub accessors: Option<AccessorSpec>,
    pub span: Span,
}

impl InstanceVariable {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, ty: impl Into<TypeRecord>, span: Span) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            accessors: None,
            span,
        }
    }

    #[must_use]
    pub fn with_accessors(mut self, accessors: AccessorSpec) -> Self {
        self.accessors = Some(accessors);
        self
    }

    /// Method records the ivar's accessors synthesize, getter first.
    #[must_use]
    pub fn accessor_methods(&self) -> Vec<MethodRecord> {
        let Some(accessors) = &self.accessors else {
            return Vec::new();
        };
        let selectors = accessors.selectors(&self.name);
        let type_name = self.ty.name().clone();
        let mut methods = vec![MethodRecord::with_origin(
            selectors.getter,
            [type_name.clone()],
            self.span,
            MethodOrigin::Getter {
                ivar: self.name.clone(),
            },
        )];
        if let Some(setter) = selectors.setter {
            methods.push(MethodRecord::with_origin(
                setter,
                [EcoString::from("void"), type_name],
                self.span,
                MethodOrigin::Setter {
                    ivar: self.name.clone(),
                },
            ));
        }
        methods
    }
}

/// A class: single superclass, ivars, own methods and declared protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModel {
    name: EcoString,
    span: Span,
    superclass: Option<EcoString>,
    instance_variables: Vec<InstanceVariable>,
    pub(super) instance_methods: MethodTable,
    pub(super) class_methods: MethodTable,
    /// Methods merged in from applied categories, kept apart from the
    /// class's own declarations.
    category_instance_methods: MethodTable,
    category_class_methods: MethodTable,
    protocols: IndexSet<EcoString>,
}

impl ClassModel {
    /// Creates a root class with no members.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            superclass: None,
            instance_variables: Vec::new(),
            instance_methods: MethodTable::new(),
            class_methods: MethodTable::new(),
            category_instance_methods: MethodTable::new(),
            category_class_methods: MethodTable::new(),
            protocols: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn with_superclass(mut self, superclass: impl Into<EcoString>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Superclass name; `None` for root classes.
    #[must_use]
    pub fn superclass(&self) -> Option<&EcoString> {
        self.superclass.as_ref()
    }

    #[must_use]
    pub fn instance_variables(&self) -> &[InstanceVariable] {
        &self.instance_variables
    }

    #[must_use]
    pub fn instance_variable(&self, name: &str) -> Option<&InstanceVariable> {
        self.instance_variables.iter().find(|ivar| ivar.name == name)
    }

    /// Declared protocol names, in declaration order.
    pub fn protocols(&self) -> impl Iterator<Item = &EcoString> {
        self.protocols.iter()
    }

    /// Declares conformance to a protocol. Duplicates are ignored.
    pub fn add_protocol(&mut self, protocol: impl Into<EcoString>) {
        self.protocols.insert(protocol.into());
    }

    /// Adds an ivar and registers its synthesized accessors.
    ///
    /// A synthesized accessor never displaces a method already declared
    /// with the same selector; a method declared afterwards replaces it.
    pub fn add_instance_variable(&mut self, ivar: InstanceVariable) {
        for method in ivar.accessor_methods() {
            if !self.instance_methods.contains(method.selector()) {
                self.instance_methods.insert(method);
            }
        }
        self.instance_variables.push(ivar);
    }

    pub(super) fn table(&self, kind: MethodKind) -> &MethodTable {
        match kind {
            MethodKind::Instance => &self.instance_methods,
            MethodKind::Class => &self.class_methods,
        }
    }

    pub(super) fn table_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        match kind {
            MethodKind::Instance => &mut self.instance_methods,
            MethodKind::Class => &mut self.class_methods,
        }
    }

    /// Methods contributed by applied categories, in application order.
    ///
    /// These are registered by the category code, not the class bootstrap.
    #[must_use]
    pub fn category_methods(&self, kind: MethodKind) -> &MethodTable {
        match kind {
            MethodKind::Instance => &self.category_instance_methods,
            MethodKind::Class => &self.category_class_methods,
        }
    }

    pub(super) fn category_table_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        match kind {
            MethodKind::Instance => &mut self.category_instance_methods,
            MethodKind::Class => &mut self.category_class_methods,
        }
    }

    /// The record this class answers `selector` with, without looking at
    /// superclasses. A category method wins over the class's own.
    pub(super) fn local_method(&self, kind: MethodKind, selector: &str) -> Option<&MethodRecord> {
        self.category_methods(kind)
            .get(selector)
            .or_else(|| self.table(kind).get(selector))
    }
}

/// Methods declared in a category, waiting to be merged into their class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryModel {
    class_name: EcoString,
    name: EcoString,
    span: Span,
    instance_methods: MethodTable,
    class_methods: MethodTable,
}

impl CategoryModel {
    #[must_use]
    pub fn new(class_name: impl Into<EcoString>, name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            span,
            instance_methods: MethodTable::new(),
            class_methods: MethodTable::new(),
        }
    }

    /// The class this category extends.
    #[must_use]
    pub fn class_name(&self) -> &EcoString {
        &self.class_name
    }

    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn add_instance_method(&mut self, method: MethodRecord) -> Option<MethodRecord> {
        self.instance_methods.insert(method)
    }

    pub fn add_class_method(&mut self, method: MethodRecord) -> Option<MethodRecord> {
        self.class_methods.insert(method)
    }

    #[must_use]
    pub fn methods(&self, kind: MethodKind) -> &MethodTable {
        match kind {
            MethodKind::Instance => &self.instance_methods,
            MethodKind::Class => &self.class_methods,
        }
    }
}
