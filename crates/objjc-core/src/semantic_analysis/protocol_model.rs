// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Protocol model.
//!
//! **DDD Context:** Semantic Analysis — Entities
//!
//! A protocol's own tables hold only the requirements declared directly on
//! it. Requirements of parent protocols are reached by walking
//! `parent_protocols`, never copied in.

use super::method::{MethodKind, MethodTable};
use crate::source_analysis::Span;
use ecow::EcoString;

/// A named set of required methods, composable with other protocols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolModel {
    name: EcoString,
    span: Span,
    parent_protocols: Vec<EcoString>,
    pub(super) required_instance_methods: MethodTable,
    pub(super) required_class_methods: MethodTable,
}

impl ProtocolModel {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            parent_protocols: Vec::new(),
            required_instance_methods: MethodTable::new(),
            required_class_methods: MethodTable::new(),
        }
    }

    /// Adds a parent protocol (`@protocol Child <Parent>`).
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<EcoString>) -> Self {
        self.add_parent(parent);
        self
    }

    pub fn add_parent(&mut self, parent: impl Into<EcoString>) {
        self.parent_protocols.push(parent.into());
    }

    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Parent protocol names in declaration order.
    #[must_use]
    pub fn parent_protocols(&self) -> &[EcoString] {
        &self.parent_protocols
    }

    pub(super) fn table(&self, kind: MethodKind) -> &MethodTable {
        match kind {
            MethodKind::Instance => &self.required_instance_methods,
            MethodKind::Class => &self.required_class_methods,
        }
    }

    pub(super) fn table_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        match kind {
            MethodKind::Instance => &mut self.required_instance_methods,
            MethodKind::Class => &mut self.required_class_methods,
        }
    }
}
