// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Selector lookup over classes and protocols.
//!
//! **DDD Context:** Semantic Analysis — Domain Service
//!
//! [`MethodContainer`] is the shared surface of [`ClassModel`] and
//! [`ProtocolModel`]. Both keep per-kind own tables; they differ in how a
//! miss is resolved:
//!
//! - a class defers to its single superclass, so a subclass method always
//!   shadows an inherited one;
//! - a protocol tries each parent protocol in declaration order and takes
//!   the first hit.
//!
//! The merged view ([`MethodContainer::get_methods`]) inserts inherited
//! entries first and own entries afterwards, so an own entry replaces an
//! inherited one with the same selector.

use super::class_model::ClassModel;
use super::method::{MethodKind, MethodRecord, MethodTable};
use super::protocol_model::ProtocolModel;
use super::registry::ModelRegistry;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::trace;

/// Every selector visible from a model, mapped to the record that wins.
pub type MethodView<'a> = IndexMap<&'a str, &'a MethodRecord>;

/// Method storage and lookup shared by classes and protocols.
pub trait MethodContainer {
    /// Own methods of one kind, in declaration order.
    fn own_methods(&self, kind: MethodKind) -> &MethodTable;

    /// Mutable access to the own methods of one kind.
    fn own_methods_mut(&mut self, kind: MethodKind) -> &mut MethodTable;

    /// Resolves a selector through inheritance or composition.
    fn get_method<'a>(
        &'a self,
        registry: &'a ModelRegistry,
        selector: &str,
        kind: MethodKind,
    ) -> Option<&'a MethodRecord>;

    /// All visible methods of one kind; own entries override inherited ones.
    fn get_methods<'a>(&'a self, registry: &'a ModelRegistry, kind: MethodKind) -> MethodView<'a>;

    /// Adds a method of the given kind. A later record for the same
    /// selector replaces the earlier one, which is returned.
    fn add_method(&mut self, kind: MethodKind, method: MethodRecord) -> Option<MethodRecord> {
        self.own_methods_mut(kind).insert(method)
    }

    fn add_instance_method(&mut self, method: MethodRecord) -> Option<MethodRecord> {
        self.add_method(MethodKind::Instance, method)
    }

    fn add_class_method(&mut self, method: MethodRecord) -> Option<MethodRecord> {
        self.add_method(MethodKind::Class, method)
    }

    /// The directly declared record, ignoring inheritance.
    fn get_own_method(&self, selector: &str, kind: MethodKind) -> Option<&MethodRecord> {
        self.own_methods(kind).get(selector)
    }

    fn get_own_instance_method(&self, selector: &str) -> Option<&MethodRecord> {
        self.get_own_method(selector, MethodKind::Instance)
    }

    fn get_own_class_method(&self, selector: &str) -> Option<&MethodRecord> {
        self.get_own_method(selector, MethodKind::Class)
    }

    fn get_instance_method<'a>(
        &'a self,
        registry: &'a ModelRegistry,
        selector: &str,
    ) -> Option<&'a MethodRecord> {
        self.get_method(registry, selector, MethodKind::Instance)
    }

    fn get_class_method<'a>(
        &'a self,
        registry: &'a ModelRegistry,
        selector: &str,
    ) -> Option<&'a MethodRecord> {
        self.get_method(registry, selector, MethodKind::Class)
    }

    fn get_instance_methods<'a>(&'a self, registry: &'a ModelRegistry) -> MethodView<'a> {
        self.get_methods(registry, MethodKind::Instance)
    }

    fn get_class_methods<'a>(&'a self, registry: &'a ModelRegistry) -> MethodView<'a> {
        self.get_methods(registry, MethodKind::Class)
    }
}

impl MethodContainer for ClassModel {
    fn own_methods(&self, kind: MethodKind) -> &MethodTable {
        self.table(kind)
    }

    fn own_methods_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        self.table_mut(kind)
    }

    fn get_method<'a>(
        &'a self,
        registry: &'a ModelRegistry,
        selector: &str,
        kind: MethodKind,
    ) -> Option<&'a MethodRecord> {
        registry
            .lineage(self)
            .find_map(|class| class.local_method(kind, selector))
    }

    fn get_methods<'a>(&'a self, registry: &'a ModelRegistry, kind: MethodKind) -> MethodView<'a> {
        let lineage: Vec<&ClassModel> = registry.lineage(self).collect();
        let mut view = MethodView::new();
        // Root first so each subclass overwrites what it overrides; a
        // class's category methods overwrite its own declarations.
        for class in lineage.into_iter().rev() {
            for method in class.table(kind).iter().chain(class.category_methods(kind)) {
                view.insert(method.selector().as_str(), method);
            }
        }
        view
    }
}

impl MethodContainer for ProtocolModel {
    fn own_methods(&self, kind: MethodKind) -> &MethodTable {
        self.table(kind)
    }

    fn own_methods_mut(&mut self, kind: MethodKind) -> &mut MethodTable {
        self.table_mut(kind)
    }

    fn get_method<'a>(
        &'a self,
        registry: &'a ModelRegistry,
        selector: &str,
        kind: MethodKind,
    ) -> Option<&'a MethodRecord> {
        find_requirement(registry, self, selector, kind, &mut HashSet::new())
    }

    fn get_methods<'a>(&'a self, registry: &'a ModelRegistry, kind: MethodKind) -> MethodView<'a> {
        collect_requirements(registry, self, kind, &mut HashSet::new())
    }
}

fn find_requirement<'a>(
    registry: &'a ModelRegistry,
    protocol: &'a ProtocolModel,
    selector: &str,
    kind: MethodKind,
    visited: &mut HashSet<&'a str>,
) -> Option<&'a MethodRecord> {
    if !visited.insert(protocol.name().as_str()) {
        trace!(protocol = %protocol.name(), "protocol already searched");
        return None;
    }
    if let Some(method) = protocol.table(kind).get(selector) {
        return Some(method);
    }
    protocol
        .parent_protocols()
        .iter()
        .filter_map(|name| registry.protocol(name))
        .find_map(|parent| find_requirement(registry, parent, selector, kind, visited))
}

fn collect_requirements<'a>(
    registry: &'a ModelRegistry,
    protocol: &'a ProtocolModel,
    kind: MethodKind,
    visited: &mut HashSet<&'a str>,
) -> MethodView<'a> {
    let mut view = MethodView::new();
    if !visited.insert(protocol.name().as_str()) {
        return view;
    }
    for parent in protocol
        .parent_protocols()
        .iter()
        .filter_map(|name| registry.protocol(name))
    {
        // Earlier parents win, matching `find_requirement`.
        for (selector, method) in collect_requirements(registry, parent, kind, visited) {
            view.entry(selector).or_insert(method);
        }
    }
    for method in protocol.table(kind) {
        view.insert(method.selector().as_str(), method);
    }
    view
}
