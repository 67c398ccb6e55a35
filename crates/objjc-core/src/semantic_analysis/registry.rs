// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The per-compilation-unit registry of class and protocol models.
//!
//! **DDD Context:** Semantic Analysis — Aggregate Root
//!
//! The external symbol-table builder fills the registry; everything else in
//! this crate borrows it. Superclass and protocol references are stored by
//! name and resolved here. A name with no registered model ends the walk,
//! the same as a root class.
//!
//! Cycles are assumed to be rejected upstream. Every traversal still tracks
//! visited names so a cyclic graph terminates instead of overflowing, and
//! [`ModelRegistry::validate`] reports the cycles it finds.

use super::class_model::{CategoryModel, ClassModel};
use super::error::ModelError;
use super::method::MethodKind;
use super::protocol_model::ProtocolModel;
use ecow::EcoString;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Class and protocol models of one compilation unit, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelRegistry {
    classes: IndexMap<EcoString, ClassModel>,
    protocols: IndexMap<EcoString, ProtocolModel>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class, returning any previous model with the same name.
    pub fn add_class(&mut self, class: ClassModel) -> Option<ClassModel> {
        trace!(class = %class.name(), "registering class");
        self.classes.insert(class.name().clone(), class)
    }

    /// Registers a protocol, returning any previous model with the same name.
    pub fn add_protocol(&mut self, protocol: ProtocolModel) -> Option<ProtocolModel> {
        trace!(protocol = %protocol.name(), "registering protocol");
        self.protocols.insert(protocol.name().clone(), protocol)
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassModel> {
        self.classes.get(name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut ClassModel> {
        self.classes.get_mut(name)
    }

    #[must_use]
    pub fn protocol(&self, name: &str) -> Option<&ProtocolModel> {
        self.protocols.get(name)
    }

    /// Classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values()
    }

    /// Protocols in registration order.
    pub fn protocols(&self) -> impl Iterator<Item = &ProtocolModel> {
        self.protocols.values()
    }

    /// The registered superclass of `class`, if any.
    #[must_use]
    pub fn superclass_of(&self, class: &ClassModel) -> Option<&ClassModel> {
        class.superclass().and_then(|name| self.class(name))
    }

    /// Iterates `class` followed by each registered ancestor.
    ///
    /// Stops at a root class, at an unregistered superclass name, or when a
    /// class would be visited twice.
    #[must_use]
    pub fn lineage<'a>(&'a self, class: &'a ClassModel) -> Lineage<'a> {
        Lineage {
            registry: self,
            next: Some(class),
            visited: HashSet::new(),
        }
    }

    /// Merges a category's methods into the class it extends.
    ///
    /// The methods are kept apart from the class's own declarations: lookup
    /// prefers them over same-selector methods of the class, while the
    /// class bootstrap still emits only what the class itself declares.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownClass`] if the class is not registered.
    pub fn apply_category(&mut self, category: &CategoryModel) -> Result<(), ModelError> {
        let class =
            self.classes
                .get_mut(category.class_name().as_str())
                .ok_or_else(|| ModelError::UnknownClass {
                    name: category.class_name().clone(),
                })?;
        for kind in MethodKind::ALL {
            for method in category.methods(kind) {
                class.category_table_mut(kind).insert(method.clone());
            }
        }
        debug!(
            class = %category.class_name(),
            category = %category.name(),
            "applied category"
        );
        Ok(())
    }

    /// Reports hierarchy cycles and references to unregistered protocols.
    ///
    /// Classes come first, then protocols, each in registration order. A
    /// class or protocol on a cycle yields one error; names that merely
    /// lead into a cycle are not reported. Each unregistered protocol a
    /// class declares, or a protocol inherits from, yields one error after
    /// the owner's cycle error.
    #[must_use]
    pub fn validate(&self) -> Vec<ModelError> {
        let mut errors = Vec::new();
        for class in self.classes.values() {
            if self.superclass_cycle_returns_to(class) {
                errors.push(ModelError::CyclicSuperclass {
                    class: class.name().clone(),
                });
            }
            errors.extend(
                class
                    .protocols()
                    .filter(|name| self.protocol(name).is_none())
                    .map(|name| ModelError::UnknownProtocol {
                        name: name.clone(),
                        class: class.name().clone(),
                    }),
            );
        }
        for protocol in self.protocols.values() {
            if self.protocol_reaches_itself(protocol) {
                errors.push(ModelError::CyclicProtocol {
                    protocol: protocol.name().clone(),
                });
            }
            errors.extend(
                protocol
                    .parent_protocols()
                    .iter()
                    .filter(|name| self.protocol(name).is_none())
                    .map(|name| ModelError::UnknownParentProtocol {
                        name: name.clone(),
                        protocol: protocol.name().clone(),
                    }),
            );
        }
        errors
    }

    fn superclass_cycle_returns_to(&self, start: &ClassModel) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = start.superclass();
        while let Some(name) = current {
            if name == start.name() {
                return true;
            }
            if !visited.insert(name.as_str()) {
                return false;
            }
            current = self.class(name).and_then(ClassModel::superclass);
        }
        false
    }

    fn protocol_reaches_itself(&self, start: &ProtocolModel) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&EcoString> = start.parent_protocols().iter().collect();
        while let Some(name) = pending.pop() {
            if name == start.name() {
                return true;
            }
            if !visited.insert(name.as_str()) {
                continue;
            }
            if let Some(parent) = self.protocol(name) {
                pending.extend(parent.parent_protocols());
            }
        }
        false
    }
}

/// Iterator over a class and its ancestors. See [`ModelRegistry::lineage`].
#[derive(Debug)]
pub struct Lineage<'a> {
    registry: &'a ModelRegistry,
    next: Option<&'a ClassModel>,
    visited: HashSet<&'a str>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a ClassModel;

    fn next(&mut self) -> Option<Self::Item> {
        let class = self.next.take()?;
        if !self.visited.insert(class.name().as_str()) {
            debug!(class = %class.name(), "cycle in superclass chain");
            return None;
        }
        self.next = self.registry.superclass_of(class);
        Some(class)
    }
}
