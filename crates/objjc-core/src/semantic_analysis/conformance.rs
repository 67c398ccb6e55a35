// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Protocol conformance checking.
//!
//! **DDD Context:** Semantic Analysis — Domain Service
//!
//! A class conforms to a protocol when every requirement of that protocol,
//! and of every protocol it extends, resolves somewhere in the class's
//! inheritance chain. The check walks the protocol graph, not the class
//! graph.
//!
//! A selector required by several protocols in the graph is reported once
//! per requiring protocol. Collapsing repeats is left to whoever displays
//! the results.

use super::class_model::ClassModel;
use super::method::{MethodKind, MethodRecord};
use super::method_resolver::{MethodContainer, MethodView};
use super::protocol_model::ProtocolModel;
use super::registry::ModelRegistry;
use crate::source_analysis::Diagnostic;
use tracing::{debug, instrument};

/// A protocol requirement the class does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnimplementedMethod<'a> {
    /// The requirement as declared on `protocol`.
    pub method: &'a MethodRecord,
    /// The protocol that declares the requirement.
    pub protocol: &'a ProtocolModel,
    pub kind: MethodKind,
}

impl UnimplementedMethod<'_> {
    /// Renders the finding as a warning located at the class declaration.
    #[must_use]
    pub fn to_diagnostic(&self, class: &ClassModel) -> Diagnostic {
        Diagnostic::warning(
            format!(
                "method `{}{}` in protocol `{}` is not implemented",
                self.kind.sign(),
                self.method.selector(),
                self.protocol.name()
            ),
            class.span(),
        )
        .with_hint(format!(
            "`{}` declares conformance to `{}`",
            class.name(),
            self.protocol.name()
        ))
    }
}

/// Requirements of `protocol` (and its parents) that `class` leaves
/// unimplemented.
///
/// For each protocol visited, instance requirements come before class
/// requirements, each in declaration order; parent protocols follow in
/// declaration order. An empty result means full conformance.
#[must_use]
pub fn unimplemented_methods<'a>(
    registry: &'a ModelRegistry,
    class: &'a ClassModel,
    protocol: &'a ProtocolModel,
) -> Vec<UnimplementedMethod<'a>> {
    let implemented = ImplementedMethods {
        instance: class.get_instance_methods(registry),
        class: class.get_class_methods(registry),
    };
    let mut missing = Vec::new();
    let mut path = Vec::new();
    collect_missing(registry, &implemented, protocol, &mut path, &mut missing);
    missing
}

/// Unimplemented requirements across every protocol `class` declares,
/// in declaration order. Unregistered protocol names are skipped.
#[must_use]
#[instrument(skip_all, fields(class = %class.name()))]
pub fn class_conformance<'a>(
    registry: &'a ModelRegistry,
    class: &'a ClassModel,
) -> Vec<UnimplementedMethod<'a>> {
    let missing: Vec<_> = class
        .protocols()
        .filter_map(|name| {
            let protocol = registry.protocol(name);
            if protocol.is_none() {
                debug!(protocol = %name, "declared protocol is not registered");
            }
            protocol
        })
        .flat_map(|protocol| unimplemented_methods(registry, class, protocol))
        .collect();
    debug!(count = missing.len(), "conformance checked");
    missing
}

struct ImplementedMethods<'a> {
    instance: MethodView<'a>,
    class: MethodView<'a>,
}

impl ImplementedMethods<'_> {
    fn contains(&self, kind: MethodKind, selector: &str) -> bool {
        match kind {
            MethodKind::Instance => self.instance.contains_key(selector),
            MethodKind::Class => self.class.contains_key(selector),
        }
    }
}

/// `path` holds the protocols on the current branch only, so a cycle stops
/// while a protocol reached along two branches is checked on both.
fn collect_missing<'a>(
    registry: &'a ModelRegistry,
    implemented: &ImplementedMethods<'_>,
    protocol: &'a ProtocolModel,
    path: &mut Vec<&'a str>,
    missing: &mut Vec<UnimplementedMethod<'a>>,
) {
    let name = protocol.name().as_str();
    if path.contains(&name) {
        return;
    }
    for kind in MethodKind::ALL {
        for method in protocol.own_methods(kind) {
            if !implemented.contains(kind, method.selector()) {
                missing.push(UnimplementedMethod {
                    method,
                    protocol,
                    kind,
                });
            }
        }
    }
    path.push(name);
    for parent in protocol
        .parent_protocols()
        .iter()
        .filter_map(|parent| registry.protocol(parent))
    {
        collect_missing(registry, implemented, parent, path, missing);
    }
    path.pop();
}
