// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic model of classes, protocols and methods.
//!
//! This module holds the in-memory model the external symbol-table builder
//! populates, and the services that read it:
//! - Method resolution through superclass chains and protocol composition
//! - Protocol conformance checking
//! - Hierarchy validation (cycles and unregistered protocols)
//!
//! The results feed the reporter (as diagnostics) and the code generator.

use crate::source_analysis::{Diagnostic, Span};
use tracing::{debug, instrument};

pub mod accessors;
mod class_model;
pub mod conformance;
pub mod error;
mod method;
pub mod method_resolver;
mod protocol_model;
mod registry;


pub use accessors::{AccessorSelectors, AccessorSpec, default_setter_selector};
pub use class_model::{CategoryModel, ClassModel, InstanceVariable};
pub use conformance::{UnimplementedMethod, class_conformance, unimplemented_methods};
pub use error::ModelError;
pub use method::{MethodKind, MethodOrigin, MethodRecord, MethodTable, TypeRecord};
pub use method_resolver::{MethodContainer, MethodView};
pub use protocol_model::ProtocolModel;
pub use registry::{Lineage, ModelRegistry};

/// Validates the registry and checks every class for protocol conformance.
///
/// Hierarchy errors (cycles and unregistered protocols) come first, in
/// registration order, followed by one warning per unimplemented
/// requirement, class by class.
#[must_use]
#[instrument(skip_all)]
pub fn analyse(registry: &ModelRegistry) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = registry
        .validate()
        .into_iter()
        .map(|error| {
            let span = model_error_span(registry, &error);
            Diagnostic::error(error.to_string(), span)
        })
        .collect();

    for class in registry.classes() {
        diagnostics.extend(
            class_conformance(registry, class)
                .iter()
                .map(|missing| missing.to_diagnostic(class)),
        );
    }

    debug!(count = diagnostics.len(), "analysis complete");
    diagnostics
}

fn model_error_span(registry: &ModelRegistry, error: &ModelError) -> Span {
    let span = match error {
        ModelError::UnknownClass { name: class }
        | ModelError::CyclicSuperclass { class }
        | ModelError::UnknownProtocol { class, .. } => registry.class(class).map(ClassModel::span),
        ModelError::CyclicProtocol { protocol }
        | ModelError::UnknownParentProtocol { protocol, .. } => {
            registry.protocol(protocol).map(ProtocolModel::span)
        }
    };
    span.unwrap_or_default()
}
