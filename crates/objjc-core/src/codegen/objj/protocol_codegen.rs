// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Protocol assembly.
//!
//! **DDD Context:** Compilation — Code Generation
//!
//! Parent protocols are composed in before `objj_registerProtocol`, and the
//! required methods are added as descriptions afterwards. Only the
//! protocol's own requirements are described; the runtime reaches the
//! parents' through composition.

use super::ObjjGenerator;
use super::document::Document;
use super::templates::{
    Implementation, MethodEntry, MethodList, MethodListTarget, ProtocolDeclaration, Template,
};
use crate::docvec;
use crate::semantic_analysis::{MethodContainer, MethodKind, ProtocolModel};
use tracing::trace;

impl<'a> ObjjGenerator<'a> {
    pub(super) fn protocol_doc(&self, protocol: &'a ProtocolModel) -> Document<'a> {
        let title = if protocol.parent_protocols().is_empty() {
            format!("@protocol {}", protocol.name())
        } else {
            format!(
                "@protocol {} <{}>",
                protocol.name(),
                protocol.parent_protocols().join(", ")
            )
        };

        let mut blocks = vec![docvec![
            self.opening_comment(&title),
            ProtocolDeclaration {
                protocol: protocol.name(),
                parents: protocol.parent_protocols(),
            }
            .to_doc(self.options),
        ]];
        for kind in MethodKind::ALL {
            let table = protocol.own_methods(kind);
            if table.is_empty() {
                continue;
            }
            let entries = table
                .iter()
                .map(|method| {
                    MethodEntry {
                        kind,
                        method,
                        implementation: Implementation::Null,
                    }
                    .to_doc(self.options)
                })
                .collect();
            trace!(protocol = %protocol.name(), ?kind, "method descriptions");
            blocks.push(
                MethodList {
                    target: MethodListTarget::Protocol(kind),
                    entries,
                }
                .to_doc(self.options),
            );
        }

        self.assemble(blocks, &title)
    }
}
