// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method-table entries for synthesized accessors.
//!
//! **DDD Context:** Compilation — Code Generation
//!
//! A synthesized record only carries its selector, types and the ivar it
//! came from. The `readonly` and `copy` flags are read back from the ivar's
//! accessor configuration on the owning class.

use super::document::Document;
use super::templates::{Getter, Setter, Template};
use super::{CodeGenError, ObjjGenerator, Result};
use crate::semantic_analysis::{ClassModel, InstanceVariable, MethodRecord};
use ecow::EcoString;

impl<'a> ObjjGenerator<'a> {
    /// `owner` is the function-name prefix; `class` declares the ivar.
    pub(super) fn getter_entry(
        &self,
        owner: &'a str,
        class: Option<&'a ClassModel>,
        method: &'a MethodRecord,
        ivar: &str,
    ) -> Result<Document<'a>> {
        let ivar = find_ivar(owner, class, method, ivar)?;
        Ok(Getter {
            class: owner,
            ivar: &ivar.name,
            selector: method.selector(),
            ivar_type: method.return_type(),
            readonly: ivar.accessors.as_ref().is_some_and(|spec| spec.readonly),
        }
        .to_doc(self.options))
    }

    pub(super) fn setter_entry(
        &self,
        owner: &'a str,
        class: Option<&'a ClassModel>,
        method: &'a MethodRecord,
        ivar: &str,
    ) -> Result<Document<'a>> {
        let ivar = find_ivar(owner, class, method, ivar)?;
        Ok(Setter {
            class: owner,
            ivar: &ivar.name,
            selector: method.selector(),
            ivar_type: method
                .parameter_types()
                .first()
                .map_or("id", EcoString::as_str),
            copy: ivar.accessors.as_ref().is_some_and(|spec| spec.copy),
        }
        .to_doc(self.options))
    }
}

fn find_ivar<'a>(
    owner: &str,
    class: Option<&'a ClassModel>,
    method: &MethodRecord,
    ivar: &str,
) -> Result<&'a InstanceVariable> {
    class
        .and_then(|class| class.instance_variable(ivar))
        .ok_or_else(|| CodeGenError::UnknownInstanceVariable {
            class: owner.into(),
            selector: method.selector().clone(),
            ivar: ivar.into(),
        })
}
