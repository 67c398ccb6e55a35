// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `@accessors` configuration and selector naming.
//!
//! An ivar declared as `CPString name @accessors(copy);` gets a getter
//! `name` and a setter `setName:`. The parser hands over the raw
//! configuration; this module derives the selectors.

use ecow::EcoString;

/// Accessor configuration attached to an instance variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessorSpec {
    /// `property=` override for the name the selectors derive from.
    pub property: Option<EcoString>,
    /// `getter=` override.
    pub getter: Option<EcoString>,
    /// `setter=` override.
    pub setter: Option<EcoString>,
    /// Setter sends `copy` to the incoming value.
    pub copy: bool,
    /// No setter is synthesized.
    pub readonly: bool,
}

impl AccessorSpec {
    /// Plain read/write accessors with derived names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_property(mut self, property: impl Into<EcoString>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub fn with_getter(mut self, getter: impl Into<EcoString>) -> Self {
        self.getter = Some(getter.into());
        self
    }

    #[must_use]
    pub fn with_setter(mut self, setter: impl Into<EcoString>) -> Self {
        self.setter = Some(setter.into());
        self
    }

    #[must_use]
    pub fn copy(mut self) -> Self {
        self.copy = true;
        self
    }

    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Resolves the getter and setter selectors for an ivar.
    #[must_use]
    pub fn selectors(&self, ivar_name: &str) -> AccessorSelectors {
        let property = self.property.as_deref().unwrap_or(ivar_name);
        let getter = self
            .getter
            .clone()
            .unwrap_or_else(|| EcoString::from(property));
        let setter = if self.readonly {
            None
        } else {
            Some(
                self.setter
                    .clone()
                    .unwrap_or_else(|| default_setter_selector(property)),
            )
        };
        AccessorSelectors { getter, setter }
    }
}

/// Selectors an ivar's accessors answer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorSelectors {
    pub getter: EcoString,
    /// `None` for readonly accessors.
    pub setter: Option<EcoString>,
}

/// `count` → `setCount:`, `_count` → `_setCount:`.
#[must_use]
pub fn default_setter_selector(property: &str) -> EcoString {
    let (prefix, rest) = match property.strip_prefix('_') {
        Some(rest) => ("_", rest),
        None => ("", property),
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => format!("{prefix}set{}{}:", first.to_uppercase(), chars.as_str()).into(),
        None => format!("{prefix}set:").into(),
    }
}
