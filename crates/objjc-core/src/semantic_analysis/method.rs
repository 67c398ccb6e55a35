// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method records and the ordered tables that hold them.
//!
//! **DDD Context:** Semantic Analysis — Value Objects

use crate::source_analysis::Span;
use ecow::EcoString;
use indexmap::IndexMap;
use std::fmt;

/// Which side of a class or protocol a method lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// `- (id)foo`, sent to instances.
    Instance,
    /// `+ (id)foo`, sent to the class object.
    Class,
}

impl MethodKind {
    /// Both kinds, instance side first.
    pub const ALL: [MethodKind; 2] = [MethodKind::Instance, MethodKind::Class];

    /// The Objective-C declaration prefix (`-` or `+`).
    #[must_use]
    pub fn sign(self) -> &'static str {
        match self {
            MethodKind::Instance => "-",
            MethodKind::Class => "+",
        }
    }
}

/// Where a method record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodOrigin {
    /// Written out in source.
    Declared,
    /// Getter synthesized from `@accessors` on the named ivar.
    Getter { ivar: EcoString },
    /// Setter synthesized from `@accessors` on the named ivar.
    Setter { ivar: EcoString },
}

/// A named type referenced by the model but never resolved further.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRecord {
    name: EcoString,
}

impl TypeRecord {
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }
}

impl From<&str> for TypeRecord {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TypeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Immutable descriptor of one selector on one owner.
///
/// `types` holds the return type first, followed by one entry per
/// parameter. An override in a subclass is its own record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    selector: EcoString,
    types: Vec<EcoString>,
    span: Span,
    origin: MethodOrigin,
}

impl MethodRecord {
    /// Creates a record for a method written out in source.
    pub fn new<T>(selector: impl Into<EcoString>, types: T, span: Span) -> Self
    where
        T: IntoIterator,
        T::Item: Into<EcoString>,
    {
        Self::with_origin(selector, types, span, MethodOrigin::Declared)
    }

    /// Creates a record with an explicit origin.
    pub fn with_origin<T>(
        selector: impl Into<EcoString>,
        types: T,
        span: Span,
        origin: MethodOrigin,
    ) -> Self
    where
        T: IntoIterator,
        T::Item: Into<EcoString>,
    {
        Self {
            selector: selector.into(),
            types: types.into_iter().map(Into::into).collect(),
            span,
            origin,
        }
    }

    #[must_use]
    pub fn selector(&self) -> &EcoString {
        &self.selector
    }

    /// Return type followed by parameter types.
    #[must_use]
    pub fn types(&self) -> &[EcoString] {
        &self.types
    }

    /// The declared return type, `id` when none was recorded.
    #[must_use]
    pub fn return_type(&self) -> &str {
        self.types.first().map_or("id", EcoString::as_str)
    }

    #[must_use]
    pub fn parameter_types(&self) -> &[EcoString] {
        self.types.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn origin(&self) -> &MethodOrigin {
        &self.origin
    }

    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        !matches!(self.origin, MethodOrigin::Declared)
    }
}

/// Selector-keyed method table preserving declaration order.
///
/// Re-inserting a selector replaces the record but keeps the slot of the
/// first declaration, so iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodTable {
    entries: IndexMap<EcoString, MethodRecord>,
}

impl MethodTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced.
    pub fn insert(&mut self, method: MethodRecord) -> Option<MethodRecord> {
        self.entries.insert(method.selector.clone(), method)
    }

    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&MethodRecord> {
        self.entries.get(selector)
    }

    #[must_use]
    pub fn contains(&self, selector: &str) -> bool {
        self.entries.contains_key(selector)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodRecord> {
        self.entries.values()
    }

    pub fn selectors(&self) -> impl Iterator<Item = &EcoString> {
        self.entries.keys()
    }
}

impl<'a> IntoIterator for &'a MethodTable {
    type Item = &'a MethodRecord;
    type IntoIter = indexmap::map::Values<'a, EcoString, MethodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl FromIterator<MethodRecord> for MethodTable {
    fn from_iter<I: IntoIterator<Item = MethodRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for method in iter {
            table.insert(method);
        }
        table
    }
}
