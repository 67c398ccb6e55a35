// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Model registry error types.

use ecow::EcoString;
use thiserror::Error;

/// An error raised by a registry operation or hierarchy validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A name that should refer to a registered class does not.
    #[error("unknown class `{name}`")]
    UnknownClass { name: EcoString },

    /// A class declares conformance to a protocol that is not registered.
    #[error("class `{class}` conforms to unknown protocol `{name}`")]
    UnknownProtocol { name: EcoString, class: EcoString },

    /// A protocol inherits from a protocol that is not registered.
    #[error("protocol `{protocol}` inherits from unknown protocol `{name}`")]
    UnknownParentProtocol { name: EcoString, protocol: EcoString },

    /// Following superclasses from `class` leads back to `class`.
    #[error("superclass chain of `{class}` is cyclic")]
    CyclicSuperclass { class: EcoString },

    /// Following parent protocols from `protocol` leads back to `protocol`.
    #[error("protocol `{protocol}` inherits from itself")]
    CyclicProtocol { protocol: EcoString },
}
