// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Objective-J compiler core.
//!
//! This crate contains the part of the compiler that sits between the
//! symbol-table builder and the emitted JavaScript:
//! - Source locations and diagnostics
//! - Semantic analysis (class and protocol models, method resolution,
//!   protocol conformance)
//! - Code generation (runtime bootstrap for classes, categories and protocols)
//! - Reporting (diagnostic output and the closing tally)
//!
//! Lexing and parsing are not part of this crate; the models are filled in by
//! whoever walks the syntax tree.

pub mod codegen;
pub mod reporting;
pub mod semantic_analysis;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::codegen::objj::{CodeGenError, CodegenOptions, MethodBodies};
    pub use crate::reporting::{Reporter, SilentReporter, StandardReporter};
    pub use crate::semantic_analysis::{
        AccessorSpec, CategoryModel, ClassModel, InstanceVariable, MethodContainer, MethodKind,
        MethodRecord, ModelRegistry, ProtocolModel,
    };
    pub use crate::source_analysis::{Diagnostic, Severity, Span};
}
