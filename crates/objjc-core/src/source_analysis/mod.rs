// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source locations and diagnostics.
//!
//! **DDD Context:** Source Analysis
//!
//! Lexing and parsing live outside this crate. What remains here is the
//! vocabulary shared with the parser: [`Span`] for locations and
//! [`Diagnostic`] for the issues the semantic core reports back.

mod diagnostic;
mod span;

pub use diagnostic::{Diagnostic, Severity};
pub use span::Span;
