// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Selector and name mangling for Objective-J output.
//!
//! # DDD: Domain Service
//!
//! Knows how selectors and class names map onto JavaScript:
//!
//! - Method implementations are plain functions named `$<Class>__<selector>`
//!   with every `:` replaced by `_`
//! - Names passed to the runtime are double-quoted string literals
//!
//! ```
//! use objjc_core::codegen::objj::selector_mangler::{function_name, string_literal};
//!
//! assert_eq!(function_name("CPArray", "insertObject:atIndex:"), "$CPArray__insertObject_atIndex_");
//! assert_eq!(string_literal("count"), "\"count\"");
//! ```

/// The JavaScript function name for a method implementation.
#[must_use]
pub fn function_name(class_name: &str, selector: &str) -> String {
    format!("${class_name}__{}", selector.replace(':', "_"))
}

/// Wraps a name in double quotes, escaping as needed.
#[must_use]
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_string_chars(value))
}

/// Escapes characters that cannot appear verbatim in a double-quoted
/// JavaScript string.
#[must_use]
pub fn escape_string_chars(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result
}
