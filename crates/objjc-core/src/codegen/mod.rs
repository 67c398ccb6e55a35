// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code generation for objjc.
//!
//! This module contains code generators for different target formats:
//! - **`objj`**: Objective-J runtime bootstrap code (JavaScript)

pub mod objj;
