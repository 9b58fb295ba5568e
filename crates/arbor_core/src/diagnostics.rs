//! The diagnostic value type accumulated during a parse.
//!
//! ## Notes
//! - Diagnostics are plain data: the runtime never uses them for control
//!   flow, and a parse that emits diagnostics is not an error.
//! - Pretty rendering with source context is an embedder concern; `Display`
//!   here is the terse `line:col-line:col: message` form.

use std::fmt;

use crate::sloc::SlocRange;

/// A message anchored to a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub sloc_range: SlocRange,
    pub message: String,
}

impl Diagnostic {
    pub fn new(sloc_range: SlocRange, message: impl Into<String>) -> Self {
        Self {
            sloc_range,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sloc_range, self.message)
    }
}
