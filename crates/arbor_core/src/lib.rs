#![forbid(unsafe_code)]
//! Provide the shared, dependency-light vocabulary for the Arbor runtime.
//!
//! This crate contains the small value types that both the runtime library and
//! generated parsers agree on: source locations, the context-wide symbol
//! interner, and the diagnostic value type.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no
//!   parser-specific types.
//! - Everything here is single-threaded by design; sharing happens through
//!   `Rc`, never through locks.
//!
//! ## See also
//! - The `arbor` crate for the runtime proper (memo tables, node arenas,
//!   analysis units and contexts).

pub mod diagnostics;
pub mod sloc;
pub mod symbols;

pub use diagnostics::Diagnostic;
pub use sloc::{Sloc, SlocRange};
pub use symbols::{Symbol, SymbolTable};
