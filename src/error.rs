//! Library errors.
//!
//! ## Notes
//! - A grammar failing to derive a root is NOT an error: the unit keeps a
//!   rootless tree plus diagnostics and the caller decides how to proceed.
//!   Errors here are about the analysis lifecycle itself.

use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by analysis contexts and units.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalysisError {
    /// The source file is missing or unreadable.
    ///
    /// When this happens during a reparse, the unit's previous tree and
    /// diagnostics are left untouched.
    #[error("cannot read '{filename}': {source}")]
    #[diagnostic(code(arbor::source_read))]
    SourceRead {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// `remove` was called for a filename with no registered unit. This is a
    /// caller usage error, not a recoverable condition.
    #[error("no analysis unit registered for '{0}'")]
    #[diagnostic(
        code(arbor::unknown_unit),
        help("register the unit with get_from_file or get_from_buffer before removing it")
    )]
    UnknownUnit(String),
}
