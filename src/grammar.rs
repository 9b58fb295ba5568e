//! The boundary between the grammar-agnostic runtime and generated parsers.
//!
//! The runtime owns orchestration (tokenize, run the entry rule, wire the
//! result into the analysis unit) and a [`Grammar`] implementation owns
//! everything language-specific: the lexer, the rule functions, their
//! per-parse state (including memo tables), and the node kind vocabulary.

use arbor_core::SymbolTable;

use crate::session::ParseSession;
use crate::token::Token;
use crate::tree::{NodeId, NodeKind};

/// A generated (or hand-written) parser, as the runtime sees it.
pub trait Grammar {
    /// Lex `text` into the token stream, interning token text in `symbols`.
    ///
    /// ## Notes
    /// - Lexing never fails: unrecognized input becomes grammar-defined
    ///   error tokens, which [`Grammar::parse`] turns into diagnostics.
    fn tokenize(&self, text: &str, symbols: &SymbolTable) -> Vec<Token>;

    /// Run the entry rule over the session's token stream and return the
    /// root node.
    ///
    /// ## Notes
    /// - Returning `None` with diagnostics queued on the session is an
    ///   ordinary parse failure, not an error.
    fn parse(&self, session: &mut ParseSession) -> Option<NodeId>;

    /// Human-readable name of a node kind, used by tree dumps.
    fn kind_name(&self, kind: NodeKind) -> &'static str;
}
