//! Per-parse construction state handed to the grammar.
//!
//! A [`ParseSession`] is created by the analysis unit for one parse attempt
//! and threaded through every rule function: it gives read access to the
//! token stream and write access to the node arena and the diagnostics of
//! the attempt. When the entry rule returns, the session is sealed into the
//! unit's parse tree.

use std::rc::Rc;

use arbor_core::{Diagnostic, Sloc, SlocRange, SymbolTable};

use crate::grammar::Grammar;
use crate::token::{Token, TokenStore};
use crate::tree::{NodeArena, NodeId, NodeKind, ParseTree, TokenSpan};

/// Outcome of one grammar rule attempt.
///
/// ## Notes
/// - `node` may be `None` on a match: purely syntactic rules and empty-match
///   repetitions consume input (or nothing) without producing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule matched, leaving the scan cursor at `end`.
    Matched { node: Option<NodeId>, end: u32 },
    /// The rule did not match at the attempted offset.
    NoMatch,
}

impl RuleOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// The position after the match, or `None` for a failed attempt.
    pub fn end(&self) -> Option<u32> {
        match self {
            Self::Matched { end, .. } => Some(*end),
            Self::NoMatch => None,
        }
    }
}

/// Construction state for one parse attempt.
pub struct ParseSession {
    tokens: TokenStore,
    arena: NodeArena,
    diagnostics: Vec<Diagnostic>,
}

impl ParseSession {
    pub(crate) fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
            arena: NodeArena::default(),
            diagnostics: Vec::new(),
        }
    }

    // ========================================================================
    // Token access
    // ========================================================================

    pub fn token(&self, offset: u32) -> Option<&Token> {
        self.tokens.get(offset)
    }

    pub fn token_count(&self) -> u32 {
        self.tokens.len()
    }

    pub fn token_text(&self, offset: u32) -> Option<Rc<str>> {
        self.tokens.text(offset)
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.tokens.symbols()
    }

    /// Source range covered by the tokens of `span`.
    ///
    /// `None` when the span reaches past the stream (an empty-match span at
    /// end of input has no source extent).
    pub fn sloc_range(&self, span: TokenSpan) -> Option<SlocRange> {
        let start = self.tokens.get(span.start)?.sloc_range.start;
        let end = self.tokens.get(span.end)?.sloc_range.end;
        Some(SlocRange::new(start, end))
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Allocate a node with the given child slots, wiring each non-null
    /// child's parent edge to the new node.
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        span: TokenSpan,
        children: Vec<Option<NodeId>>,
    ) -> NodeId {
        let id = self.arena.alloc(kind, Some(span));
        for child in children {
            self.arena.push_child(id, child);
        }
        id
    }

    /// Allocate a node with no span yet; the repetition algorithm fills the
    /// span in once it knows how far the rule consumed.
    pub(crate) fn alloc_spanless(&mut self, kind: NodeKind) -> NodeId {
        self.arena.alloc(kind, None)
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.arena.push_child(parent, child);
    }

    pub(crate) fn set_node_span(&mut self, id: NodeId, span: TokenSpan) {
        self.arena.set_span(id, span);
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Queue a diagnostic on the current parse attempt.
    pub fn error(&mut self, sloc_range: SlocRange, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(sloc_range, message));
    }

    /// Queue a diagnostic anchored at the token at `offset` (clamped to the
    /// last token when the offset is past the end of the stream, and to the
    /// start of the file when there are no tokens at all).
    pub fn error_at(&mut self, offset: u32, message: impl Into<String>) {
        let range = self
            .tokens
            .get(offset)
            .or_else(|| self.tokens.get(self.tokens.len().saturating_sub(1)))
            .map(|token| token.sloc_range)
            .unwrap_or_else(|| SlocRange::new(Sloc::new(1, 1), Sloc::new(1, 1)));
        self.error(range, message);
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Test-only views into the arena, for exercising construction
    /// algorithms without a full tree.
    #[cfg(test)]
    pub(crate) fn node_data(
        &self,
        id: NodeId,
    ) -> (NodeKind, Option<TokenSpan>, Vec<Option<NodeId>>) {
        let data = self.arena.get(id);
        (data.kind, data.span, data.children.clone())
    }

    #[cfg(test)]
    pub(crate) fn node_parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).parent
    }

    pub(crate) fn finish(self, grammar: Rc<dyn Grammar>, root: Option<NodeId>) -> ParseTree {
        ParseTree {
            grammar,
            tokens: self.tokens,
            arena: self.arena.into(),
            root,
            diagnostics: self.diagnostics,
            extensions: Default::default(),
        }
    }
}
