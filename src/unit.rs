//! One parsed source file.
//!
//! An analysis unit owns the current parse tree for one filename: its token
//! store, root node, and diagnostics. Units are created (and immediately
//! parsed) by their [`crate::context::AnalysisContext`] and shared by `Rc`:
//! the context's registry entry is one strong reference, and any number of
//! external holders may keep the unit alive after it leaves the registry.
//!
//! ## Notes
//! - Reparsing builds a complete new tree before swapping it in, so a failed
//!   reparse (unreadable file) leaves the previous root and diagnostics
//!   untouched, and node handles into the old tree keep working for as long
//!   as they are held.

use std::any::Any;
use std::cell::RefCell;
use std::fs;
use std::rc::{Rc, Weak};

use arbor_core::{Diagnostic, SymbolTable};

use crate::context::{AnalysisContext, ContextInner};
use crate::error::AnalysisError;
use crate::grammar::Grammar;
use crate::node::NodeRef;
use crate::session::ParseSession;
use crate::token::TokenStore;
use crate::tree::ParseTree;

impl std::fmt::Debug for AnalysisUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisUnit")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

pub struct AnalysisUnit {
    filename: String,
    grammar: Rc<dyn Grammar>,
    symbols: SymbolTable,
    /// Back-reference for upward navigation; cleared when the unit leaves
    /// its context (or the context dies). Never an ownership edge.
    context: RefCell<Option<Weak<ContextInner>>>,
    tree: RefCell<Option<Rc<ParseTree>>>,
    /// External objects whose destructors must run no later than unit
    /// teardown.
    destroyables: RefCell<Vec<Box<dyn Any>>>,
}

impl AnalysisUnit {
    pub(crate) fn new(
        filename: String,
        grammar: Rc<dyn Grammar>,
        symbols: SymbolTable,
        context: Weak<ContextInner>,
    ) -> Rc<Self> {
        Rc::new(Self {
            filename,
            grammar,
            symbols,
            context: RefCell::new(Some(context)),
            tree: RefCell::new(None),
            destroyables: RefCell::new(Vec::new()),
        })
    }

    /// Run one full parse over `text` and swap the resulting tree in.
    #[tracing::instrument(skip_all, fields(filename = %self.filename, source_len = text.len()))]
    pub(crate) fn parse_text(&self, text: &str) {
        let tokens = self.grammar.tokenize(text, &self.symbols);
        let store = TokenStore::new(self.symbols.clone(), tokens);
        let mut session = ParseSession::new(store);
        let root = self.grammar.parse(&mut session);
        let tree = session.finish(Rc::clone(&self.grammar), root);
        tracing::debug!(
            root = root.is_some(),
            diagnostics = tree.diagnostics.len(),
            "parse complete"
        );
        *self.tree.borrow_mut() = Some(Rc::new(tree));
    }

    /// Reparse from the unit's file on disk.
    ///
    /// ## Errors
    /// [`AnalysisError::SourceRead`] when the file is missing or unreadable;
    /// the previous tree and diagnostics are left untouched in that case.
    pub fn reparse_from_file(&self) -> Result<(), AnalysisError> {
        let text = read_source(&self.filename)?;
        self.parse_text(&text);
        Ok(())
    }

    /// Reparse from an in-memory buffer.
    pub fn reparse_from_buffer(&self, text: &str) {
        self.parse_text(text);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The root node of the current tree. `None` before the first parse or
    /// when the grammar could not derive a root (see the diagnostics).
    pub fn root(&self) -> Option<NodeRef> {
        let tree = self.tree.borrow();
        let tree = tree.as_ref()?;
        tree.root.map(|id| NodeRef::new(Rc::clone(tree), id))
    }

    /// Diagnostics of the most recent parse attempt.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.tree
            .borrow()
            .as_ref()
            .map(|tree| tree.diagnostics.clone())
            .unwrap_or_default()
    }

    /// The `index`th diagnostic, or `None` out of range.
    pub fn diagnostic(&self, index: usize) -> Option<Diagnostic> {
        self.tree
            .borrow()
            .as_ref()
            .and_then(|tree| tree.diagnostics.get(index).cloned())
    }

    pub fn diagnostic_count(&self) -> usize {
        self.tree
            .borrow()
            .as_ref()
            .map_or(0, |tree| tree.diagnostics.len())
    }

    pub fn has_diagnostics(&self) -> bool {
        self.diagnostic_count() > 0
    }

    pub fn token_count(&self) -> u32 {
        self.tree.borrow().as_ref().map_or(0, |tree| tree.tokens.len())
    }

    /// Text of the token at `offset` in the current tree.
    pub fn token_text(&self, offset: u32) -> Option<Rc<str>> {
        self.tree.borrow().as_ref()?.tokens.text(offset)
    }

    /// The owning context, or `None` once the unit has been detached (by
    /// `remove`) or the context has been destroyed.
    pub fn context(&self) -> Option<AnalysisContext> {
        self.context
            .borrow()
            .as_ref()?
            .upgrade()
            .map(AnalysisContext::from_inner)
    }

    /// Register an external object whose destructor is guaranteed to run
    /// no later than unit teardown.
    pub fn register_destroyable(&self, object: Box<dyn Any>) {
        self.destroyables.borrow_mut().push(object);
    }

    pub(crate) fn detach(&self) {
        tracing::debug!(filename = %self.filename, "detaching analysis unit");
        *self.context.borrow_mut() = None;
    }
}

impl Drop for AnalysisUnit {
    fn drop(&mut self) {
        tracing::debug!(filename = %self.filename, "destroying analysis unit");
    }
}

/// Read a source file, mapping IO failures to [`AnalysisError::SourceRead`].
pub(crate) fn read_source(filename: &str) -> Result<String, AnalysisError> {
    fs::read_to_string(filename).map_err(|source| AnalysisError::SourceRead {
        filename: filename.to_string(),
        source,
    })
}
