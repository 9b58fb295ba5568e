//! Context-wide symbol interning.
//!
//! Token text is stored once per spelling in a [`SymbolTable`] shared by every
//! analysis unit of a context; tokens carry [`Symbol`] ids instead of owned
//! strings.
//!
//! ## Notes
//! - Single-threaded by design: cloning a [`SymbolTable`] shares the
//!   underlying store through `Rc`, it does not copy it.
//! - Symbols are dense ids, so they are cheap to copy, compare, and hash.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// An interned string id, valid for the table that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Shared string interner.
///
/// ## Notes
/// - Interning the same text twice yields the same [`Symbol`].
/// - Entries are never removed; the table lives as long as anything sharing
///   it (the context, its units, and their parse trees).
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    inner: Rc<RefCell<Interner>>,
}

#[derive(Debug, Default)]
struct Interner {
    map: HashMap<Rc<str>, Symbol>,
    spellings: Vec<Rc<str>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning its stable id.
    pub fn intern(&self, text: &str) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        if let Some(&symbol) = inner.map.get(text) {
            return symbol;
        }
        let spelling: Rc<str> = Rc::from(text);
        let symbol = Symbol(inner.spellings.len() as u32);
        inner.spellings.push(Rc::clone(&spelling));
        inner.map.insert(spelling, symbol);
        symbol
    }

    /// Resolve a symbol back to its spelling.
    ///
    /// Returns `None` for a symbol this table did not produce.
    pub fn resolve(&self, symbol: Symbol) -> Option<Rc<str>> {
        self.inner
            .borrow()
            .spellings
            .get(symbol.0 as usize)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().spellings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
