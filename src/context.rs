//! The analysis context: a registry of analysis units.
//!
//! A context owns one unit per filename, the symbol table they all intern
//! into, and the grammar used to (re)parse them. Dropping the context
//! detaches every resident unit and releases the registry references;
//! units retained elsewhere live on with a cleared context back-reference.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use arbor_core::SymbolTable;

use crate::error::AnalysisError;
use crate::ext::{ExtensionId, ExtensionRegistry};
use crate::grammar::Grammar;
use crate::unit::{AnalysisUnit, read_source};

pub struct AnalysisContext {
    inner: Rc<ContextInner>,
}

pub(crate) struct ContextInner {
    grammar: Rc<dyn Grammar>,
    symbols: SymbolTable,
    units: RefCell<HashMap<String, Rc<AnalysisUnit>>>,
    extensions: RefCell<ExtensionRegistry>,
}

impl AnalysisContext {
    pub fn new(grammar: Rc<dyn Grammar>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                grammar,
                symbols: SymbolTable::new(),
                units: RefCell::new(HashMap::new()),
                extensions: RefCell::new(ExtensionRegistry::default()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<ContextInner>) -> Self {
        Self { inner }
    }

    /// Fetch (and parse) the unit for a file on disk.
    ///
    /// An absent filename is read, parsed, and registered; a resident one is
    /// returned as-is unless `reparse` is requested, in which case it is
    /// reparsed in place first.
    ///
    /// ## Errors
    /// [`AnalysisError::SourceRead`] when the file cannot be read. A brand
    /// new unit is only registered after a successful read, so a failed
    /// first fetch leaves no trace; a failed reparse leaves the resident
    /// unit's previous state untouched.
    pub fn get_from_file(
        &self,
        filename: &str,
        reparse: bool,
    ) -> Result<Rc<AnalysisUnit>, AnalysisError> {
        if let Some(unit) = self.lookup(filename) {
            if reparse {
                unit.reparse_from_file()?;
            }
            return Ok(unit);
        }
        let text = read_source(filename)?;
        Ok(self.install(filename, &text))
    }

    /// Fetch the unit for `filename`, (re)parsing it from an in-memory
    /// buffer. The registry entry is created if absent.
    pub fn get_from_buffer(&self, filename: &str, text: &str) -> Rc<AnalysisUnit> {
        if let Some(unit) = self.lookup(filename) {
            unit.reparse_from_buffer(text);
            return unit;
        }
        self.install(filename, text)
    }

    /// Drop `filename` from the registry, detaching the unit so it can
    /// outlive the context. A unit still referenced elsewhere is not
    /// destroyed, only unregistered.
    ///
    /// ## Errors
    /// [`AnalysisError::UnknownUnit`] when no unit is registered under that
    /// name; that is a caller usage error.
    pub fn remove(&self, filename: &str) -> Result<(), AnalysisError> {
        let unit = self
            .inner
            .units
            .borrow_mut()
            .remove(filename)
            .ok_or_else(|| AnalysisError::UnknownUnit(filename.to_string()))?;
        unit.detach();
        Ok(())
    }

    pub fn has_unit(&self, filename: &str) -> bool {
        self.inner.units.borrow().contains_key(filename)
    }

    pub fn unit_count(&self) -> usize {
        self.inner.units.borrow().len()
    }

    /// The context-wide symbol table shared by every unit's tokens.
    pub fn symbols(&self) -> SymbolTable {
        self.inner.symbols.clone()
    }

    /// Register (or look up) an extension id by name, for use with node
    /// extension slots.
    pub fn register_extension(&self, name: &str) -> ExtensionId {
        self.inner.extensions.borrow_mut().register(name)
    }

    fn lookup(&self, filename: &str) -> Option<Rc<AnalysisUnit>> {
        self.inner.units.borrow().get(filename).cloned()
    }

    fn install(&self, filename: &str, text: &str) -> Rc<AnalysisUnit> {
        let unit = AnalysisUnit::new(
            filename.to_string(),
            Rc::clone(&self.inner.grammar),
            self.inner.symbols.clone(),
            Rc::downgrade(&self.inner),
        );
        unit.parse_text(text);
        self.inner
            .units
            .borrow_mut()
            .insert(filename.to_string(), Rc::clone(&unit));
        tracing::debug!(filename, "registered analysis unit");
        unit
    }
}

impl Drop for ContextInner {
    fn drop(&mut self) {
        tracing::debug!(units = self.units.borrow().len(), "destroying analysis context");
        for unit in self.units.borrow().values() {
            unit.detach();
        }
    }
}
