#![forbid(unsafe_code)]
//! Runtime support library for parsers generated by the Arbor framework.
//!
//! Every generated parser, whatever its grammar, links against this crate
//! for the grammar-agnostic machinery: packrat memoization
//! ([`MemoTable`]), the arena-backed syntax-tree model ([`NodeRef`]), the
//! generic repetition/"rev-tree" construction algorithm
//! ([`ParseSession::parse_separated_list`]), and the analysis unit/context
//! lifecycle that caches, (re)parses, and tears down source files
//! ([`AnalysisContext`]).
//!
//! ## Notes
//!
//! - Single-threaded by design: sharing is `Rc`, mutation is `RefCell`,
//!   and the compiler enforces that nothing here crosses a thread.
//! - Semantic analysis, grammar syntax, and code generation live elsewhere
//!   in the framework; this crate only runs parses and owns their results.
//!
//! ## Panic Policy
//!
//! Production code propagates errors with `Result` and `?`. `unwrap` /
//! `expect` are acceptable in tests; `expect("INVARIANT: ...")` marks true
//! logic-error invariants.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::rc::Rc;
//!
//! use arbor::{AnalysisContext, Grammar, NodeId, NodeKind, ParseSession, SymbolTable, Token};
//!
//! /// A grammar that never derives anything; real ones are generated.
//! struct Nothing;
//!
//! impl Grammar for Nothing {
//!     fn tokenize(&self, _text: &str, _symbols: &SymbolTable) -> Vec<Token> {
//!         Vec::new()
//!     }
//!     fn parse(&self, _session: &mut ParseSession) -> Option<NodeId> {
//!         None
//!     }
//!     fn kind_name(&self, _kind: NodeKind) -> &'static str {
//!         "node"
//!     }
//! }
//!
//! let context = AnalysisContext::new(Rc::new(Nothing));
//! let unit = context.get_from_buffer("demo.lang", "source text");
//! assert!(unit.root().is_none());
//! ```

pub mod context;
pub mod error;
pub mod ext;
pub mod grammar;
pub mod list;
pub mod memo;
pub mod node;
pub mod session;
pub mod token;
pub mod tree;
pub mod unit;

pub use arbor_core::{Diagnostic, Sloc, SlocRange, Symbol, SymbolTable};
pub use context::AnalysisContext;
pub use error::AnalysisError;
pub use ext::ExtensionId;
pub use grammar::Grammar;
pub use list::{ListOptions, ListStyle};
pub use memo::{DEFAULT_MEMO_CAPACITY, MemoTable, Memoized};
pub use node::NodeRef;
pub use session::{ParseSession, RuleOutcome};
pub use token::{Token, TokenKind, TokenStore};
pub use tree::{NodeId, NodeKind, TokenSpan};
pub use unit::AnalysisUnit;
