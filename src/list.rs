//! The generic repetition-with-separator construction algorithm.
//!
//! Every repetition rule a grammar compiles down to (`element*`,
//! `element+`, `element (sep element)*`, left-associative binary chains)
//! runs through the single algorithm here instead of per-rule generated
//! code, so the edge cases around empty matches, trailing separators, and
//! zero-width spans behave identically across all grammars.
//!
//! ## Notes
//! - Two construction styles: [`ListStyle::Flat`] builds one list node
//!   holding every element; [`ListStyle::LeftFold`] builds the "rev-tree"
//!   shape, a left-associative chain of binary nodes
//!   `((e1, e2), e3), e4 ...` used for binary-operator chains.

use crate::session::{ParseSession, RuleOutcome};
use crate::tree::{NodeId, NodeKind, TokenSpan};

/// Shape of the node(s) a repetition rule constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// One list node holding every element in order.
    Flat,
    /// A left-associative chain of binary nodes.
    LeftFold,
}

/// Configuration of one repetition rule invocation.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Kind of the constructed list node (or of every fold node).
    pub kind: NodeKind,
    /// Token offset the repetition starts at.
    pub start: u32,
    /// Whether matching zero elements counts as a success.
    pub allow_empty: bool,
    pub style: ListStyle,
}

/// Span consumed by a repetition that started at `start` and scanned up to
/// (exclusive) `cpos`. Clamped to `[start, start]` when nothing was
/// consumed, so zero or empty-spanning elements never yield a
/// negative-length span.
fn consumed_span(start: u32, cpos: u32) -> TokenSpan {
    if cpos == start {
        TokenSpan::new(start, start)
    } else {
        TokenSpan::new(start, cpos - 1)
    }
}

impl ParseSession {
    /// Parse `element*` (or `element+` when `allow_empty` is off).
    pub fn parse_list<E>(&mut self, options: ListOptions, mut element: E) -> RuleOutcome
    where
        E: FnMut(&mut ParseSession, u32) -> RuleOutcome,
    {
        self.parse_repetition(options, &mut element, None)
    }

    /// Parse `element (separator element)*`.
    ///
    /// A separator that matches without a following element is not consumed:
    /// the rule ends after the last confirmed element.
    pub fn parse_separated_list<E, S>(
        &mut self,
        options: ListOptions,
        mut element: E,
        mut separator: S,
    ) -> RuleOutcome
    where
        E: FnMut(&mut ParseSession, u32) -> RuleOutcome,
        S: FnMut(&mut ParseSession, u32) -> RuleOutcome,
    {
        self.parse_repetition(options, &mut element, Some(&mut separator))
    }

    fn parse_repetition(
        &mut self,
        options: ListOptions,
        element: &mut dyn FnMut(&mut ParseSession, u32) -> RuleOutcome,
        mut separator: Option<&mut dyn FnMut(&mut ParseSession, u32) -> RuleOutcome>,
    ) -> RuleOutcome {
        let start = options.start;
        // `pos` is the last confirmed position: separator consumption is
        // only confirmed once the element after it matches.
        let mut pos: Option<u32> = None;
        let mut cpos = start;
        // Flat: the list node, created on first success.
        // LeftFold: the accumulator.
        let mut result: Option<NodeId> = None;

        loop {
            let RuleOutcome::Matched { node, end } = element(self, cpos) else {
                break;
            };
            let first = pos.is_none();
            pos = Some(end);
            cpos = end;

            match options.style {
                ListStyle::Flat => {
                    let list = match result {
                        Some(list) => list,
                        None => {
                            let list = self.alloc_spanless(options.kind);
                            result = Some(list);
                            list
                        }
                    };
                    self.append_child(list, node);
                }
                ListStyle::LeftFold => {
                    if first {
                        result = node;
                    } else {
                        let folded = self.create_node(
                            options.kind,
                            consumed_span(start, cpos),
                            vec![result, node],
                        );
                        result = Some(folded);
                    }
                }
            }

            if let Some(separator) = separator.as_mut() {
                match separator(self, cpos) {
                    RuleOutcome::Matched { end, .. } => cpos = end,
                    RuleOutcome::NoMatch => break,
                }
            }
        }

        match pos {
            Some(end) => {
                if options.style == ListStyle::Flat {
                    let list = result.expect("INVARIANT: a matched element implies a list node");
                    self.set_node_span(list, consumed_span(start, cpos));
                }
                RuleOutcome::Matched { node: result, end }
            }
            None if options.allow_empty => {
                // Success with no consumption: an empty list node in flat
                // style, no node at all in fold style.
                let node = match options.style {
                    ListStyle::Flat => Some(self.create_node(
                        options.kind,
                        TokenSpan::new(start, start),
                        Vec::new(),
                    )),
                    ListStyle::LeftFold => None,
                };
                RuleOutcome::Matched { node, end: start }
            }
            None => RuleOutcome::NoMatch,
        }
    }
}
