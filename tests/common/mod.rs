//! A miniature hand-written grammar driving the runtime the way generated
//! parsers do.
//!
//! The language is "rosters": comma-separated items, where an item is either
//! an inclusive range (`lo..hi`) or a left-folded sum (`a + b + c`). Small as
//! it is, it exercises every runtime surface: tokenization into the shared
//! symbol table, packrat memoization with rule alternation (`range` and `sum`
//! both start with an identifier), both repetition styles, diagnostics, and
//! partial parses.

use std::cell::Cell;

use arbor::{
    Grammar, ListOptions, ListStyle, MemoTable, Memoized, NodeId, NodeKind, ParseSession,
    RuleOutcome, Sloc, SlocRange, SymbolTable, Token, TokenKind, TokenSpan,
};

pub const TOK_IDENT: TokenKind = TokenKind(1);
pub const TOK_COMMA: TokenKind = TokenKind(2);
pub const TOK_PLUS: TokenKind = TokenKind(3);
pub const TOK_DOTDOT: TokenKind = TokenKind(4);
pub const TOK_ERROR: TokenKind = TokenKind(99);

pub const KIND_IDENT: NodeKind = NodeKind(1);
pub const KIND_SUM: NodeKind = NodeKind(2);
pub const KIND_RANGE: NodeKind = NodeKind(3);
pub const KIND_ROSTER: NodeKind = NodeKind(4);

/// `roster := item (',' item)*`; `item := range | sum`;
/// `range := ident '..' ident`; `sum := ident ('+' ident)*`.
#[derive(Default)]
pub struct RosterGrammar {
    /// How many times the `ident` rule actually derived (memo misses); the
    /// alternation in `item` re-consults `ident` at the same offset, so this
    /// stays equal to the number of distinct offsets probed.
    pub ident_derivations: Cell<usize>,
}

struct Rules<'g> {
    grammar: &'g RosterGrammar,
    ident_memo: MemoTable<Option<NodeId>>,
}

impl Rules<'_> {
    fn ident(&mut self, session: &mut ParseSession, pos: u32) -> RuleOutcome {
        if let Some(hit) = self.ident_memo.get(pos) {
            return match *hit {
                Memoized::Success {
                    instance,
                    final_pos,
                } => RuleOutcome::Matched {
                    node: instance,
                    end: final_pos,
                },
                Memoized::Failure => RuleOutcome::NoMatch,
            };
        }
        self.grammar
            .ident_derivations
            .set(self.grammar.ident_derivations.get() + 1);
        let outcome = match session.token(pos) {
            Some(token) if token.kind == TOK_IDENT => {
                let node =
                    session.create_node(KIND_IDENT, TokenSpan::new(pos, pos), Vec::new());
                RuleOutcome::Matched {
                    node: Some(node),
                    end: pos + 1,
                }
            }
            _ => RuleOutcome::NoMatch,
        };
        match outcome {
            RuleOutcome::Matched { node, end } => self.ident_memo.set(
                pos,
                Memoized::Success {
                    instance: node,
                    final_pos: end,
                },
            ),
            RuleOutcome::NoMatch => self.ident_memo.set(pos, Memoized::Failure),
        }
        outcome
    }

    fn range(&mut self, session: &mut ParseSession, pos: u32) -> RuleOutcome {
        let RuleOutcome::Matched { node: lo, end } = self.ident(session, pos) else {
            return RuleOutcome::NoMatch;
        };
        let RuleOutcome::Matched { end: after_dots, .. } =
            match_token(session, end, TOK_DOTDOT)
        else {
            return RuleOutcome::NoMatch;
        };
        let RuleOutcome::Matched { node: hi, end: stop } = self.ident(session, after_dots)
        else {
            return RuleOutcome::NoMatch;
        };
        let node = session.create_node(KIND_RANGE, TokenSpan::new(pos, stop - 1), vec![lo, hi]);
        RuleOutcome::Matched {
            node: Some(node),
            end: stop,
        }
    }

    fn sum(&mut self, session: &mut ParseSession, pos: u32) -> RuleOutcome {
        session.parse_separated_list(
            ListOptions {
                kind: KIND_SUM,
                start: pos,
                allow_empty: false,
                style: ListStyle::LeftFold,
            },
            |session, pos| self.ident(session, pos),
            |session, pos| match_token(session, pos, TOK_PLUS),
        )
    }

    fn item(&mut self, session: &mut ParseSession, pos: u32) -> RuleOutcome {
        match self.range(session, pos) {
            matched @ RuleOutcome::Matched { .. } => matched,
            RuleOutcome::NoMatch => self.sum(session, pos),
        }
    }
}

fn match_token(session: &mut ParseSession, pos: u32, kind: TokenKind) -> RuleOutcome {
    match session.token(pos) {
        Some(token) if token.kind == kind => RuleOutcome::Matched {
            node: None,
            end: pos + 1,
        },
        _ => RuleOutcome::NoMatch,
    }
}

impl Grammar for RosterGrammar {
    fn tokenize(&self, text: &str, symbols: &SymbolTable) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (line_index, line) in text.lines().enumerate() {
            let line_no = line_index as u32 + 1;
            let mut chars = line.char_indices().peekable();
            while let Some((start, c)) = chars.next() {
                if c.is_whitespace() {
                    continue;
                }
                let column = start as u32 + 1;
                let mut push = |kind: TokenKind, text: &str| {
                    let width = text.chars().count() as u32;
                    tokens.push(Token::new(
                        kind,
                        symbols.intern(text),
                        SlocRange::new(
                            Sloc::new(line_no, column),
                            Sloc::new(line_no, column + width),
                        ),
                    ));
                };
                if c.is_alphabetic() || c == '_' {
                    let mut end = start + c.len_utf8();
                    while let Some(&(index, next)) = chars.peek() {
                        if next.is_alphanumeric() || next == '_' {
                            chars.next();
                            end = index + next.len_utf8();
                        } else {
                            break;
                        }
                    }
                    push(TOK_IDENT, &line[start..end]);
                } else if c == ',' {
                    push(TOK_COMMA, ",");
                } else if c == '+' {
                    push(TOK_PLUS, "+");
                } else if c == '.' && chars.peek().is_some_and(|&(_, next)| next == '.') {
                    chars.next();
                    push(TOK_DOTDOT, "..");
                } else {
                    push(TOK_ERROR, &line[start..start + c.len_utf8()]);
                }
            }
        }
        tokens
    }

    fn parse(&self, session: &mut ParseSession) -> Option<NodeId> {
        for offset in 0..session.token_count() {
            if session.token(offset).is_some_and(|token| token.kind == TOK_ERROR) {
                let text = session.token_text(offset).unwrap_or_default();
                session.error_at(offset, format!("unrecognized character '{text}'"));
            }
        }

        let mut rules = Rules {
            grammar: self,
            ident_memo: MemoTable::new(),
        };
        let outcome = session.parse_separated_list(
            ListOptions {
                kind: KIND_ROSTER,
                start: 0,
                allow_empty: false,
                style: ListStyle::Flat,
            },
            |session, pos| rules.item(session, pos),
            |session, pos| match_token(session, pos, TOK_COMMA),
        );
        match outcome {
            RuleOutcome::Matched { node, end } => {
                if end < session.token_count() {
                    session.error_at(end, "unexpected trailing input");
                }
                node
            }
            RuleOutcome::NoMatch => {
                session.error_at(0, "expected identifier");
                None
            }
        }
    }

    fn kind_name(&self, kind: NodeKind) -> &'static str {
        match kind {
            KIND_IDENT => "Ident",
            KIND_SUM => "Sum",
            KIND_RANGE => "Range",
            KIND_ROSTER => "Roster",
            _ => "Unknown",
        }
    }
}
