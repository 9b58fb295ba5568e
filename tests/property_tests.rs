//! Property-based tests over the memo table, the interner, and list
//! construction, catching edge cases hand-written cases miss.

mod common;

use std::rc::Rc;

use proptest::prelude::*;

use arbor::{AnalysisContext, MemoTable, Memoized, SymbolTable};
use common::RosterGrammar;

const CAPACITY: usize = 16;

proptest! {
    #[test]
    fn memo_set_then_get_round_trips(
        offset in 0u32..10_000,
        instance in any::<u16>(),
        final_pos in 0u32..10_000,
    ) {
        let mut table: MemoTable<u16, CAPACITY> = MemoTable::new();
        table.set(offset, Memoized::Success { instance, final_pos });
        prop_assert_eq!(
            table.get(offset),
            Some(&Memoized::Success { instance, final_pos })
        );
    }

    /// Whatever was recorded, probing any *other* offset is a miss, both
    /// for slot collisions (same `offset mod N`) and for untouched slots.
    #[test]
    fn memo_other_offsets_read_as_miss(
        recorded in 0u32..10_000,
        probe in 0u32..10_000,
    ) {
        prop_assume!(recorded != probe);
        let mut table: MemoTable<u16, CAPACITY> = MemoTable::new();
        table.set(recorded, Memoized::Success { instance: 1, final_pos: recorded + 1 });
        prop_assert_eq!(table.get(probe), None);
    }

    #[test]
    fn memo_clear_forgets_everything(offsets in prop::collection::vec(0u32..10_000, 0..64)) {
        let mut table: MemoTable<u16, CAPACITY> = MemoTable::new();
        for &offset in &offsets {
            table.set(offset, Memoized::Failure);
        }
        table.clear();
        for &offset in &offsets {
            prop_assert_eq!(table.get(offset), None);
        }
    }

    #[test]
    fn interning_is_stable_and_round_trips(text in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
        let table = SymbolTable::new();
        let first = table.intern(&text);
        let second = table.intern(&text);
        prop_assert_eq!(first, second);
        let resolved = table.resolve(first);
        prop_assert_eq!(resolved.as_deref(), Some(text.as_str()));
    }

    /// Parsing `n` comma-separated identifiers always yields a roster with
    /// exactly `n` children, in order.
    #[test]
    fn roster_keeps_every_element_in_order(
        idents in prop::collection::vec("[a-z]{1,8}", 1..10),
    ) {
        let grammar = Rc::new(RosterGrammar::default());
        let context = AnalysisContext::new(grammar);
        let source = idents.join(", ");
        let unit = context.get_from_buffer("prop.roster", &source);
        prop_assert!(!unit.has_diagnostics());

        let root = unit.root().expect("identifier rosters always derive");
        prop_assert_eq!(root.child_count(), idents.len());
        for (index, ident) in idents.iter().enumerate() {
            let child = root.child(index).expect("children are dense");
            prop_assert_eq!(child.text(), ident.as_str());
        }
    }
}
