//! The key pool: fixed labels and physical key codes for markers.
//!
//! 38 entries in a deterministic order (digits `1`-`9` then `0`, letters
//! in keyboard scan order, then `-` `=` `[` `]`), so the same page labels
//! the same way on every run. The letter rows omit `o` and `l`, which read
//! as `0` and `1` at marker size. Codes are lowercase physical key codes
//! as a keyboard event reports them (`digit1`, `keyq`, `minus`, ...).

use serde::Serialize;

/// One pool entry: what the marker displays and what code a keyboard
/// event must carry to match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BindingKey {
    pub label: char,
    pub code: &'static str,
}

const fn key(label: char, code: &'static str) -> BindingKey {
    BindingKey { label, code }
}

/// The full assignment order.
pub const KEY_TABLE: &[BindingKey] = &[
    key('1', "digit1"),
    key('2', "digit2"),
    key('3', "digit3"),
    key('4', "digit4"),
    key('5', "digit5"),
    key('6', "digit6"),
    key('7', "digit7"),
    key('8', "digit8"),
    key('9', "digit9"),
    key('0', "digit0"),
    key('q', "keyq"),
    key('w', "keyw"),
    key('e', "keye"),
    key('r', "keyr"),
    key('t', "keyt"),
    key('y', "keyy"),
    key('u', "keyu"),
    key('i', "keyi"),
    key('p', "keyp"),
    key('a', "keya"),
    key('s', "keys"),
    key('d', "keyd"),
    key('f', "keyf"),
    key('g', "keyg"),
    key('h', "keyh"),
    key('j', "keyj"),
    key('k', "keyk"),
    key('z', "keyz"),
    key('x', "keyx"),
    key('c', "keyc"),
    key('v', "keyv"),
    key('b', "keyb"),
    key('n', "keyn"),
    key('m', "keym"),
    key('-', "minus"),
    key('=', "equal"),
    key('[', "bracketleft"),
    key(']', "bracketright"),
];

/// Look up a pool entry by its physical key code.
#[must_use]
pub fn lookup_code(code: &str) -> Option<BindingKey> {
    KEY_TABLE.iter().find(|k| k.code == code).copied()
}

/// Single-use cursor over [`KEY_TABLE`].
///
/// A pool hands out each entry at most once, in table order. Exhaustion is
/// an explicit `None`; the caller skips labeling and continues.
/// Restarting requires a fresh pool, there is no rewind.
#[derive(Debug, Default)]
pub struct KeyPool {
    cursor: usize,
}

impl KeyPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next unused key, or `None` once the pool is exhausted.
    pub fn next_key(&mut self) -> Option<BindingKey> {
        let next = KEY_TABLE.get(self.cursor).copied();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }

    /// How many keys are still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        KEY_TABLE.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pool_has_exactly_38_entries() {
        assert_eq!(KEY_TABLE.len(), 38);
    }

    #[test]
    fn digits_come_first_then_letters_then_punctuation() {
        assert_eq!(KEY_TABLE[0], key('1', "digit1"));
        assert_eq!(KEY_TABLE[9], key('0', "digit0"));
        assert_eq!(KEY_TABLE[10], key('q', "keyq"));
        assert_eq!(KEY_TABLE[37], key(']', "bracketright"));
    }

    #[test]
    fn confusable_letters_are_omitted() {
        assert!(lookup_code("keyo").is_none());
        assert!(lookup_code("keyl").is_none());
    }

    #[test]
    fn labels_and_codes_are_unique() {
        let labels: HashSet<char> = KEY_TABLE.iter().map(|k| k.label).collect();
        let codes: HashSet<&str> = KEY_TABLE.iter().map(|k| k.code).collect();
        assert_eq!(labels.len(), KEY_TABLE.len());
        assert_eq!(codes.len(), KEY_TABLE.len());
    }

    #[test]
    fn pool_yields_table_order_then_exhausts() {
        let mut pool = KeyPool::new();
        for expected in KEY_TABLE {
            assert_eq!(pool.next_key(), Some(*expected));
        }
        assert_eq!(pool.next_key(), None);
        assert_eq!(pool.next_key(), None);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn fresh_pool_restarts_from_the_top() {
        let mut first = KeyPool::new();
        first.next_key();
        first.next_key();

        let mut fresh = KeyPool::new();
        assert_eq!(fresh.next_key().map(|k| k.label), Some('1'));
        assert_eq!(fresh.remaining(), 37);
    }

    #[test]
    fn lookup_code_finds_table_entries() {
        assert_eq!(lookup_code("digit1").map(|k| k.label), Some('1'));
        assert_eq!(lookup_code("bracketleft").map(|k| k.label), Some('['));
        assert!(lookup_code("escape").is_none());
    }
}
