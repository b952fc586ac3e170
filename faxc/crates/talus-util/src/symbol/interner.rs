//! Thread-local string interner backed by a bump arena.
//!
//! Strings are allocated out of a [`bumpalo::Bump`] arena and the resulting
//! `&'static str` (transmuted from the arena's actual lifetime) is stored
//! alongside its hash in an `FxHashMap`. The arena is never reset, so every
//! interned string stays valid for the life of the thread.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use super::Symbol;

thread_local! {
    pub static STRING_TABLE: RefCell<StringTable> = RefCell::new(StringTable::new());
}

/// Owns the arena and the hash-to-symbol index.
pub struct StringTable {
    index: FxHashMap<u64, u32>,
    strings: Vec<&'static str>,
    arena: bumpalo::Bump,
}

impl StringTable {
    fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            strings: Vec::new(),
            arena: bumpalo::Bump::new(),
        }
    }

    pub fn intern(&mut self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);
        if let Some(&idx) = self.index.get(&hash) {
            if self.strings[idx as usize] == string {
                return Symbol { index: idx };
            }
        }

        let allocated: &str = self.arena.alloc_str(string);
        // Safe: the arena is never reset or dropped before the table itself.
        let allocated: &'static str = unsafe { std::mem::transmute(allocated) };
        let idx = self.strings.len() as u32;
        self.strings.push(allocated);
        self.index.insert(hash, idx);
        Symbol { index: idx }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings.get(symbol.index as usize).copied()
    }

    fn hash_string(string: &str) -> u64 {
        let mut hasher = rustc_hash::FxHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_collision_falls_back_to_string_compare() {
        let mut table = StringTable::new();
        let a = table.intern("one");
        let b = table.intern("one");
        assert_eq!(a.as_u32(), b.as_u32());
    }

    #[test]
    fn get_returns_none_for_out_of_range_index() {
        let table = StringTable::new();
        let bogus = unsafe { Symbol::from_u32_unchecked(999) };
        assert_eq!(table.get(bogus), None);
    }
}
