// Copyright 2026 Neil Henderson
//
//! The `symbol` module defines the interned [Symbol] handle and its backing storage.

use std::cell::RefCell;
use std::fmt;

use indexmap::IndexSet;

use crate::ICE;

/// An interned string handle.
///
/// Two symbols compare equal exactly when they were interned from the same
/// spelling, so equality and hashing are index comparisons rather than string
/// comparisons. Compilation is single-threaded; the storage is thread-local.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

thread_local! {
    static STORAGE: RefCell<IndexSet<String>> = RefCell::new(IndexSet::new());
}

/// Interns `name` and returns its [Symbol] handle.
///
/// Interning the same spelling twice returns the identical handle.
pub fn symbol(name: &str) -> Symbol {
    STORAGE.with(|storage| {
        let mut storage = storage.borrow_mut();
        match storage.get_index_of(name) {
            Some(index) => Symbol(index as u32),
            None => {
                let (index, _) = storage.insert_full(name.to_string());
                Symbol(index as u32)
            }
        }
    })
}

impl Symbol {
    /// Returns the spelling this symbol was interned from.
    pub fn name(self) -> String {
        STORAGE.with(|storage| match storage.borrow().get_index(self.0 as usize) {
            Some(name) => name.clone(),
            None => ICE!("Symbol #{} has no entry in the symbol storage", self.0),
        })
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name())
    }
}
