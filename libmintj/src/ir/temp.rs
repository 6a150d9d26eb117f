// Copyright 2026 Neil Henderson
//
//! The `temp` module defines fresh temporaries, code labels and the pool that
//! hands them out.

use std::fmt;

use crate::ICE;
use crate::core::Symbol;
use crate::core::symbol::symbol;

/// An abstract register. The register allocator maps it to a machine register
/// or a spill slot much later; the translator only cares that every temp it
/// asks for is distinct.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Temp(u32);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A symbolic code address.
///
/// Anonymous labels are numbered by the pool and print as `L7`; named labels
/// carry an interned name (method entry points use `ClassName@methodName`,
/// runtime functions a `#` prefix) and are equal exactly when their names are.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Anonymous(u32),
    Named(Symbol),
}

impl Label {
    /// Creates a label with the given printable name.
    pub fn named(name: &str) -> Label {
        Label::Named(symbol(name))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Anonymous(index) => write!(f, "L{index}"),
            Label::Named(name) => write!(f, "{name}"),
        }
    }
}

/// The pool of fresh temporaries and anonymous labels.
///
/// Two monotonic counters; nothing is ever reused. One pool serves one
/// translation unit and must not be shared with a second translator.
#[derive(Debug, Default)]
pub struct TempPool {
    next_temp: u32,
    next_label: u32,
}

impl TempPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a temporary that no previous call has returned.
    pub fn fresh_temp(&mut self) -> Temp {
        if self.next_temp == u32::MAX {
            ICE!("Exhausted temporaries");
        }
        let temp = Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    /// Returns an anonymous label that no previous call has returned.
    pub fn fresh_label(&mut self) -> Label {
        if self.next_label == u32::MAX {
            ICE!("Exhausted labels");
        }
        let label = Label::Anonymous(self.next_label);
        self.next_label += 1;
        label
    }
}
