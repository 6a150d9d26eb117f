// Copyright 2026 Neil Henderson
//
//! The `frame` module defines the per-method activation record.
//!
//! A [Frame] maps source names to the IR expressions that locate their values
//! at runtime. Three regions exist: formals (with the receiver as formal 0),
//! method locals, and the fields of the current object. Lookup resolves
//! locals first, then formals, then fields; the type checker has already
//! rejected any genuinely ambiguous program.

use indexmap::IndexMap;

use crate::ICE;
use crate::core::Symbol;

use super::temp::{Label, Temp, TempPool};
use super::tree::{MtBinOp, MtExp};

/// Bytes per word. Field and array layouts are expressed in it and must be
/// stable across a compilation unit.
pub const WORD_SIZE: i32 = 4;

/// Where a name lives, recorded so that every lookup can build a fresh access
/// tree instead of aliasing a stored one.
#[derive(Debug, Copy, Clone)]
enum Access {
    /// Formal `k`: the word at `frame_pointer + WORD_SIZE * k`.
    Formal(usize),
    /// A method local, held in its own temporary.
    Local(Temp),
    /// Field `i` of the current object: the word at `this + WORD_SIZE * (i + 1)`.
    /// The word at offset 0 is the object header.
    Field(usize),
}

/// The activation record of the method currently being translated.
#[derive(Debug)]
pub struct Frame {
    name: Label,
    frame_pointer: Temp,
    formals: IndexMap<Symbol, usize>,
    locals: IndexMap<Symbol, Temp>,
    fields: IndexMap<Symbol, usize>,
}

impl Frame {
    /// Creates an empty frame for the method entered at `name`.
    pub fn new(name: Label, pool: &mut TempPool) -> Self {
        Self {
            name,
            frame_pointer: pool.fresh_temp(),
            formals: IndexMap::new(),
            locals: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    /// The method entry label this frame belongs to.
    pub fn name(&self) -> Label {
        self.name
    }

    /// Binds `name` to the next formal slot. The receiver must be allocated
    /// first so that it occupies slot 0.
    pub fn alloc_formal(&mut self, name: Symbol) {
        let slot = self.formals.len();
        self.formals.insert(name, slot);
    }

    /// Binds `name` to a fresh local temporary.
    pub fn alloc_local(&mut self, name: Symbol, pool: &mut TempPool) {
        let temp = pool.fresh_temp();
        self.locals.insert(name, temp);
    }

    /// Binds `name` to the next field index of the current object.
    pub fn alloc_field(&mut self, name: Symbol) {
        let index = self.fields.len();
        self.fields.insert(name, index);
    }

    /// Returns the access expression for `name`, searching locals, then
    /// formals, then fields. Every call builds a fresh tree; repeated lookups
    /// of the same name are structurally equal but never share nodes.
    pub fn find(&self, name: Symbol) -> MtExp {
        self.access_exp(self.lookup(name))
    }

    /// The access expression of the receiver, formal 0.
    pub fn this_expr(&self) -> MtExp {
        if self.formals.is_empty() {
            ICE!("Frame '{}' has no formals; 'this' was never allocated", self.name);
        }
        self.access_exp(Access::Formal(0))
    }

    /// Builds a call to a runtime-supplied function. `func` is the full
    /// runtime name including its `#` prefix, e.g. `#malloc`.
    pub fn external_call(&self, func: &str, args: Vec<MtExp>) -> MtExp {
        MtExp::call(MtExp::Name(Label::named(func)), args)
    }

    fn lookup(&self, name: Symbol) -> Access {
        if let Some(&temp) = self.locals.get(&name) {
            Access::Local(temp)
        } else if let Some(&slot) = self.formals.get(&name) {
            Access::Formal(slot)
        } else if let Some(&index) = self.fields.get(&name) {
            Access::Field(index)
        } else {
            ICE!("Unknown name '{}' in frame '{}'", name, self.name);
        }
    }

    fn access_exp(&self, access: Access) -> MtExp {
        match access {
            Access::Formal(slot) => MtExp::mem(MtExp::binop(
                MtBinOp::Plus,
                MtExp::Temp(self.frame_pointer),
                MtExp::Const(WORD_SIZE * slot as i32),
            )),

            Access::Local(temp) => MtExp::Temp(temp),

            Access::Field(index) => MtExp::mem(MtExp::binop(
                MtBinOp::Plus,
                self.this_expr(),
                MtExp::Const(WORD_SIZE * (index as i32 + 1)),
            )),
        }
    }
}
