// Copyright 2026 Neil Henderson
//
//! The `ir` module is responsible for lowering the type-checked MiniJava AST
//! into the "MintTree" intermediate representation (IR).
//!
//! MintTree is a two-sorted tree IR (expressions and statements) in the style
//! of Appel's Tree language. Later stages canonicalize it, select
//! instructions and allocate registers; none of that happens here.

mod frame;
mod printer;
mod temp;
mod translator;
mod tree;
mod wrapper;


pub use frame::{Frame, WORD_SIZE};
pub use printer::{fragment_to_string, print, tree_to_string};
pub use temp::{Label, Temp, TempPool};
pub use translator::translate;
pub use tree::{Fragment, MtBinOp, MtExp, MtRelOp, MtStm, MtTree};
pub use wrapper::{Conditional, Wrapper};
