// Copyright 2026 Neil Henderson
//
//! The `printer` module renders MintTree fragments as text.
//!
//! Trees print as nested node constructors, one method per paragraph:
//!
//! ```text
//! Sum@add:
//!   ESEQ(MOVE(t3, BINOP(PLUS, CONST(1), CONST(2))), t3)
//! ```

use std::fmt::Write;

use super::tree::{Fragment, MtExp, MtStm, MtTree};

/// Prints every fragment to stdout.
pub fn print(fragments: &[Fragment]) {
    for fragment in fragments {
        println!("{}", fragment_to_string(fragment));
    }
}

/// Renders one fragment: its entry label, then its tree.
pub fn fragment_to_string(fragment: &Fragment) -> String {
    format!("{}:\n  {}", fragment.label, tree_to_string(&fragment.tree))
}

/// Renders a tree to a single line.
pub fn tree_to_string(tree: &MtTree) -> String {
    let mut out = String::new();
    match tree {
        MtTree::Exp(exp) => write_exp(&mut out, exp),
        MtTree::Stm(stm) => write_stm(&mut out, stm),
    }
    out
}

fn write_exp(out: &mut String, exp: &MtExp) {
    match exp {
        MtExp::Const(value) => _ = write!(out, "CONST({value})"),

        MtExp::Name(label) => _ = write!(out, "NAME({label})"),

        MtExp::Temp(temp) => _ = write!(out, "{temp}"),

        MtExp::BinOp { op, left, right } => {
            _ = write!(out, "BINOP({op}, ");
            write_exp(out, left);
            out.push_str(", ");
            write_exp(out, right);
            out.push(')');
        }

        MtExp::Mem(addr) => {
            out.push_str("MEM(");
            write_exp(out, addr);
            out.push(')');
        }

        MtExp::Call { func, args } => {
            out.push_str("CALL(");
            write_exp(out, func);
            for arg in args {
                out.push_str(", ");
                write_exp(out, arg);
            }
            out.push(')');
        }

        MtExp::ExpSeq { stm, exp } => {
            out.push_str("ESEQ(");
            write_stm(out, stm);
            out.push_str(", ");
            write_exp(out, exp);
            out.push(')');
        }
    }
}

fn write_stm(out: &mut String, stm: &MtStm) {
    match stm {
        MtStm::Move { dst, src } => {
            out.push_str("MOVE(");
            write_exp(out, dst);
            out.push_str(", ");
            write_exp(out, src);
            out.push(')');
        }

        MtStm::Exp(exp) => {
            out.push_str("EXP(");
            write_exp(out, exp);
            out.push(')');
        }

        MtStm::Jump(label) => _ = write!(out, "JUMP({label})"),

        MtStm::CJump { op, left, right, if_true, if_false } => {
            _ = write!(out, "CJUMP({op}, ");
            write_exp(out, left);
            out.push_str(", ");
            write_exp(out, right);
            _ = write!(out, ", {if_true}, {if_false})");
        }

        MtStm::Seq { first, second } => {
            out.push_str("SEQ(");
            write_stm(out, first);
            out.push_str(", ");
            write_stm(out, second);
            out.push(')');
        }

        MtStm::Label(label) => _ = write!(out, "LABEL({label})"),
    }
}
