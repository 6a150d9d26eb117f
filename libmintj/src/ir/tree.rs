// Copyright 2026 Neil Henderson
//
//! The `tree` module defines the node kinds of the MintTree intermediate
//! representation.
//!
//! The IR is a closed two-sorted algebra: [MtExp] nodes produce a value,
//! [MtStm] nodes produce an effect. Construction is the whole public
//! contract; once built, a tree is never mutated by this stage. Every node
//! owns its children exclusively. The canonicalizer that runs after this
//! stage rewrites nodes in place, so structural sharing between two tree
//! positions is forbidden.

use std::fmt;

use crate::ICE;

use super::temp::{Label, Temp};

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MtBinOp {
    Plus,
    Minus,
    Mul,
    Div,
    And,
    Or,
    Xor,
    LShift,
    RShift,
    ARShift,
}

/// A relational operator used by conditional jumps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MtRelOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Ult,
    Ule,
    Ugt,
    Uge,
}

/// An expression node: evaluates to a word-sized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtExp {
    Const(i32),
    /// The address named by a label.
    Name(Label),
    Temp(Temp),
    BinOp {
        op: MtBinOp,
        left: Box<MtExp>,
        right: Box<MtExp>,
    },
    /// The contents of the word at the given address.
    Mem(Box<MtExp>),
    Call {
        func: Box<MtExp>,
        args: Vec<MtExp>,
    },
    /// Evaluate the statement for its effect, then the expression for its value.
    ExpSeq {
        stm: Box<MtStm>,
        exp: Box<MtExp>,
    },
}

/// A statement node: evaluates for effect only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtStm {
    /// `dst` is always `Temp` or `Mem`; build with [MtStm::mov].
    Move {
        dst: Box<MtExp>,
        src: Box<MtExp>,
    },
    /// Evaluate and discard.
    Exp(Box<MtExp>),
    Jump(Label),
    CJump {
        op: MtRelOp,
        left: Box<MtExp>,
        right: Box<MtExp>,
        if_true: Label,
        if_false: Label,
    },
    Seq {
        first: Box<MtStm>,
        second: Box<MtStm>,
    },
    Label(Label),
}

impl MtExp {
    pub fn binop(op: MtBinOp, left: MtExp, right: MtExp) -> MtExp {
        MtExp::BinOp { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn mem(addr: MtExp) -> MtExp {
        MtExp::Mem(Box::new(addr))
    }

    pub fn call(func: MtExp, args: Vec<MtExp>) -> MtExp {
        MtExp::Call { func: Box::new(func), args }
    }

    pub fn eseq(stm: MtStm, exp: MtExp) -> MtExp {
        MtExp::ExpSeq { stm: Box::new(stm), exp: Box::new(exp) }
    }
}

impl MtStm {
    /// Builds a `Move`, enforcing that the destination is a `Temp` or a `Mem`.
    ///
    /// Anything else has no location to store into; asking for one is a
    /// translator bug.
    pub fn mov(dst: MtExp, src: MtExp) -> MtStm {
        if !matches!(dst, MtExp::Temp(_) | MtExp::Mem(_)) {
            ICE!("Malformed Move: destination {dst:?} is neither Temp nor Mem");
        }
        MtStm::Move { dst: Box::new(dst), src: Box::new(src) }
    }

    pub fn exp(exp: MtExp) -> MtStm {
        MtStm::Exp(Box::new(exp))
    }

    pub fn cjump(op: MtRelOp, left: MtExp, right: MtExp, if_true: Label, if_false: Label) -> MtStm {
        MtStm::CJump { op, left: Box::new(left), right: Box::new(right), if_true, if_false }
    }

    pub fn seq(first: MtStm, second: MtStm) -> MtStm {
        MtStm::Seq { first: Box::new(first), second: Box::new(second) }
    }
}

/// A whole method tree: a bare statement for `main`, an
/// `ExpSeq(body, return)` expression for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtTree {
    Exp(MtExp),
    Stm(MtStm),
}

/// One translated method: its entry label and its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub label: Label,
    pub tree: MtTree,
}

impl fmt::Display for MtBinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MtBinOp::Plus => "PLUS",
            MtBinOp::Minus => "MINUS",
            MtBinOp::Mul => "MUL",
            MtBinOp::Div => "DIV",
            MtBinOp::And => "AND",
            MtBinOp::Or => "OR",
            MtBinOp::Xor => "XOR",
            MtBinOp::LShift => "LSHIFT",
            MtBinOp::RShift => "RSHIFT",
            MtBinOp::ARShift => "ARSHIFT",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for MtRelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MtRelOp::Eq => "EQ",
            MtRelOp::Ne => "NE",
            MtRelOp::Lt => "LT",
            MtRelOp::Gt => "GT",
            MtRelOp::Le => "LE",
            MtRelOp::Ge => "GE",
            MtRelOp::Ult => "ULT",
            MtRelOp::Ule => "ULE",
            MtRelOp::Ugt => "UGT",
            MtRelOp::Uge => "UGE",
        };
        write!(f, "{name}")
    }
}
