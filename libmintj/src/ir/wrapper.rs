// Copyright 2026 Neil Henderson
//
//! The `wrapper` module defines the tri-state subtree wrappers.
//!
//! A lowered subtree is held in one of three shapes until its parent decides
//! what it needs: a plain value, a valueless effect, or a branch. The
//! conversions between the shapes are where short-circuit lowering and
//! boolean materialization live. A wrapper is consumed by the conversion, so
//! one lowered subtree can never end up in two positions of the output tree.

use crate::ICE;

use super::temp::{Label, TempPool};
use super::tree::{MtExp, MtRelOp, MtStm};

/// A branch-shaped subtree, defined entirely by how it jumps: `emit_cond`
/// produces a statement that transfers control to the true or false label.
/// Booleans are 0 or 1, so "less than 1" tests falseness.
#[derive(Debug)]
pub enum Conditional {
    /// A relational comparison.
    RelCmp {
        op: MtRelOp,
        left: MtExp,
        right: MtExp,
    },
    /// Short-circuit `&&`: the right operand is reached only when the left
    /// was true.
    And {
        left: MtExp,
        right: MtExp,
    },
    /// Short-circuit `||`: the right operand is reached only when the left
    /// was false.
    Or {
        left: MtExp,
        right: MtExp,
    },
}

impl Conditional {
    /// Emits the statement that branches to `if_true` or `if_false`.
    pub fn emit_cond(self, if_true: Label, if_false: Label, pool: &mut TempPool) -> MtStm {
        match self {
            Conditional::RelCmp { op, left, right } => {
                MtStm::cjump(op, left, right, if_true, if_false)
            }

            Conditional::And { left, right } => {
                let mid = pool.fresh_label();
                MtStm::seq(
                    MtStm::cjump(MtRelOp::Lt, left, MtExp::Const(1), if_false, mid),
                    MtStm::seq(
                        MtStm::Label(mid),
                        MtStm::cjump(MtRelOp::Lt, right, MtExp::Const(1), if_false, if_true),
                    ),
                )
            }

            Conditional::Or { left, right } => {
                let mid = pool.fresh_label();
                MtStm::seq(
                    MtStm::cjump(MtRelOp::Eq, left, MtExp::Const(1), if_true, mid),
                    MtStm::seq(
                        MtStm::Label(mid),
                        MtStm::cjump(MtRelOp::Lt, right, MtExp::Const(1), if_false, if_true),
                    ),
                )
            }
        }
    }
}

/// The translation of one AST subtree, in whichever of the three shapes the
/// lowering produced it.
#[derive(Debug)]
pub enum Wrapper {
    /// An expression with a value.
    Value(MtExp),
    /// A statement with no value.
    Statement(MtStm),
    /// A branch.
    Cond(Conditional),
}

impl Wrapper {
    /// Converts to an expression.
    ///
    /// A branch materializes its outcome into a fresh temporary: the result
    /// is seeded with 1, the false arm overwrites it with 0, and both arms
    /// fall into the final label.
    pub fn into_value(self, pool: &mut TempPool) -> MtExp {
        match self {
            Wrapper::Value(exp) => exp,

            Wrapper::Statement(stm) => {
                ICE!("Statement wrapper asked for a value: {stm:?}");
            }

            Wrapper::Cond(cond) => {
                let result = pool.fresh_temp();
                let if_true = pool.fresh_label();
                let if_false = pool.fresh_label();
                let branch = cond.emit_cond(if_true, if_false, pool);
                MtExp::eseq(
                    MtStm::seq(
                        MtStm::mov(MtExp::Temp(result), MtExp::Const(1)),
                        MtStm::seq(
                            branch,
                            MtStm::seq(
                                MtStm::Label(if_false),
                                MtStm::seq(
                                    MtStm::mov(MtExp::Temp(result), MtExp::Const(0)),
                                    MtStm::Label(if_true),
                                ),
                            ),
                        ),
                    ),
                    MtExp::Temp(result),
                )
            }
        }
    }

    /// Converts to a statement, discarding any value.
    pub fn into_stm(self, pool: &mut TempPool) -> MtStm {
        match self {
            Wrapper::Value(exp) => MtStm::exp(exp),

            Wrapper::Statement(stm) => stm,

            Wrapper::Cond(cond) => {
                // Both outcomes converge on the same label.
                let join = pool.fresh_label();
                MtStm::seq(cond.emit_cond(join, join, pool), MtStm::Label(join))
            }
        }
    }

    /// Converts to a statement that branches to `if_true` when the subtree is
    /// truthy and to `if_false` otherwise.
    pub fn into_cond(self, if_true: Label, if_false: Label, pool: &mut TempPool) -> MtStm {
        match self {
            Wrapper::Value(exp) => {
                MtStm::cjump(MtRelOp::Eq, exp, MtExp::Const(0), if_false, if_true)
            }

            Wrapper::Statement(stm) => {
                ICE!("Statement wrapper asked for a conditional: {stm:?}");
            }

            Wrapper::Cond(cond) => cond.emit_cond(if_true, if_false, pool),
        }
    }
}
