// Copyright 2026 Neil Henderson
//
//! Shared helpers for the IR tests: AST builders, a tree interpreter and a
//! well-formedness checker.

use std::collections::{HashMap, HashSet};

use crate::ast::{
    AstBinaryOp, AstType, ClassDecl, Expression, MainClass, MethodDecl, Program, Statement, VarDecl,
};
use crate::core::symbol::symbol;

use super::super::temp::{Label, Temp};
use super::super::tree::{Fragment, MtBinOp, MtExp, MtRelOp, MtStm, MtTree};

/// Builds a program whose `Main` class runs `main_body`.
pub fn program(main_body: Statement, classes: Vec<ClassDecl>) -> Program {
    Program { main: MainClass { name: symbol("Main"), body: main_body }, classes }
}

pub fn class(name: &str, fields: Vec<VarDecl>, methods: Vec<MethodDecl>) -> ClassDecl {
    ClassDecl { name: symbol(name), base: None, fields, methods }
}

pub fn class_extends(
    name: &str,
    base: &str,
    fields: Vec<VarDecl>,
    methods: Vec<MethodDecl>,
) -> ClassDecl {
    ClassDecl { name: symbol(name), base: Some(symbol(base)), fields, methods }
}

pub fn var(name: &str, ty: AstType) -> VarDecl {
    VarDecl { name: symbol(name), ty }
}

pub fn method(
    name: &str,
    return_type: AstType,
    params: Vec<VarDecl>,
    locals: Vec<VarDecl>,
    body: Vec<Statement>,
    return_expr: Expression,
) -> MethodDecl {
    MethodDecl { name: symbol(name), return_type, params, locals, body, return_expr }
}

pub fn int(value: i32) -> Expression {
    Expression::IntLiteral(value)
}

pub fn ident(name: &str) -> Expression {
    Expression::Ident(symbol(name))
}

pub fn binary(op: AstBinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::Binary { op, left: Box::new(left), right: Box::new(right) }
}

pub fn invoke(receiver: Expression, method: &str, args: Vec<Expression>) -> Expression {
    Expression::Invoke { receiver: Box::new(receiver), method: symbol(method), args }
}

pub fn new_object(class: &str) -> Expression {
    Expression::NewObject { class: symbol(class) }
}

pub fn assign(name: &str, value: Expression) -> Statement {
    Statement::Assign { name: symbol(name), value }
}

/// A tiny interpreter over MintTree, enough to execute lowered booleans and
/// arithmetic: temps, constants, binops, and statement sequences with jumps.
/// Memory and calls are deliberately unsupported; a test that reaches them is
/// testing the wrong layer.
#[derive(Default)]
pub struct Machine {
    temps: HashMap<Temp, i32>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temp(&self, temp: Temp) -> Option<i32> {
        self.temps.get(&temp).copied()
    }

    pub fn eval_exp(&mut self, exp: &MtExp) -> i32 {
        match exp {
            MtExp::Const(value) => *value,

            MtExp::Temp(temp) => match self.temps.get(temp) {
                Some(value) => *value,
                None => panic!("read of uninitialized {temp}"),
            },

            MtExp::BinOp { op, left, right } => {
                let left = self.eval_exp(left);
                let right = self.eval_exp(right);
                match op {
                    MtBinOp::Plus => left.wrapping_add(right),
                    MtBinOp::Minus => left.wrapping_sub(right),
                    MtBinOp::Mul => left.wrapping_mul(right),
                    MtBinOp::Div => left / right,
                    MtBinOp::And => left & right,
                    MtBinOp::Or => left | right,
                    MtBinOp::Xor => left ^ right,
                    MtBinOp::LShift => left << right,
                    MtBinOp::RShift => ((left as u32) >> right) as i32,
                    MtBinOp::ARShift => left >> right,
                }
            }

            MtExp::ExpSeq { stm, exp } => {
                self.run_stm(stm);
                self.eval_exp(exp)
            }

            MtExp::Name(_) | MtExp::Mem(_) | MtExp::Call { .. } => {
                panic!("test interpreter cannot evaluate {exp:?}")
            }
        }
    }

    /// Executes a statement tree, following jumps and conditional jumps
    /// between its labels.
    pub fn run_stm(&mut self, stm: &MtStm) {
        let mut flat = Vec::new();
        flatten(stm, &mut flat);

        let labels: HashMap<Label, usize> = flat
            .iter()
            .enumerate()
            .filter_map(|(index, stm)| match stm {
                MtStm::Label(label) => Some((*label, index)),
                _ => None,
            })
            .collect();

        let jump_to = |label: &Label| match labels.get(label) {
            Some(&index) => index,
            None => panic!("jump to label {label} with no LABEL in the tree"),
        };

        let mut pc = 0;
        while pc < flat.len() {
            match flat[pc] {
                MtStm::Label(_) => pc += 1,

                MtStm::Jump(label) => pc = jump_to(label),

                MtStm::CJump { op, left, right, if_true, if_false } => {
                    let left = self.eval_exp(left);
                    let right = self.eval_exp(right);
                    let taken = compare(*op, left, right);
                    pc = jump_to(if taken { if_true } else { if_false });
                }

                MtStm::Move { dst, src } => {
                    let value = self.eval_exp(src);
                    match dst.as_ref() {
                        MtExp::Temp(temp) => _ = self.temps.insert(*temp, value),
                        _ => panic!("test interpreter cannot store through {dst:?}"),
                    }
                    pc += 1;
                }

                MtStm::Exp(exp) => {
                    self.eval_exp(exp);
                    pc += 1;
                }

                MtStm::Seq { .. } => unreachable!("Seq survived flattening"),
            }
        }
    }
}

fn compare(op: MtRelOp, left: i32, right: i32) -> bool {
    match op {
        MtRelOp::Eq => left == right,
        MtRelOp::Ne => left != right,
        MtRelOp::Lt => left < right,
        MtRelOp::Gt => left > right,
        MtRelOp::Le => left <= right,
        MtRelOp::Ge => left >= right,
        MtRelOp::Ult => (left as u32) < right as u32,
        MtRelOp::Ule => (left as u32) <= right as u32,
        MtRelOp::Ugt => (left as u32) > right as u32,
        MtRelOp::Uge => (left as u32) >= right as u32,
    }
}

fn flatten<'a>(stm: &'a MtStm, out: &mut Vec<&'a MtStm>) {
    match stm {
        MtStm::Seq { first, second } => {
            flatten(first, out);
            flatten(second, out);
        }
        _ => out.push(stm),
    }
}

/// Checks the structural invariants of an emitted fragment: every `Move`
/// destination is a `Temp` or a `Mem`, every jump target has a `LABEL` in the
/// same tree, and no label is defined twice.
pub fn assert_well_formed(fragment: &Fragment) {
    let mut defined = HashSet::new();
    let mut referenced = HashSet::new();

    match &fragment.tree {
        MtTree::Exp(exp) => collect_exp(exp, &mut defined, &mut referenced),
        MtTree::Stm(stm) => collect_stm(stm, &mut defined, &mut referenced),
    }

    for label in &referenced {
        assert!(
            defined.contains(label),
            "fragment {}: jump target {label} has no LABEL",
            fragment.label
        );
    }
}

fn collect_exp(exp: &MtExp, defined: &mut HashSet<Label>, referenced: &mut HashSet<Label>) {
    match exp {
        MtExp::Const(_) | MtExp::Name(_) | MtExp::Temp(_) => {}

        MtExp::BinOp { left, right, .. } => {
            collect_exp(left, defined, referenced);
            collect_exp(right, defined, referenced);
        }

        MtExp::Mem(addr) => collect_exp(addr, defined, referenced),

        MtExp::Call { func, args } => {
            collect_exp(func, defined, referenced);
            for arg in args {
                collect_exp(arg, defined, referenced);
            }
        }

        MtExp::ExpSeq { stm, exp } => {
            collect_stm(stm, defined, referenced);
            collect_exp(exp, defined, referenced);
        }
    }
}

fn collect_stm(stm: &MtStm, defined: &mut HashSet<Label>, referenced: &mut HashSet<Label>) {
    match stm {
        MtStm::Move { dst, src } => {
            assert!(
                matches!(dst.as_ref(), MtExp::Temp(_) | MtExp::Mem(_)),
                "Move destination is neither Temp nor Mem: {dst:?}"
            );
            collect_exp(dst, defined, referenced);
            collect_exp(src, defined, referenced);
        }

        MtStm::Exp(exp) => collect_exp(exp, defined, referenced),

        MtStm::Jump(label) => _ = referenced.insert(*label),

        MtStm::CJump { left, right, if_true, if_false, .. } => {
            collect_exp(left, defined, referenced);
            collect_exp(right, defined, referenced);
            referenced.insert(*if_true);
            referenced.insert(*if_false);
        }

        MtStm::Seq { first, second } => {
            collect_stm(first, defined, referenced);
            collect_stm(second, defined, referenced);
        }

        MtStm::Label(label) => {
            assert!(defined.insert(*label), "label {label} defined twice in one tree");
        }
    }
}
