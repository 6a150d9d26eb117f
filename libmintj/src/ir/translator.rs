// Copyright 2026 Neil Henderson
//
//! The `translator` module lowers the type-checked AST into MintTree fragments.
//!
//! The walk is post-order: each AST node is lowered after its children, and
//! the result travels upward as a [Wrapper]. Per method, the translator opens
//! a fresh [Frame], binds the receiver, the formals, the locals and the
//! current class's fields, lowers the body, and emits one [Fragment]:
//! a bare statement for `main`, `ExpSeq(body, return)` for everything else.

mod expr;

use crate::ast::{ClassDecl, Expression, MainClass, MethodDecl, Program, Statement};
use crate::core::Symbol;
use crate::core::symbol::symbol;
use crate::sema::SymbolTable;

use super::frame::Frame;
use super::temp::{Label, TempPool};
use super::tree::{Fragment, MtExp, MtStm, MtTree};

/// Translates a program into one fragment per method, in declaration order,
/// `main` first.
pub fn translate(program: &Program, table: &SymbolTable) -> Vec<Fragment> {
    let mut translator = Translator::new(table, program);

    let mut fragments = vec![translate_main(&mut translator, &program.main)];

    for class in &program.classes {
        for method in &class.methods {
            fragments.push(translate_method(&mut translator, class, method));
        }
    }

    fragments
}

/// The entry label of a method: `ClassName@methodName`. Part of the ABI with
/// the surrounding runtime.
fn method_label(class: Symbol, method: Symbol) -> Label {
    Label::named(&format!("{class}@{method}"))
}

/// Mutable translation state threaded through the walk.
struct Translator<'a> {
    table: &'a SymbolTable,
    pool: TempPool,
    current_class: Symbol,
    current_method: Symbol,
    frame: Frame,
    /// The static class of the most recently lowered receiver expression,
    /// consumed by method invocation to resolve the entry label.
    type_for_invoke: Option<Symbol>,
}

impl<'a> Translator<'a> {
    fn new(table: &'a SymbolTable, program: &Program) -> Self {
        let mut pool = TempPool::new();
        let frame = Frame::new(Label::named("main"), &mut pool);
        Self {
            table,
            pool,
            current_class: program.main.name,
            current_method: symbol("main"),
            frame,
            type_for_invoke: None,
        }
    }
}

fn translate_main(translator: &mut Translator, main: &MainClass) -> Fragment {
    let label = Label::named("main");
    enter_method(translator, main.name, symbol("main"), label);

    let body = translate_statement(translator, &main.body);
    Fragment { label, tree: MtTree::Stm(body) }
}

fn translate_method(translator: &mut Translator, class: &ClassDecl, method: &MethodDecl) -> Fragment {
    let label = method_label(class.name, method.name);
    enter_method(translator, class.name, method.name, label);

    let body = translate_statements(translator, &method.body);

    let return_value =
        expr::translate_expression(translator, &method.return_expr).into_value(&mut translator.pool);

    let tree = match body {
        Some(body) => MtExp::eseq(body, return_value),
        None => return_value,
    };

    Fragment { label, tree: MtTree::Exp(tree) }
}

/// Opens the frame for a method: the receiver is always formal 0, then the
/// declared formals, then locals, then the fields of the current class in
/// object-layout order.
fn enter_method(translator: &mut Translator, class: Symbol, method: Symbol, label: Label) {
    translator.current_class = class;
    translator.current_method = method;
    translator.type_for_invoke = None;

    let table = translator.table;
    let info = table.method_info(class, method);

    let mut frame = Frame::new(label, &mut translator.pool);
    frame.alloc_formal(symbol("this"));
    for &name in info.params.keys() {
        frame.alloc_formal(name);
    }
    for &name in info.locals.keys() {
        frame.alloc_local(name, &mut translator.pool);
    }
    for (name, _) in table.fields_linearized(class) {
        frame.alloc_field(name);
    }

    translator.frame = frame;
}

fn translate_statement(translator: &mut Translator, stmt: &Statement) -> MtStm {
    match stmt {
        Statement::Block(stmts) => {
            translate_statements(translator, stmts).unwrap_or_else(|| MtStm::exp(MtExp::Const(0)))
        }

        Statement::If { condition, then_stmt, else_stmt } => {
            translate_if(translator, condition, then_stmt, else_stmt.as_deref())
        }

        Statement::While { condition, body } => translate_while(translator, condition, body),

        Statement::Print(value) => translate_print(translator, value),

        Statement::Assign { name, value } => translate_assign(translator, *name, value),
    }
}

/// Left-folds a statement list into nested `Seq`s. Returns `None` for an
/// empty list so callers can pick their own no-op.
fn translate_statements(translator: &mut Translator, stmts: &[Statement]) -> Option<MtStm> {
    let mut result: Option<MtStm> = None;
    for stmt in stmts {
        let next = translate_statement(translator, stmt);
        result = Some(match result {
            Some(done) => MtStm::seq(done, next),
            None => next,
        });
    }
    result
}

fn translate_if(
    translator: &mut Translator,
    condition: &Expression,
    then_stmt: &Statement,
    else_stmt: Option<&Statement>,
) -> MtStm {
    let if_true = translator.pool.fresh_label();
    let if_false = translator.pool.fresh_label();
    let end = translator.pool.fresh_label();

    let test = expr::translate_expression(translator, condition).into_cond(
        if_true,
        if_false,
        &mut translator.pool,
    );

    let then_body = translate_statement(translator, then_stmt);
    let then_arm =
        MtStm::seq(MtStm::seq(MtStm::Label(if_true), then_body), MtStm::Jump(end));

    // A missing else-branch still needs its arm so both labels exist.
    let else_body = match else_stmt {
        Some(stmt) => translate_statement(translator, stmt),
        None => MtStm::exp(MtExp::Const(0)),
    };
    let else_arm =
        MtStm::seq(MtStm::seq(MtStm::Label(if_false), else_body), MtStm::Label(end));

    MtStm::seq(test, MtStm::seq(then_arm, else_arm))
}

fn translate_while(
    translator: &mut Translator,
    condition: &Expression,
    body: &Statement,
) -> MtStm {
    let if_true = translator.pool.fresh_label();
    let if_false = translator.pool.fresh_label();

    // The test is emitted twice, once at entry and once after the body, so
    // the loop needs no back-edge label. The condition is re-translated for
    // the second emission; the two tests must not share any nodes.
    let entry_test = expr::translate_expression(translator, condition).into_cond(
        if_true,
        if_false,
        &mut translator.pool,
    );

    let body_stm = translate_statement(translator, body);

    let repeat_test = expr::translate_expression(translator, condition).into_cond(
        if_true,
        if_false,
        &mut translator.pool,
    );

    MtStm::seq(
        MtStm::seq(entry_test, MtStm::Label(if_true)),
        MtStm::seq(body_stm, MtStm::seq(repeat_test, MtStm::Label(if_false))),
    )
}

fn translate_print(translator: &mut Translator, value: &Expression) -> MtStm {
    let value = expr::translate_expression(translator, value).into_value(&mut translator.pool);
    let call = translator.frame.external_call("#print", vec![value]);
    MtStm::exp(call)
}

fn translate_assign(translator: &mut Translator, name: Symbol, value: &Expression) -> MtStm {
    let value = expr::translate_expression(translator, value).into_value(&mut translator.pool);
    MtStm::mov(translator.frame.find(name), value)
}
