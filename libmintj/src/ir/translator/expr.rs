// Copyright 2026 Neil Henderson
//
//! The `expr` module lowers AST expressions into MintTree wrappers.

use crate::ICE;
use crate::ast::{AstBinaryOp, AstType, AstUnaryOp, Expression};
use crate::core::Symbol;

use super::super::frame::WORD_SIZE;
use super::super::tree::{MtBinOp, MtExp, MtRelOp, MtStm};
use super::super::wrapper::{Conditional, Wrapper};
use super::{Translator, method_label};

/// Lowers one expression. The wrapper shape is fixed per construct: values
/// and calls come back as [Wrapper::Value]; boolean operators are built as
/// conditionals but materialized to a 0/1 value on the spot, because the
/// statement context that wants a branch re-derives it via
/// [Wrapper::into_cond].
pub(super) fn translate_expression(translator: &mut Translator, expr: &Expression) -> Wrapper {
    match expr {
        Expression::IntLiteral(value) => Wrapper::Value(MtExp::Const(*value)),

        Expression::BoolLiteral(value) => Wrapper::Value(MtExp::Const(i32::from(*value))),

        Expression::This => {
            translator.type_for_invoke = Some(translator.current_class);
            Wrapper::Value(translator.frame.this_expr())
        }

        Expression::Ident(name) => translate_ident(translator, *name),

        Expression::Paren(inner) => translate_expression(translator, inner),

        Expression::Unary { op, expr } => {
            let value = translate_expression(translator, expr).into_value(&mut translator.pool);
            let op = match op {
                AstUnaryOp::Minus => MtBinOp::Minus,
            };
            Wrapper::Value(MtExp::binop(op, MtExp::Const(0), value))
        }

        Expression::Not(inner) => {
            let value = translate_expression(translator, inner).into_value(&mut translator.pool);
            let negated = Conditional::RelCmp { op: MtRelOp::Eq, left: value, right: MtExp::Const(0) };
            Wrapper::Value(Wrapper::Cond(negated).into_value(&mut translator.pool))
        }

        Expression::Binary { op, left, right } => translate_binary(translator, *op, left, right),

        Expression::Length(array) => {
            // The array header word at offset 0 holds the length.
            let base = translate_expression(translator, array).into_value(&mut translator.pool);
            Wrapper::Value(MtExp::mem(base))
        }

        Expression::NewArray { size } => translate_new_array(translator, size),

        Expression::NewObject { class } => translate_new_object(translator, *class),

        Expression::Invoke { receiver, method, args } => {
            translate_invoke(translator, receiver, *method, args)
        }
    }
}

fn translate_ident(translator: &mut Translator, name: Symbol) -> Wrapper {
    let access = translator.frame.find(name);

    // A class-typed identifier may be the receiver of an enclosing
    // invocation; record its static class.
    translator.type_for_invoke = ident_class(translator, name);

    Wrapper::Value(access)
}

/// The declared class of an identifier, resolved in the same order as
/// [Frame::find]: locals, then formals, then fields. `None` for names of
/// non-class type.
///
/// [Frame::find]: super::super::frame::Frame::find
fn ident_class(translator: &Translator, name: Symbol) -> Option<Symbol> {
    let table = translator.table;
    let info = table.method_info(translator.current_class, translator.current_method);

    let declared = info
        .locals
        .get(&name)
        .or_else(|| info.params.get(&name))
        .copied()
        .or_else(|| {
            table
                .fields_linearized(translator.current_class)
                .into_iter()
                .find(|&(field, _)| field == name)
                .map(|(_, ty)| ty)
        });

    declared.and_then(AstType::class_name)
}

fn translate_binary(
    translator: &mut Translator,
    op: AstBinaryOp,
    left: &Expression,
    right: &Expression,
) -> Wrapper {
    let left_value = translate_expression(translator, left).into_value(&mut translator.pool);
    let right_value = translate_expression(translator, right).into_value(&mut translator.pool);

    let exp = match op {
        AstBinaryOp::Add => MtExp::binop(MtBinOp::Plus, left_value, right_value),
        AstBinaryOp::Subtract => MtExp::binop(MtBinOp::Minus, left_value, right_value),
        AstBinaryOp::Multiply => MtExp::binop(MtBinOp::Mul, left_value, right_value),
        AstBinaryOp::Divide => MtExp::binop(MtBinOp::Div, left_value, right_value),

        AstBinaryOp::And => {
            let cond = Conditional::And { left: left_value, right: right_value };
            Wrapper::Cond(cond).into_value(&mut translator.pool)
        }

        AstBinaryOp::Or => {
            let cond = Conditional::Or { left: left_value, right: right_value };
            Wrapper::Cond(cond).into_value(&mut translator.pool)
        }

        AstBinaryOp::Less => {
            let cond = Conditional::RelCmp { op: MtRelOp::Lt, left: left_value, right: right_value };
            Wrapper::Cond(cond).into_value(&mut translator.pool)
        }
    };

    Wrapper::Value(exp)
}

/// `new int[n]`: allocate `n + 1` words and store the word count in the
/// header at offset 0; the result is the base pointer.
fn translate_new_array(translator: &mut Translator, size: &Expression) -> Wrapper {
    let size_value = translate_expression(translator, size).into_value(&mut translator.pool);

    let word_count = translator.pool.fresh_temp();
    let base = translator.pool.fresh_temp();

    let store_count = MtStm::mov(
        MtExp::Temp(word_count),
        MtExp::binop(MtBinOp::Plus, size_value, MtExp::Const(1)),
    );

    let bytes = MtExp::binop(MtBinOp::Mul, MtExp::Temp(word_count), MtExp::Const(WORD_SIZE));
    let alloc = translator.frame.external_call("#malloc", vec![bytes]);
    let store_base = MtStm::mov(MtExp::Temp(base), alloc);

    let store_header = MtStm::mov(MtExp::mem(MtExp::Temp(base)), MtExp::Temp(word_count));

    Wrapper::Value(MtExp::eseq(
        MtStm::seq(store_count, MtStm::seq(store_base, store_header)),
        MtExp::Temp(base),
    ))
}

/// `new T()`: allocate one word per field of `T` (at least one), returning
/// the base pointer. The allocator zero-fills, so fields start at 0/false.
fn translate_new_object(translator: &mut Translator, class: Symbol) -> Wrapper {
    let field_count = translator.table.fields_linearized(class).len() as i32;
    let bytes = (WORD_SIZE * field_count).max(WORD_SIZE);

    let base = translator.pool.fresh_temp();
    let alloc = translator.frame.external_call("#malloc", vec![MtExp::Const(bytes)]);

    translator.type_for_invoke = Some(class);

    Wrapper::Value(MtExp::eseq(MtStm::mov(MtExp::Temp(base), alloc), MtExp::Temp(base)))
}

/// `receiver.method(args)`: static dispatch on the receiver's class. The
/// receiver becomes the implicit first argument.
fn translate_invoke(
    translator: &mut Translator,
    receiver: &Expression,
    method: Symbol,
    args: &[Expression],
) -> Wrapper {
    let receiver_value = translate_expression(translator, receiver).into_value(&mut translator.pool);

    let Some(receiver_class) = translator.type_for_invoke.take() else {
        ICE!(
            "No receiver class recorded for call to '{}' in '{}.{}'",
            method,
            translator.current_class,
            translator.current_method
        );
    };

    let mut call_args = Vec::with_capacity(args.len() + 1);
    call_args.push(receiver_value);
    for arg in args {
        call_args.push(translate_expression(translator, arg).into_value(&mut translator.pool));
    }

    let call = MtExp::call(MtExp::Name(method_label(receiver_class, method)), call_args);

    // A chained call dispatches on this call's declared return class.
    translator.type_for_invoke =
        translator.table.method_info(receiver_class, method).return_type.class_name();

    Wrapper::Value(call)
}
