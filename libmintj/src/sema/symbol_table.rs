// Copyright 2026 Neil Henderson
//
//! The `symbol_table` module defines the [SymbolTable] type and its related types.
//!
//! The table describes every class (fields in declaration order) and every
//! method (formals and locals with their declared types). It is normally
//! populated by the front-end's symbol-table builder; [SymbolTable::from_program]
//! reproduces that pass over an already-checked AST. No validation happens
//! here: conflicting or dangling names are front-end bugs.

use indexmap::IndexMap;

use crate::ICE;
use crate::ast::{AstType, ClassDecl, MethodDecl, Program};
use crate::core::Symbol;
use crate::core::symbol::symbol;

/// Per-method information: formals and locals in declaration order.
#[derive(Debug)]
pub struct MethodInfo {
    pub name: Symbol,
    pub return_type: AstType,
    pub params: IndexMap<Symbol, AstType>,
    pub locals: IndexMap<Symbol, AstType>,
}

/// Per-class information: declared fields and methods in declaration order.
#[derive(Debug)]
pub struct ClassInfo {
    pub name: Symbol,
    pub base: Option<Symbol>,
    pub fields: IndexMap<Symbol, AstType>,
    pub methods: IndexMap<Symbol, MethodInfo>,
}

/// The symbol table for a whole program: one [ClassInfo] per class, in
/// declaration order, the main class first.
#[derive(Debug, Default)]
pub struct SymbolTable {
    classes: IndexMap<Symbol, ClassInfo>,
}

impl SymbolTable {
    /// Builds the table from a type-checked program.
    pub fn from_program(program: &Program) -> Self {
        let mut table = SymbolTable::default();

        // The main class has no fields and a single parameterless `main`
        // method whose return type never matters (its tree is a statement).
        let mut main_class = ClassInfo {
            name: program.main.name,
            base: None,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        };
        main_class.methods.insert(
            symbol("main"),
            MethodInfo {
                name: symbol("main"),
                return_type: AstType::Int,
                params: IndexMap::new(),
                locals: IndexMap::new(),
            },
        );
        table.classes.insert(program.main.name, main_class);

        for class in &program.classes {
            table.classes.insert(class.name, Self::class_from_decl(class));
        }

        table
    }

    fn class_from_decl(class: &ClassDecl) -> ClassInfo {
        let fields = class.fields.iter().map(|field| (field.name, field.ty)).collect();

        let methods = class
            .methods
            .iter()
            .map(|method| (method.name, Self::method_from_decl(method)))
            .collect();

        ClassInfo { name: class.name, base: class.base, fields, methods }
    }

    fn method_from_decl(method: &MethodDecl) -> MethodInfo {
        MethodInfo {
            name: method.name,
            return_type: method.return_type,
            params: method.params.iter().map(|param| (param.name, param.ty)).collect(),
            locals: method.locals.iter().map(|local| (local.name, local.ty)).collect(),
        }
    }

    /// Looks up a class. A missing class is a front-end bug.
    pub fn class_info(&self, class: Symbol) -> &ClassInfo {
        let Some(info) = self.classes.get(&class) else {
            ICE!("Unknown class '{class}' in symbol table lookup");
        };
        info
    }

    /// Looks up a method of a class.
    pub fn method_info(&self, class: Symbol, method: Symbol) -> &MethodInfo {
        let info = self.class_info(class);
        let Some(method_info) = info.methods.get(&method) else {
            ICE!("Unknown method '{class}.{method}' in symbol table lookup");
        };
        method_info
    }

    /// Returns a class's fields in object-layout order.
    ///
    /// Single inheritance linearizes inherited fields before declared ones, so
    /// a derived object is layout-compatible with its base.
    pub fn fields_linearized(&self, class: Symbol) -> Vec<(Symbol, AstType)> {
        let info = self.class_info(class);

        let mut fields = match info.base {
            Some(base) => self.fields_linearized(base),
            None => Vec::new(),
        };
        fields.extend(info.fields.iter().map(|(&name, &ty)| (name, ty)));
        fields
    }
}
