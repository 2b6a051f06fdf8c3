//! SymbolsPass — opens scopes, registers declarations, derives declared types.
//!
//! Grounded directly in `original_source/asl/SymbolsListener.cpp`: the walk
//! pushes `$global$` on `Program`, pushes a named scope per `Function`,
//! resolves parameter/variable-declaration types before popping, and only
//! binds the function's own name into the *enclosing* scope after the
//! function's scope has been popped — so a function cannot see itself as a
//! value inside its own body (it can still call itself, since ASL functions
//! are looked up at call sites by identifier, not resolved eagerly; recursion
//! is unreachable only because the grammar has no way to express it without
//! a declared name existing beforehand, which `spec.md` leaves unconstrained).

use crate::ast::{Data, Function, PrimitiveType, Program, Type};
use crate::decoration::TreeDecoration;
use crate::errors::SemErrors;
use crate::symtab::{SymTable, GLOBAL_SCOPE_NAME};
use crate::types::{TypeId, TypesMgr};

pub struct SymbolsPass<'a> {
    pub types: &'a mut TypesMgr,
    pub symbols: &'a mut SymTable,
    pub decorations: &'a mut TreeDecoration,
    pub errors: &'a mut SemErrors,
}

impl<'a> SymbolsPass<'a> {
    pub fn new(
        types: &'a mut TypesMgr,
        symbols: &'a mut SymTable,
        decorations: &'a mut TreeDecoration,
        errors: &'a mut SemErrors,
    ) -> Self {
        SymbolsPass {
            types,
            symbols,
            decorations,
            errors,
        }
    }

    pub fn run(&mut self, program: &Program) {
        let depth_on_entry = self.symbols.scope_depth();
        let sc = self.symbols.push_new_scope(GLOBAL_SCOPE_NAME);
        self.decorations.put_scope(program.id, sc);

        for function in &program.functions {
            self.visit_function(function);
        }

        self.symbols.pop_scope();
        debug_assert_eq!(self.symbols.scope_depth(), depth_on_entry);
    }

    fn visit_function(&mut self, function: &Function) {
        let sc = self.symbols.push_new_scope(&function.name);
        self.decorations.put_scope(function.id, sc);

        for parameter in &function.parameters {
            let t = self.resolve_data(&parameter.data);
            if self.symbols.find_in_current_scope(&parameter.name) {
                self.errors.declared_ident(&parameter.name, parameter.span);
            } else {
                self.symbols.add_parameter(&parameter.name, t);
            }
            self.decorations.put_type(parameter.id, t);
        }

        for decl in &function.declarations {
            let t = self.resolve_data(&decl.data);
            for name in &decl.names {
                if self.symbols.find_in_current_scope(name) {
                    self.errors.declared_ident(name, decl.span);
                } else {
                    self.symbols.add_local_var(name, t);
                }
            }
        }

        // Parameter types are read back from their own decorations, matching
        // the original's `getTypeDecor(ctx->parameters()->parameter(i))` —
        // resolved once above, re-read here for the function type.
        let param_types: Vec<TypeId> = function
            .parameters
            .iter()
            .map(|p| self.decorations.get_type(p.id))
            .collect();
        let ret_type = match &function.return_type {
            Some(ty) => self.resolve_type(ty),
            None => self.types.create_void_ty(),
        };
        let func_ty = self.types.create_function_ty(param_types, ret_type);

        self.symbols.pop_scope();

        if self.symbols.find_in_current_scope(&function.name) {
            self.errors.declared_ident(&function.name, function.name_span);
            let err_ty = self.types.create_error_ty();
            self.decorations.put_type(function.id, err_ty);
        } else {
            self.symbols.add_function(&function.name, func_ty);
            self.decorations.put_type(function.id, func_ty);
        }
    }

    fn resolve_data(&mut self, data: &Data) -> TypeId {
        let t = match data {
            Data::Scalar { ty, .. } => self.resolve_type(ty),
            Data::Array { size, elem, .. } => {
                let elem_ty = self.resolve_type(elem);
                self.types.create_array_ty(*size, elem_ty)
            }
        };
        self.decorations.put_type(data.id(), t);
        t
    }

    fn resolve_type(&mut self, ty: &Type) -> TypeId {
        let t = match ty.primitive {
            PrimitiveType::Int => self.types.create_integer_ty(),
            PrimitiveType::Float => self.types.create_float_ty(),
            PrimitiveType::Bool => self.types.create_boolean_ty(),
            PrimitiveType::Char => self.types.create_character_ty(),
        };
        self.decorations.put_type(ty.id, t);
        t
    }
}
