//! TypeCheckPass — derives and checks types for every expression, re-entering
//! the scopes `SymbolsPass` already built.
//!
//! Grounded in `original_source/asl/TypeCheckListener.cpp`, rule by rule:
//! arithmetic/relational/logical coercion, the `%` integer-only restriction,
//! l-value-ness defined as "not a function" rather than "is a variable", and
//! the always-evaluate-every-argument behavior of call checking (a call with
//! the wrong arity still type-checks every argument it was given).

use crate::ast::{ArithOp, Expr, Function, Ident, LeftExpr, LeftExprKind, Literal, LogicalOp, Program, RelOp, Statement, UnaryOp};
use crate::decoration::TreeDecoration;
use crate::errors::SemErrors;
use crate::span::SourceSpan;
use crate::symtab::SymTable;
use crate::types::{TypeId, TypesMgr};

pub struct TypeCheckPass<'a> {
    pub types: &'a mut TypesMgr,
    pub symbols: &'a mut SymTable,
    pub decorations: &'a mut TreeDecoration,
    pub errors: &'a mut SemErrors,
}

impl<'a> TypeCheckPass<'a> {
    pub fn new(
        types: &'a mut TypesMgr,
        symbols: &'a mut SymTable,
        decorations: &'a mut TreeDecoration,
        errors: &'a mut SemErrors,
    ) -> Self {
        TypeCheckPass {
            types,
            symbols,
            decorations,
            errors,
        }
    }

    pub fn run(&mut self, program: &Program) {
        let sc = self.decorations.get_scope(program.id);
        self.symbols.push_this_scope(sc);

        for function in &program.functions {
            self.visit_function(function);
        }

        self.symbols.pop_scope();

        if self.symbols.no_main_properly_declared(self.types) {
            self.errors.no_main_properly_declared(program.span);
        }
    }

    fn visit_function(&mut self, function: &Function) {
        let sc = self.decorations.get_scope(function.id);
        self.symbols.push_this_scope(sc);

        let func_ty = self.decorations.get_type(function.id);
        let ret_ty = self.types.get_func_return_type(func_ty);
        self.symbols.set_current_function_ty(ret_ty);

        for statement in &function.statements {
            self.visit_statement(statement);
        }

        self.symbols.pop_scope();
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Assign { target, value, .. } => {
                let lhs_ty = self.visit_left_expr(target);
                let rhs_ty = self.visit_expr(value);
                if !self.decorations.get_is_lvalue(target.id) {
                    self.errors.non_referenceable_left_expr(target.span);
                } else if !self.types.copyable_types(lhs_ty, rhs_ty) {
                    self.errors.incompatible_assignment(statement.id_span());
                }
            }
            Statement::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_boolean_condition(cond);
                for s in then_branch {
                    self.visit_statement(s);
                }
                if let Some(else_branch) = else_branch {
                    for s in else_branch {
                        self.visit_statement(s);
                    }
                }
            }
            Statement::While { cond, body, .. } => {
                self.check_boolean_condition(cond);
                for s in body {
                    self.visit_statement(s);
                }
            }
            Statement::Call { callee, args, .. } => {
                self.visit_call(callee, args, statement.id_span(), false);
            }
            Statement::Read { target, .. } => {
                let ty = self.visit_left_expr(target);
                if !self.decorations.get_is_lvalue(target.id) {
                    self.errors.non_referenceable_left_expr(target.span);
                } else if !self.types.is_primitive_ty(ty) && !self.types.is_error_ty(ty) {
                    self.errors.read_write_require_basic(target.span);
                }
            }
            Statement::WriteExpr { value, .. } => {
                let ty = self.visit_expr(value);
                if !self.types.is_primitive_ty(ty) && !self.types.is_error_ty(ty) {
                    self.errors.read_write_require_basic(value.span());
                }
            }
            Statement::WriteString { .. } => {}
            Statement::Return {
                value, return_span, ..
            } => {
                let ret_ty = self.symbols.get_current_function_ty();
                match value {
                    Some(expr) => {
                        let ty = self.visit_expr(expr);
                        if self.types.is_void_ty(ret_ty) || !self.types.copyable_types(ret_ty, ty) {
                            self.errors.incompatible_return(expr.span());
                        }
                    }
                    None => {
                        if !self.types.is_void_ty(ret_ty) {
                            self.errors.incompatible_return(*return_span);
                        }
                    }
                }
            }
        }
    }

    fn check_boolean_condition(&mut self, cond: &Expr) {
        let ty = self.visit_expr(cond);
        if !self.types.is_boolean_ty(ty) && !self.types.is_error_ty(ty) {
            self.errors.boolean_required(cond.span());
        }
    }

    fn visit_left_expr(&mut self, left: &LeftExpr) -> TypeId {
        let (ty, is_lvalue) = match &left.kind {
            LeftExprKind::Ident(ident) => self.visit_ident_ref(ident),
            LeftExprKind::ArrayAccess { base, index, .. } => {
                let ty = self.visit_array_access(base, index);
                (ty, true)
            }
        };
        self.decorations.put_type(left.id, ty);
        self.decorations.put_is_lvalue(left.id, is_lvalue);
        ty
    }

    fn visit_ident_ref(&mut self, ident: &Ident) -> (TypeId, bool) {
        if self.symbols.find_in_stack(&ident.name) < 0 {
            self.errors.undeclared_ident(&ident.name, ident.span);
            let err_ty = self.types.create_error_ty();
            self.decorations.put_type(ident.id, err_ty);
            // Decorated true, not false: an undeclared name must not also trigger
            // "not referenceable" noise on top of the undeclaredIdent already reported.
            self.decorations.put_is_lvalue(ident.id, true);
            return (err_ty, true);
        }
        let ty = self.symbols.get_type(&ident.name);
        let is_lvalue = !self.symbols.is_function_class(&ident.name);
        self.decorations.put_type(ident.id, ty);
        self.decorations.put_is_lvalue(ident.id, is_lvalue);
        (ty, is_lvalue)
    }

    fn visit_array_access(&mut self, base: &Ident, index: &Expr) -> TypeId {
        let (base_ty, base_ok) = if self.symbols.find_in_stack(&base.name) < 0 {
            self.errors.undeclared_ident(&base.name, base.span);
            (self.types.create_error_ty(), false)
        } else {
            (self.symbols.get_type(&base.name), true)
        };
        self.decorations.put_type(base.id, base_ty);
        self.decorations.put_is_lvalue(base.id, base_ok);

        let elem_ty = if self.types.is_error_ty(base_ty) {
            base_ty
        } else if !self.types.is_array_ty(base_ty) {
            self.errors.non_array_in_array_access(base.span);
            self.types.create_error_ty()
        } else {
            self.types.get_array_elem_type(base_ty)
        };

        let index_ty = self.visit_expr(index);
        if !self.types.is_integer_ty(index_ty) && !self.types.is_error_ty(index_ty) {
            self.errors.non_integer_index_in_array_access(index.span());
        }

        elem_ty
    }

    fn visit_expr(&mut self, expr: &Expr) -> TypeId {
        let ty = match expr {
            Expr::Ident(ident) => {
                let (ty, _) = self.visit_ident_ref(ident);
                ty
            }
            Expr::ArrayAccess { base, index, .. } => {
                let ty = self.visit_array_access(base, index);
                self.decorations.put_is_lvalue(expr.id(), true);
                ty
            }
            Expr::Literal { value, .. } => {
                let ty = match value {
                    Literal::Integer(_) => self.types.create_integer_ty(),
                    Literal::Float(_) => self.types.create_float_ty(),
                    Literal::Boolean(_) => self.types.create_boolean_ty(),
                    Literal::Character(_) => self.types.create_character_ty(),
                };
                self.decorations.put_is_lvalue(expr.id(), false);
                ty
            }
            Expr::Unary {
                op, op_span, operand, ..
            } => self.visit_unary(*op, *op_span, operand),
            Expr::Parenthesis { inner, .. } => self.visit_expr(inner),
            Expr::Arithmetic {
                op, op_span, lhs, rhs, ..
            } => self.visit_arithmetic(*op, *op_span, lhs, rhs),
            Expr::Relational {
                op, op_span, lhs, rhs, ..
            } => self.visit_relational(*op, *op_span, lhs, rhs),
            Expr::Logical {
                op, op_span, lhs, rhs, ..
            } => self.visit_logical(*op, *op_span, lhs, rhs),
            Expr::Call { callee, args, .. } => self.visit_call(callee, args, expr.span(), true),
        };
        self.decorations.put_type(expr.id(), ty);
        ty
    }

    fn visit_unary(&mut self, op: UnaryOp, op_span: SourceSpan, operand: &Expr) -> TypeId {
        let ty = self.visit_expr(operand);
        if self.types.is_error_ty(ty) {
            return ty;
        }
        match op {
            UnaryOp::Not => {
                if self.types.is_boolean_ty(ty) {
                    ty
                } else {
                    self.errors.incompatible_operator(op.as_str(), op_span);
                    self.types.create_error_ty()
                }
            }
            UnaryOp::Plus | UnaryOp::Neg => {
                if self.types.is_numeric_ty(ty) {
                    ty
                } else {
                    self.errors.incompatible_operator(op.as_str(), op_span);
                    self.types.create_error_ty()
                }
            }
        }
    }

    fn visit_arithmetic(&mut self, op: ArithOp, op_span: SourceSpan, lhs: &Expr, rhs: &Expr) -> TypeId {
        let lty = self.visit_expr(lhs);
        let rty = self.visit_expr(rhs);
        if self.types.is_error_ty(lty) || self.types.is_error_ty(rty) {
            return self.types.create_error_ty();
        }
        if op == ArithOp::Mod {
            if self.types.is_integer_ty(lty) && self.types.is_integer_ty(rty) {
                return self.types.create_integer_ty();
            }
            self.errors.incompatible_operator(op.as_str(), op_span);
            return self.types.create_error_ty();
        }
        if !self.types.is_numeric_ty(lty) || !self.types.is_numeric_ty(rty) {
            self.errors.incompatible_operator(op.as_str(), op_span);
            return self.types.create_error_ty();
        }
        if self.types.is_float_ty(lty) || self.types.is_float_ty(rty) {
            self.types.create_float_ty()
        } else {
            self.types.create_integer_ty()
        }
    }

    fn visit_relational(&mut self, op: RelOp, op_span: SourceSpan, lhs: &Expr, rhs: &Expr) -> TypeId {
        let lty = self.visit_expr(lhs);
        let rty = self.visit_expr(rhs);
        if !self.types.comparable_types(lty, rty, op.as_str()) {
            self.errors.incompatible_operator(op.as_str(), op_span);
        }
        self.types.create_boolean_ty()
    }

    fn visit_logical(&mut self, op: LogicalOp, op_span: SourceSpan, lhs: &Expr, rhs: &Expr) -> TypeId {
        let lty = self.visit_expr(lhs);
        let rty = self.visit_expr(rhs);
        let lhs_ok = self.types.is_boolean_ty(lty) || self.types.is_error_ty(lty);
        let rhs_ok = self.types.is_boolean_ty(rty) || self.types.is_error_ty(rty);
        if !lhs_ok || !rhs_ok {
            self.errors.incompatible_operator(op.as_str(), op_span);
        }
        self.types.create_boolean_ty()
    }

    fn visit_call(&mut self, callee: &Ident, args: &[Expr], span: SourceSpan, require_non_void: bool) -> TypeId {
        let arg_types: Vec<TypeId> = args.iter().map(|a| self.visit_expr(a)).collect();

        if self.symbols.find_in_stack(&callee.name) < 0 {
            self.errors.undeclared_ident(&callee.name, callee.span);
            let err_ty = self.types.create_error_ty();
            self.decorations.put_type(callee.id, err_ty);
            return err_ty;
        }
        if !self.symbols.is_function_class(&callee.name) {
            self.errors.is_not_callable(&callee.name, callee.span);
            let err_ty = self.types.create_error_ty();
            self.decorations.put_type(callee.id, err_ty);
            return err_ty;
        }

        let func_ty = self.symbols.get_type(&callee.name);
        self.decorations.put_type(callee.id, func_ty);

        let param_types = self.types.get_func_params_types(func_ty);
        if param_types.len() != arg_types.len() {
            self.errors.number_of_parameters(&callee.name, span);
        } else {
            for (i, (pty, aty)) in param_types.iter().zip(arg_types.iter()).enumerate() {
                if !self.types.copyable_types(*pty, *aty) {
                    self.errors.incompatible_parameter(i + 1, &callee.name, args[i].span());
                }
            }
        }

        let ret = self.types.get_func_return_type(func_ty);
        if require_non_void && self.types.is_void_ty(ret) {
            self.errors.is_not_function(&callee.name, callee.span);
            return self.types.create_error_ty();
        }
        ret
    }
}

impl Statement {
    /// Span to attach to a diagnostic about the statement as a whole
    /// (assignment incompatibility, call arity) rather than one of its parts.
    fn id_span(&self) -> SourceSpan {
        match self {
            Statement::Assign { span, .. }
            | Statement::If { span, .. }
            | Statement::While { span, .. }
            | Statement::Call { span, .. }
            | Statement::Read { span, .. }
            | Statement::WriteExpr { span, .. }
            | Statement::WriteString { span, .. }
            | Statement::Return { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Function, Program};
    use crate::passes::symbols::SymbolsPass;

    fn dummy_span() -> SourceSpan {
        SourceSpan::synthetic()
    }

    fn run_pipeline(program: &Program) -> (TypesMgr, SymTable, TreeDecoration, SemErrors) {
        let mut types = TypesMgr::new();
        let mut symbols = SymTable::new();
        let mut decorations = TreeDecoration::new();
        let mut errors = SemErrors::new();
        {
            let mut pass = SymbolsPass::new(&mut types, &mut symbols, &mut decorations, &mut errors);
            pass.run(program);
        }
        {
            let mut pass = TypeCheckPass::new(&mut types, &mut symbols, &mut decorations, &mut errors);
            pass.run(program);
        }
        (types, symbols, decorations, errors)
    }

    #[test]
    fn undeclared_identifier_is_reported() {
        let stmt = Statement::write_expr(Expr::ident("x", dummy_span()), dummy_span());
        let func = Function::new("main", dummy_span(), vec![], None, vec![], vec![stmt], dummy_span());
        let program = Program::new(vec![func], dummy_span());
        let (_, _, _, errors) = run_pipeline(&program);
        assert!(errors.len() >= 1);
    }

    #[test]
    fn assigning_float_literal_to_int_variable_is_incompatible() {
        use crate::ast::{Data, PrimitiveType, Type, VariableDecl};
        let decl = VariableDecl::new(
            vec!["x".to_string()],
            Data::scalar(Type::new(PrimitiveType::Int, dummy_span()), dummy_span()),
            dummy_span(),
        );
        let target = LeftExpr::ident(Ident::new("x", dummy_span()));
        let stmt = Statement::assign(
            target,
            dummy_span(),
            Expr::literal(Literal::Float(1.0), dummy_span()),
            dummy_span(),
        );
        let func = Function::new("main", dummy_span(), vec![], None, vec![decl], vec![stmt], dummy_span());
        let program = Program::new(vec![func], dummy_span());
        let (_, _, _, errors) = run_pipeline(&program);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn copying_int_into_float_variable_is_allowed() {
        use crate::ast::{Data, PrimitiveType, Type, VariableDecl};
        let decl = VariableDecl::new(
            vec!["x".to_string()],
            Data::scalar(Type::new(PrimitiveType::Float, dummy_span()), dummy_span()),
            dummy_span(),
        );
        let target = LeftExpr::ident(Ident::new("x", dummy_span()));
        let stmt = Statement::assign(
            target,
            dummy_span(),
            Expr::literal(Literal::Integer(1), dummy_span()),
            dummy_span(),
        );
        let func = Function::new("main", dummy_span(), vec![], None, vec![decl], vec![stmt], dummy_span());
        let program = Program::new(vec![func], dummy_span());
        let (_, _, _, errors) = run_pipeline(&program);
        assert!(errors.is_empty());
    }

    #[test]
    fn modulo_requires_both_operands_integer() {
        let expr = Expr::arithmetic(
            ArithOp::Mod,
            dummy_span(),
            Expr::literal(Literal::Float(1.0), dummy_span()),
            Expr::literal(Literal::Integer(2), dummy_span()),
            dummy_span(),
        );
        let stmt = Statement::write_expr(expr, dummy_span());
        let func = Function::new("main", dummy_span(), vec![], None, vec![], vec![stmt], dummy_span());
        let program = Program::new(vec![func], dummy_span());
        let (_, _, _, errors) = run_pipeline(&program);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn missing_main_is_reported() {
        let func = Function::new("helper", dummy_span(), vec![], None, vec![], vec![], dummy_span());
        let program = Program::new(vec![func], dummy_span());
        let (_, _, _, errors) = run_pipeline(&program);
        assert_eq!(errors.len(), 1);
    }
}
