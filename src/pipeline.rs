//! The single entry point: runs `SymbolsPass`, `TypeCheckPass` and, only if
//! no diagnostics were raised, `CodeGenPass` over an already-parsed program.
//!
//! The teacher's `compiler::Compiler<P, A, G>` (`compiler/src/compiler/mod.rs`)
//! is a builder over pluggable parse/analyse/generate strategies, because
//! Barracuda supports more than one of each. ASL's core has exactly one of
//! each pass, so that facade collapses to this single concrete struct.

use crate::ast::Program;
use crate::decoration::TreeDecoration;
use crate::errors::SemErrors;
use crate::passes::{CodeGenPass, SymbolsPass, Subroutine, TypeCheckPass};
use crate::symtab::SymTable;
use crate::types::TypesMgr;

/// Either a fully lowered program (`subroutines` non-empty or the program was
/// empty to begin with, `errors` empty) or a diagnostic report (`errors`
/// non-empty, `subroutines` empty) — never both.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub subroutines: Vec<Subroutine>,
    pub errors: SemErrors,
}

impl PipelineOutput {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Pipeline
    }

    pub fn run(&self, program: &Program) -> PipelineOutput {
        let mut types = TypesMgr::new();
        let mut symbols = SymTable::new();
        let mut decorations = TreeDecoration::new();
        let mut errors = SemErrors::new();

        SymbolsPass::new(&mut types, &mut symbols, &mut decorations, &mut errors).run(program);
        TypeCheckPass::new(&mut types, &mut symbols, &mut decorations, &mut errors).run(program);

        if !errors.is_empty() {
            return PipelineOutput {
                subroutines: Vec::new(),
                errors,
            };
        }

        let subroutines = CodeGenPass::new(&types, &mut symbols, &mut decorations).run(program);
        PipelineOutput { subroutines, errors }
    }
}

#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::ast::{ArithOp, Data, Expr, Function, Ident, LeftExpr, Literal, Parameter, PrimitiveType, Statement, Type, VariableDecl};
    use crate::span::SourceSpan;

    fn sp() -> SourceSpan {
        SourceSpan::synthetic()
    }

    fn single_function(
        name: &str,
        params: Vec<Parameter>,
        return_type: Option<Type>,
        declarations: Vec<VariableDecl>,
        statements: Vec<Statement>,
    ) -> Program {
        let func = Function::new(name, sp(), params, return_type, declarations, statements, sp());
        Program::new(vec![func], sp())
    }

    /// S1 (hello): `func main var x:int x=3; write x; endfunc`
    #[test]
    fn s1_hello_compiles_and_writes_an_integer() {
        let decl = VariableDecl::new(
            vec!["x".to_string()],
            Data::scalar(Type::new(PrimitiveType::Int, sp()), sp()),
            sp(),
        );
        let assign = Statement::assign(
            LeftExpr::ident(Ident::new("x", sp())),
            sp(),
            Expr::literal(Literal::Integer(3), sp()),
            sp(),
        );
        let write = Statement::write_expr(Expr::ident("x", sp()), sp());
        let program = single_function("main", vec![], None, vec![decl], vec![assign, write]);

        let output = Pipeline::new().run(&program);
        assert!(output.is_success(), "unexpected errors: {}", output.errors);
        let rendered = output.subroutines[0].body.to_string();
        assert!(rendered.contains("ILOAD"));
        assert!(rendered.contains("LOAD x"));
        assert!(rendered.contains("WRITEI x"));
        assert!(rendered.trim_end().ends_with("RETURN"));
    }

    /// S2 (coercion): `var x:float x=2;` — integer literal coerced to float.
    #[test]
    fn s2_assigning_integer_to_float_variable_inserts_float_coercion() {
        let decl = VariableDecl::new(
            vec!["x".to_string()],
            Data::scalar(Type::new(PrimitiveType::Float, sp()), sp()),
            sp(),
        );
        let assign = Statement::assign(
            LeftExpr::ident(Ident::new("x", sp())),
            sp(),
            Expr::literal(Literal::Integer(2), sp()),
            sp(),
        );
        let program = single_function("main", vec![], None, vec![decl], vec![assign]);

        let output = Pipeline::new().run(&program);
        assert!(output.is_success(), "unexpected errors: {}", output.errors);
        let rendered = output.subroutines[0].body.to_string();
        assert!(rendered.contains("ILOAD"));
        assert!(rendered.contains("FLOAT"));
        assert!(rendered.contains("LOAD x"));
    }

    /// S3 (array): `var a:array[4] of int a[1+1]=7;`
    #[test]
    fn s3_array_store_uses_xload_with_computed_index() {
        let decl = VariableDecl::new(
            vec!["a".to_string()],
            Data::array(4, Type::new(PrimitiveType::Int, sp()), sp()),
            sp(),
        );
        let index = Expr::arithmetic(
            ArithOp::Add,
            sp(),
            Expr::literal(Literal::Integer(1), sp()),
            Expr::literal(Literal::Integer(1), sp()),
            sp(),
        );
        let assign = Statement::assign(
            LeftExpr::array_access(Ident::new("a", sp()), index, sp()),
            sp(),
            Expr::literal(Literal::Integer(7), sp()),
            sp(),
        );
        let program = single_function("main", vec![], None, vec![decl], vec![assign]);

        let output = Pipeline::new().run(&program);
        assert!(output.is_success(), "unexpected errors: {}", output.errors);
        let rendered = output.subroutines[0].body.to_string();
        assert!(rendered.contains("ADD"));
        assert!(rendered.contains("XLOAD a,"));
    }

    /// S4 (type error): `var b:bool b = 1 + 2;` — reports `incompatibleAssignment`.
    #[test]
    fn s4_assigning_integer_expression_to_bool_is_incompatible_assignment() {
        let decl = VariableDecl::new(
            vec!["b".to_string()],
            Data::scalar(Type::new(PrimitiveType::Bool, sp()), sp()),
            sp(),
        );
        let value = Expr::arithmetic(
            ArithOp::Add,
            sp(),
            Expr::literal(Literal::Integer(1), sp()),
            Expr::literal(Literal::Integer(2), sp()),
            sp(),
        );
        let assign = Statement::assign(LeftExpr::ident(Ident::new("b", sp())), sp(), value, sp());
        let program = single_function("main", vec![], None, vec![decl], vec![assign]);

        let output = Pipeline::new().run(&program);
        assert!(!output.is_success());
        assert_eq!(output.errors.len(), 1);
        assert!(output.subroutines.is_empty());
    }

    /// S5 (call): `func f(x:int):int return x+1; endfunc`
    /// `func main var y:int y=f(3); endfunc`
    #[test]
    fn s5_call_emits_balanced_push_pop_and_captures_result() {
        let f = Function::new(
            "f",
            sp(),
            vec![Parameter::new("x", Data::scalar(Type::new(PrimitiveType::Int, sp()), sp()), sp())],
            Some(Type::new(PrimitiveType::Int, sp())),
            vec![],
            vec![Statement::return_stmt(
                Some(Expr::arithmetic(
                    ArithOp::Add,
                    sp(),
                    Expr::ident("x", sp()),
                    Expr::literal(Literal::Integer(1), sp()),
                    sp(),
                )),
                sp(),
                sp(),
            )],
            sp(),
        );
        let decl = VariableDecl::new(
            vec!["y".to_string()],
            Data::scalar(Type::new(PrimitiveType::Int, sp()), sp()),
            sp(),
        );
        let assign = Statement::assign(
            LeftExpr::ident(Ident::new("y", sp())),
            sp(),
            Expr::call(Ident::new("f", sp()), vec![Expr::literal(Literal::Integer(3), sp())], sp()),
            sp(),
        );
        let main = Function::new("main", sp(), vec![], None, vec![decl], vec![assign], sp());
        let program = Program::new(vec![f, main], sp());

        let output = Pipeline::new().run(&program);
        assert!(output.is_success(), "unexpected errors: {}", output.errors);
        let main_sub = output.subroutines.iter().find(|s| s.name == "main").unwrap();
        let pushes = main_sub
            .body
            .iter()
            .filter(|i| matches!(i, crate::passes::codegen::Instruction::Push(_)))
            .count();
        let pops = main_sub
            .body
            .iter()
            .filter(|i| matches!(i, crate::passes::codegen::Instruction::Pop(_)))
            .count();
        assert_eq!(pushes, pops);
        assert!(main_sub.body.to_string().contains("CALL f"));
    }

    /// S6 (no main): a program containing only `func foo endfunc`.
    #[test]
    fn s6_missing_main_reports_no_main_properly_declared() {
        let program = single_function("foo", vec![], None, vec![], vec![]);
        let output = Pipeline::new().run(&program);
        assert!(!output.is_success());
        assert_eq!(output.errors.len(), 1);
    }
}
